// src/lib.rs

//! Caller: a sequential middleware dispatcher for Rust.
//!
//! A `Pipeline` holds an ordered queue of callables and runs them one after
//! another over a shared execution context:
//!  - Plain functions, anonymous closures, static methods, methods on existing
//!    instances, and methods on classes that are constructed per call.
//!  - Arguments resolved from positional or named values, falling back to
//!    declared defaults, with type checks.
//!  - Context injection into parameters declared with the context type (or
//!    named `context`).
//!  - Scratch storage shared by all steps, a running result, and early stop.
//!
//! Rust has no runtime reflection, so callables are described up front with
//! `Signature` builders and registered in a `Registry`.

pub mod core;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod resolve;

// --- Re-exports for the Public API ---

pub use crate::core::context::ExecutionContext;
pub use crate::core::context_data::Context;
pub use crate::core::control::RunState;
pub use crate::core::handler::{Argument, Arguments};
pub use crate::core::signature::{Parameter, Signature};
pub use crate::core::step::{Accepts, CallableDescriptor, CallableRef, Owner, ParameterDescriptor, Target};
pub use crate::core::value::{Object, TypeTag, Value};
pub use crate::core::values::{BindingMode, ValueKey, Values};

pub use crate::pipeline::definition::Pipeline;

pub use crate::registry::{ClassDef, FunctionDef, Introspector, MethodDef, Registry, Visibility, INVOKE};

pub use crate::error::{CallerError, CallerResult, InvalidCallable};

/*
    Core Workflow:
    1. Describe each callable with a `Signature` and wrap it in a `FunctionDef`,
       or declare a `ClassDef` with a constructor and methods.
    2. Register named functions and classes in a `Registry`.
    3. Build a `Pipeline` over that registry from callable references:
       `FunctionDef` values, `"name"`, `"Class::method"`, `("Class", "method")`,
       `(instance, "method")`, or an invocable `Object`.
    4. Optionally seed scratch data through `pipeline.context()`.
    5. Call `pipeline.execute(&values, &constructor_values)` and inspect the
       returned `Context`: `state()`, `result()`, `get(key)`.
*/
