pub mod context;
pub mod context_data;
pub mod control;
pub mod handler;
pub mod signature;
pub mod step;
pub mod value;
pub mod values;

// Re-export key types for easier access from other modules (and lib.rs)
pub use context::ExecutionContext;
pub use context_data::Context;
pub use control::RunState;
pub use handler::{Argument, Arguments};
pub use signature::{Parameter, Signature};
pub use step::{Accepts, CallableDescriptor, CallableRef, Owner, ParameterDescriptor, Target};
pub use value::{Object, TypeTag, Value};
pub use values::{BindingMode, ValueKey, Values};
