// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use caller::{Arguments, ClassDef, FunctionDef, MethodDef, Registry, Signature, TypeTag, Value, Visibility};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Common class names ---
pub const CLASS_METHOD: &str = "ClassMethod";
pub const CLASS_STATIC_METHOD: &str = "ClassStaticMethod";
pub const CLASS_WITH_CONSTRUCTOR: &str = "ClassMethodWithConstructor";
pub const CLASS_WITH_CONSTRUCTOR_AND_CONTEXT: &str = "ClassMethodWithConstructorAndContext";
pub const INVOKABLE_CLASS: &str = "InvokableClass";
pub const COUNTED_CLASS: &str = "CountedClass";
pub const FAILING_CLASS: &str = "FailingClass";

// --- Instance state for the constructed classes ---
#[derive(Debug, Clone)]
pub struct ConstructedState {
  pub d: Value,
  pub e: Value,
  pub f: Value,
}

#[derive(Debug, Clone)]
pub struct ContextSeededState {
  pub a: Value,
  pub b: Value,
}

/// Joins every bound value with `:`, skipping context slots.
pub fn joined(args: &Arguments) -> String {
  args.values().map(ToString::to_string).collect::<Vec<_>>().join(":")
}

/// `(a, b, c = 3)`, the signature most fixtures share.
pub fn abc_signature() -> Signature {
  Signature::new().required("a").required("b").optional("c", 3)
}

pub fn def_signature() -> Signature {
  Signature::new().required("d").required("e").optional("f", 6)
}

// --- Common callable creators ---
pub fn named_function(name: &str) -> FunctionDef {
  FunctionDef::new(name, abc_signature(), |args: Arguments| Ok(joined(&args)))
}

pub fn anonymous_abc() -> FunctionDef {
  FunctionDef::anonymous(abc_signature(), |args: Arguments| Ok(joined(&args)))
}

/// A step that stores its `param` argument in scratch under the same name,
/// then optionally stops the run.
pub fn recording_step(param: &'static str, stop: bool) -> FunctionDef {
  FunctionDef::anonymous(
    Signature::new().required(param).required("context"),
    move |args: Arguments| {
      let ctx = args.require_context()?;
      ctx.set(param, args.require(param)?.clone());
      if stop {
        ctx.stop();
      }
      Ok(Value::Null)
    },
  )
}

pub fn class_method() -> ClassDef {
  ClassDef::new(CLASS_METHOD)
    .method("callback", abc_signature(), |_: &(), args: Arguments| Ok(joined(&args)))
    .with_method(
      MethodDef::instance("callbackPrivate", Signature::new(), |_: &(), _args: Arguments| Ok(true))
        .visibility(Visibility::Private),
    )
    .with_method(
      MethodDef::instance("callbackProtected", Signature::new(), |_: &(), _args: Arguments| Ok(true))
        .visibility(Visibility::Protected),
    )
    .method(
      "callbackWithTypedParameters",
      Signature::new().typed("a", [TypeTag::Sequence]),
      |_: &(), _args: Arguments| Ok(true),
    )
    .method(
      "callbackMultiMiddleware",
      Signature::new().required("f").context("context"),
      |_: &(), args: Arguments| Ok(format!("{}:{}", args.require_context()?, args.require("f")?)),
    )
}

pub fn class_static_method() -> ClassDef {
  ClassDef::new(CLASS_STATIC_METHOD)
    .static_method("callback", abc_signature(), |args: Arguments| Ok(joined(&args)))
    .with_method(
      MethodDef::static_fn("callbackPrivate", Signature::new(), |_args: Arguments| Ok(true))
        .visibility(Visibility::Private),
    )
    .with_method(
      MethodDef::static_fn("callbackProtected", Signature::new(), |_args: Arguments| Ok(true))
        .visibility(Visibility::Protected),
    )
    .static_method(
      "callbackWithTypedParameters",
      Signature::new().typed("a", [TypeTag::Sequence]),
      |_args: Arguments| Ok(true),
    )
    .static_method(
      "callbackMultiMiddleware",
      Signature::new().context("context").required("g"),
      |args: Arguments| Ok(format!("{}:{}", args.require_context()?, args.require("g")?)),
    )
}

fn constructed_state(args: Arguments) -> anyhow::Result<ConstructedState> {
  Ok(ConstructedState {
    d: args.require("d")?.clone(),
    e: args.require("e")?.clone(),
    f: args.require("f")?.clone(),
  })
}

fn callback_with_state(this: &ConstructedState, args: Arguments) -> anyhow::Result<String> {
  Ok(format!("{}:{}:{}:{}", joined(&args), this.d, this.e, this.f))
}

pub fn class_with_constructor() -> ClassDef {
  ClassDef::new(CLASS_WITH_CONSTRUCTOR)
    .constructor(def_signature(), constructed_state)
    .method("callback", abc_signature(), callback_with_state)
}

pub fn class_with_constructor_and_context() -> ClassDef {
  ClassDef::new(CLASS_WITH_CONSTRUCTOR_AND_CONTEXT)
    .constructor(Signature::new().required("context").required("b"), |args: Arguments| {
      Ok(ContextSeededState {
        a: args.require_context()?.get_or("a", Value::Null),
        b: args.require("b")?.clone(),
      })
    })
    .method(
      "callbackMultiMiddleware",
      Signature::new().required("c"),
      |this: &ContextSeededState, args: Arguments| Ok(format!("{}:{}:{}", this.a, this.b, args.require("c")?)),
    )
}

pub fn invokable_class() -> ClassDef {
  ClassDef::new(INVOKABLE_CLASS)
    .constructor(def_signature(), constructed_state)
    .method(caller::INVOKE, abc_signature(), callback_with_state)
}

pub static CONSTRUCTION_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Each construction takes the next serial number from `CONSTRUCTION_COUNTER`.
pub fn counted_class() -> ClassDef {
  ClassDef::new(COUNTED_CLASS)
    .constructor(Signature::new(), |_args: Arguments| {
      Ok(CONSTRUCTION_COUNTER.fetch_add(1, Ordering::SeqCst) + 1)
    })
    .method("serial", Signature::new(), |serial: &usize, _args: Arguments| {
      Ok(Value::from(*serial as i64))
    })
}

pub fn failing_class() -> ClassDef {
  ClassDef::new(FAILING_CLASS)
    .constructor(Signature::new(), |_args: Arguments| -> anyhow::Result<()> {
      Err(anyhow::anyhow!("connection refused"))
    })
    .method("callback", Signature::new(), |_: &(), _args: Arguments| Ok(true))
}

/// A registry holding every fixture above plus a few named functions.
pub fn fixture_registry() -> Arc<Registry> {
  let registry = Registry::new();
  registry
    .register_function(named_function("namedFunction"))
    .register_function(FunctionDef::new(
      "namedFunctionMultiMiddleware",
      Signature::new().required("context").required("e"),
      |args: Arguments| Ok(format!("{}:{}", args.require_context()?, args.require("e")?)),
    ))
    .register_function(FunctionDef::new(
      "namedFunctionWithContext",
      Signature::new().required("a").required("context"),
      |args: Arguments| {
        let has_context = args.context().is_some();
        Ok(format!("{}:{}", args.require("a")?, if has_context { "Context" } else { "none" }))
      },
    ))
    .register_function(FunctionDef::new(
      "typedFunction",
      Signature::new().typed("a", [TypeTag::Sequence]),
      |args: Arguments| Ok(args.require("a")?.clone()),
    ))
    .register_class(class_method())
    .register_class(class_static_method())
    .register_class(class_with_constructor())
    .register_class(class_with_constructor_and_context())
    .register_class(invokable_class())
    .register_class(counted_class())
    .register_class(failing_class());
  Arc::new(registry)
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
