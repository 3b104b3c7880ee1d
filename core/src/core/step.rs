// caller/src/core/step.rs

//! Defines the normalized description of a queued step: what to invoke and
//! which parameters it takes.

use crate::core::value::{Object, TypeTag, Value};
use crate::error::{CallerError, InvalidCallable};
use crate::registry::{ClassDef, FunctionDef, MethodDef};
use std::fmt;
use std::sync::Arc;

/// What a parameter slot accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accepts {
  /// Untyped, or declared `mixed`.
  Any,
  /// Filled with the execution context handle, never from caller values.
  Context,
  /// Value category must be one of these tags.
  OneOf(Vec<TypeTag>),
}

impl Accepts {
  pub fn admits(&self, value: &Value) -> bool {
    match self {
      Accepts::Any => true,
      Accepts::Context => false,
      Accepts::OneOf(tags) => tags.iter().any(|tag| value.matches(tag)),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
  pub name: String,
  pub accepts: Accepts,
  pub default: Option<Value>,
}

impl ParameterDescriptor {
  pub fn has_default(&self) -> bool {
    self.default.is_some()
  }

  pub fn is_context(&self) -> bool {
    self.accepts == Accepts::Context
  }
}

/// Resolved invocation target. Decided once, when the step is queued.
#[derive(Clone)]
pub enum Target {
  Plain(Arc<FunctionDef>),
  StaticMethod {
    class: Arc<ClassDef>,
    method: Arc<MethodDef>,
  },
  InstanceMethod {
    instance: Object,
    method: Arc<MethodDef>,
  },
  /// The owner is a class; a fresh instance is built on every dispatch.
  InstanceMethodNeedsConstruction {
    class: Arc<ClassDef>,
    method: Arc<MethodDef>,
  },
}

impl Target {
  /// `Class::method`, a function name, or `{closure}`.
  pub fn label(&self) -> String {
    match self {
      Target::Plain(function) => function.name().to_string(),
      Target::StaticMethod { class, method } | Target::InstanceMethodNeedsConstruction { class, method } => {
        format!("{}::{}", class.name(), method.name())
      }
      Target::InstanceMethod { instance, method } => format!("{}::{}", instance.class(), method.name()),
    }
  }

  pub fn kind(&self) -> &'static str {
    match self {
      Target::Plain(_) => "plain",
      Target::StaticMethod { .. } => "static_method",
      Target::InstanceMethod { .. } => "instance_method",
      Target::InstanceMethodNeedsConstruction { .. } => "instance_method_needs_construction",
    }
  }
}

impl fmt::Debug for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Target")
      .field("kind", &self.kind())
      .field("label", &self.label())
      .finish()
  }
}

/// A queued step.
#[derive(Debug, Clone)]
pub struct CallableDescriptor {
  pub target: Target,
  pub parameters: Vec<ParameterDescriptor>,
  /// Present only for `Target::InstanceMethodNeedsConstruction`.
  pub constructor_parameters: Option<Vec<ParameterDescriptor>>,
}

impl CallableDescriptor {
  pub fn label(&self) -> String {
    self.target.label()
  }
}

/// Owner half of a `(owner, method)` reference.
#[derive(Debug, Clone)]
pub enum Owner {
  Class(String),
  Instance(Object),
}

/// Anything that can be queued as a step before it is resolved.
#[derive(Debug, Clone)]
pub enum CallableRef {
  /// A function value, named or anonymous.
  Function(Arc<FunctionDef>),
  /// An object; its `invoke` method is called.
  Invocable(Object),
  /// `"Class::method"`, a class name (its `invoke` method), or a function name.
  Name(String),
  Method(Owner, String),
}

impl CallableRef {
  pub fn method(class: impl Into<String>, method: impl Into<String>) -> Self {
    CallableRef::Method(Owner::Class(class.into()), method.into())
  }

  pub fn instance_method(instance: Object, method: impl Into<String>) -> Self {
    CallableRef::Method(Owner::Instance(instance), method.into())
  }
}

impl From<FunctionDef> for CallableRef {
  fn from(function: FunctionDef) -> Self {
    CallableRef::Function(Arc::new(function))
  }
}

impl From<Arc<FunctionDef>> for CallableRef {
  fn from(function: Arc<FunctionDef>) -> Self {
    CallableRef::Function(function)
  }
}

impl From<Object> for CallableRef {
  fn from(obj: Object) -> Self {
    CallableRef::Invocable(obj)
  }
}

impl From<&str> for CallableRef {
  fn from(name: &str) -> Self {
    CallableRef::Name(name.to_string())
  }
}

impl From<String> for CallableRef {
  fn from(name: String) -> Self {
    CallableRef::Name(name)
  }
}

impl From<(&str, &str)> for CallableRef {
  fn from((class, method): (&str, &str)) -> Self {
    CallableRef::method(class, method)
  }
}

impl From<(Object, &str)> for CallableRef {
  fn from((instance, method): (Object, &str)) -> Self {
    CallableRef::instance_method(instance, method)
  }
}

/// Accepts the dynamic shapes a callable can arrive in: a string, an object,
/// or a `[class-or-object, method]` pair.
impl TryFrom<Value> for CallableRef {
  type Error = CallerError;

  fn try_from(value: Value) -> Result<Self, Self::Error> {
    let type_name = value.type_tag().name().to_string();
    let invalid = move || CallerError::from(InvalidCallable::InvalidType { type_name });
    match value {
      Value::String(name) => Ok(CallableRef::Name(name)),
      Value::Object(obj) => Ok(CallableRef::Invocable(obj)),
      Value::Sequence(items) if items.len() == 2 => match (&items[0], &items[1]) {
        (Value::String(class), Value::String(method)) => Ok(CallableRef::method(class.clone(), method.clone())),
        (Value::Object(obj), Value::String(method)) => Ok(CallableRef::instance_method(obj.clone(), method.clone())),
        _ => Err(invalid()),
      },
      _ => Err(invalid()),
    }
  }
}
