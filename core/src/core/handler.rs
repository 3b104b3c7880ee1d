// caller/src/core/handler.rs

//! Defines the body types behind registered callables and the `Arguments`
//! list the dispatcher hands to them.

use crate::core::context_data::Context;
use crate::core::value::{Object, Value};
use std::any::Any;
use std::sync::Arc;

/// Body of a free or anonymous function.
///
/// Receives its bound arguments in declaration order and returns the step
/// result. Failures are reported through `anyhow` and surface from
/// `Pipeline::execute` as `CallerError::StepFailed`.
pub type FunctionBody = Arc<dyn Fn(Arguments) -> anyhow::Result<Value> + Send + Sync>;

/// Body of a class method. The receiver is `None` for static methods.
pub type MethodBody = Arc<dyn Fn(Option<&Object>, Arguments) -> anyhow::Result<Value> + Send + Sync>;

/// Builds the state of a new class instance from its bound constructor arguments.
pub type ConstructorBody = Arc<dyn Fn(Arguments) -> anyhow::Result<Arc<dyn Any + Send + Sync>> + Send + Sync>;

/// One bound argument slot.
#[derive(Debug, Clone)]
pub enum Argument {
  Value(Value),
  /// The pipeline's execution context, injected into context-tagged parameters.
  Context(Context),
}

impl Argument {
  pub fn as_value(&self) -> Option<&Value> {
    match self {
      Argument::Value(v) => Some(v),
      Argument::Context(_) => None,
    }
  }

  pub fn as_context(&self) -> Option<&Context> {
    match self {
      Argument::Context(ctx) => Some(ctx),
      Argument::Value(_) => None,
    }
  }
}

/// The ordered argument list produced by the binder.
///
/// Every slot remembers the name of the parameter it was bound to.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
  slots: Vec<(String, Argument)>,
}

impl Arguments {
  pub fn new() -> Self {
    Self::default()
  }

  pub(crate) fn with_capacity(capacity: usize) -> Self {
    Self {
      slots: Vec::with_capacity(capacity),
    }
  }

  pub(crate) fn push(&mut self, name: impl Into<String>, argument: Argument) {
    self.slots.push((name.into(), argument));
  }

  /// Value bound to the named parameter. `None` for unknown names and context slots.
  pub fn get(&self, name: &str) -> Option<&Value> {
    self.slot(name).and_then(Argument::as_value)
  }

  pub fn slot(&self, name: &str) -> Option<&Argument> {
    self.slots.iter().find(|(n, _)| n == name).map(|(_, a)| a)
  }

  pub fn at(&self, index: usize) -> Option<&Argument> {
    self.slots.get(index).map(|(_, a)| a)
  }

  /// Like [`Arguments::get`] but fails, naming the parameter, when nothing is bound to it.
  pub fn require(&self, name: &str) -> anyhow::Result<&Value> {
    self
      .get(name)
      .ok_or_else(|| anyhow::anyhow!("no value bound to parameter `{}`", name))
  }

  /// The injected context handle, if any parameter asked for it.
  pub fn context(&self) -> Option<&Context> {
    self.slots.iter().find_map(|(_, a)| a.as_context())
  }

  /// Like [`Arguments::context`] but fails for bodies that require one.
  pub fn require_context(&self) -> anyhow::Result<&Context> {
    self
      .context()
      .ok_or_else(|| anyhow::anyhow!("no context parameter was declared for this callable"))
  }

  /// Bound values in declaration order, context slots skipped.
  pub fn values(&self) -> impl Iterator<Item = &Value> {
    self.slots.iter().filter_map(|(_, a)| a.as_value())
  }
}
