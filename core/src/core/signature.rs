// caller/src/core/signature.rs

//! Declared parameter lists.
//!
//! Rust cannot introspect a closure's parameters at runtime, so every callable
//! is registered together with an explicit `Signature`. This is the raw,
//! declaration-side view; the signature extractor normalizes it into
//! `ParameterDescriptor`s.

use crate::core::value::{TypeTag, Value};

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
  pub name: String,
  /// Declared type set. Empty means untyped.
  pub types: Vec<TypeTag>,
  /// Default used when the caller supplies nothing. `Some(Value::Null)` is a
  /// valid default and differs from having none.
  pub default: Option<Value>,
}

impl Parameter {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      types: Vec::new(),
      default: None,
    }
  }

  pub fn typed<I>(mut self, types: I) -> Self
  where
    I: IntoIterator<Item = TypeTag>,
  {
    self.types = types.into_iter().collect();
    self
  }

  pub fn default_value(mut self, default: impl Into<Value>) -> Self {
    self.default = Some(default.into());
    self
  }
}

/// Ordered parameter list of a function, method or constructor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
  parameters: Vec<Parameter>,
}

impl Signature {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn param(mut self, parameter: Parameter) -> Self {
    self.parameters.push(parameter);
    self
  }

  /// Untyped parameter without a default.
  pub fn required(self, name: impl Into<String>) -> Self {
    self.param(Parameter::new(name))
  }

  /// Untyped parameter with a default.
  pub fn optional(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
    self.param(Parameter::new(name).default_value(default))
  }

  /// Typed parameter without a default.
  pub fn typed<I>(self, name: impl Into<String>, types: I) -> Self
  where
    I: IntoIterator<Item = TypeTag>,
  {
    self.param(Parameter::new(name).typed(types))
  }

  /// Parameter declared with the execution context type.
  pub fn context(self, name: impl Into<String>) -> Self {
    self.param(Parameter::new(name).typed([TypeTag::Context]))
  }

  pub fn parameters(&self) -> &[Parameter] {
    &self.parameters
  }
}
