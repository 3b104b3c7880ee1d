// caller/src/registry/function.rs

//! Free and anonymous function definitions.

use crate::core::handler::{Arguments, FunctionBody};
use crate::core::signature::Signature;
use crate::core::value::Value;
use std::fmt;
use std::sync::Arc;

pub const ANONYMOUS: &str = "{closure}";

/// A function body paired with its declared signature.
#[derive(Clone)]
pub struct FunctionDef {
  name: Option<String>,
  signature: Signature,
  body: FunctionBody,
}

impl FunctionDef {
  /// A named function, resolvable by name once registered.
  pub fn new<F, R>(name: impl Into<String>, signature: Signature, body: F) -> Self
  where
    F: Fn(Arguments) -> anyhow::Result<R> + Send + Sync + 'static,
    R: Into<Value>,
  {
    Self {
      name: Some(name.into()),
      signature,
      body: Arc::new(move |args: Arguments| -> anyhow::Result<Value> { body(args).map(Into::into) }),
    }
  }

  /// An anonymous function, usable directly as a callable reference.
  pub fn anonymous<F, R>(signature: Signature, body: F) -> Self
  where
    F: Fn(Arguments) -> anyhow::Result<R> + Send + Sync + 'static,
    R: Into<Value>,
  {
    Self {
      name: None,
      signature,
      body: Arc::new(move |args: Arguments| -> anyhow::Result<Value> { body(args).map(Into::into) }),
    }
  }

  pub fn name(&self) -> &str {
    self.name.as_deref().unwrap_or(ANONYMOUS)
  }

  pub fn signature(&self) -> &Signature {
    &self.signature
  }

  pub fn call(&self, args: Arguments) -> anyhow::Result<Value> {
    (self.body)(args)
  }
}

impl fmt::Debug for FunctionDef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FunctionDef")
      .field("name", &self.name())
      .field("signature", &self.signature)
      .finish_non_exhaustive()
  }
}
