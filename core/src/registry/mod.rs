// caller/src/registry/mod.rs

//! Defines the `Introspector` trait, the boundary the signature extractor uses
//! to look up callables, and `Registry`, a name-keyed implementation of it.

pub mod class;
pub mod function;

pub use class::{ClassDef, MethodDef, Visibility, INVOKE};
pub use function::{FunctionDef, ANONYMOUS};

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{event, Level};

/// Answers "what does this name refer to" for the signature extractor.
///
/// Classes answer the finer questions themselves: whether a method exists,
/// whether it is public or static, and what their constructor takes.
pub trait Introspector: Send + Sync {
  fn function(&self, name: &str) -> Option<Arc<FunctionDef>>;

  fn class(&self, name: &str) -> Option<Arc<ClassDef>>;

  fn function_exists(&self, name: &str) -> bool {
    self.function(name).is_some()
  }

  fn class_exists(&self, name: &str) -> bool {
    self.class(name).is_some()
  }
}

/// Name-keyed store of functions and classes.
///
/// Registration takes `&self`, so a registry shared behind an `Arc` can keep
/// growing after pipelines have been built from it. Steps already queued hold
/// their own resolved definitions and are unaffected by later registrations.
#[derive(Default)]
pub struct Registry {
  functions: RwLock<HashMap<String, Arc<FunctionDef>>>,
  classes: RwLock<HashMap<String, Arc<ClassDef>>>,
}

impl Registry {
  /// Creates a new, empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers a named function. An anonymous function is registered under `{closure}`.
  pub fn register_function(&self, function: FunctionDef) -> &Self {
    let name = function.name().to_string();
    event!(Level::DEBUG, function = %name, "Registering function.");
    if self.functions.write().insert(name.clone(), Arc::new(function)).is_some() {
      event!(Level::WARN, function = %name, "Replaced an existing function registration.");
    }
    self
  }

  pub fn register_class(&self, class: ClassDef) -> &Self {
    let name = class.name().to_string();
    event!(Level::DEBUG, class = %name, "Registering class.");
    if self.classes.write().insert(name.clone(), Arc::new(class)).is_some() {
      event!(Level::WARN, class = %name, "Replaced an existing class registration.");
    }
    self
  }

  pub fn function_names(&self) -> Vec<String> {
    let mut names: Vec<String> = self.functions.read().keys().cloned().collect();
    names.sort_unstable();
    names
  }

  pub fn class_names(&self) -> Vec<String> {
    let mut names: Vec<String> = self.classes.read().keys().cloned().collect();
    names.sort_unstable();
    names
  }
}

impl Introspector for Registry {
  fn function(&self, name: &str) -> Option<Arc<FunctionDef>> {
    self.functions.read().get(name).cloned()
  }

  fn class(&self, name: &str) -> Option<Arc<ClassDef>> {
    self.classes.read().get(name).cloned()
  }
}

impl std::fmt::Debug for Registry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Registry")
      .field("functions", &self.function_names())
      .field("classes", &self.class_names())
      .finish()
  }
}
