// caller/src/core/context_data.rs
use crate::core::context::ExecutionContext;
use crate::core::control::RunState;
use crate::core::value::Value;
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt;
use std::sync::Arc;

/// Shared handle to a pipeline's `ExecutionContext`.
///
/// Clones point at the same context. This is what parameters tagged as context
/// receive, and what `Pipeline::execute` returns.
///
/// IMPORTANT: lock guards are blocking. Drop a guard before calling back into
/// anything that may lock the same context.
#[derive(Debug, Clone, Default)]
pub struct Context(Arc<RwLock<ExecutionContext>>);

impl Context {
  pub fn new(data: ExecutionContext) -> Self {
    Context(Arc::new(RwLock::new(data)))
  }

  /// Acquires a read lock.
  pub fn read(&self) -> RwLockReadGuard<'_, ExecutionContext> {
    self.0.read()
  }

  /// Acquires a write lock.
  pub fn write(&self) -> RwLockWriteGuard<'_, ExecutionContext> {
    self.0.write()
  }

  pub fn try_read(&self) -> Option<RwLockReadGuard<'_, ExecutionContext>> {
    self.0.try_read()
  }

  pub fn try_write(&self) -> Option<RwLockWriteGuard<'_, ExecutionContext>> {
    self.0.try_write()
  }

  // Example: context.map_read(|data| data.result())
  pub fn map_read<F, U: ?Sized>(&self, f: F) -> MappedRwLockReadGuard<'_, U>
  where
    F: FnOnce(&ExecutionContext) -> &U,
  {
    RwLockReadGuard::map(self.read(), f)
  }

  pub fn ptr_eq(&self, other: &Context) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }

  // --- Shorthands that take the lock for a single operation ---

  pub fn get(&self, key: &str) -> Option<Value> {
    self.read().get(key).cloned()
  }

  pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
    self.read().get_or(key, default)
  }

  pub fn has(&self, key: &str) -> bool {
    self.read().has(key)
  }

  pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> &Self {
    self.write().set(key, value);
    self
  }

  pub fn delete(&self, key: &str) -> &Self {
    self.write().delete(key);
    self
  }

  pub fn stop(&self) -> &Self {
    self.write().stop();
    self
  }

  pub fn state(&self) -> RunState {
    self.read().state()
  }

  pub fn cursor(&self) -> usize {
    self.read().cursor()
  }

  pub fn total(&self) -> usize {
    self.read().total()
  }

  pub fn result(&self) -> Value {
    self.read().result().clone()
  }

  pub fn to_text(&self) -> String {
    self.read().to_text()
  }
}

impl fmt::Display for Context {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", *self.read())
  }
}
