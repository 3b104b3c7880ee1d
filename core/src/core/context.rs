// caller/src/core/context.rs

//! Defines `ExecutionContext`, the state shared by every step of a pipeline run.

use crate::core::control::RunState;
use crate::core::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant, SystemTime};

/// Mutable state threaded through all steps of a pipeline.
///
/// Run fields (`state`, `cursor`, `result`, timing) are reset by every
/// `execute`. The scratch map is not: it lives as long as the context, so data
/// seeded before a run or written during one is still there afterwards.
#[derive(Debug, Default)]
pub struct ExecutionContext {
  scratch: HashMap<String, Value>,
  state: RunState,
  cursor: usize,
  total: usize,
  result: Value,
  started_at: Option<SystemTime>,
  ended_at: Option<SystemTime>,
  elapsed: Option<Duration>,
  clock: Option<Instant>,
}

impl ExecutionContext {
  pub fn new() -> Self {
    Self::default()
  }

  // --- Scratch storage ---

  pub fn get(&self, key: &str) -> Option<&Value> {
    self.scratch.get(key)
  }

  /// Returns the stored value, or `default` when the key is absent.
  pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
    self.scratch.get(key).cloned().unwrap_or_else(|| default.into())
  }

  pub fn has(&self, key: &str) -> bool {
    self.scratch.contains_key(key)
  }

  pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
    self.scratch.insert(key.into(), value.into());
    self
  }

  pub fn delete(&mut self, key: &str) -> &mut Self {
    self.scratch.remove(key);
    self
  }

  pub fn scratch(&self) -> &HashMap<String, Value> {
    &self.scratch
  }

  // --- Run control ---

  /// Halts the current run after the calling step returns.
  pub fn stop(&mut self) -> &mut Self {
    self.state = RunState::Stopped;
    self
  }

  pub fn state(&self) -> RunState {
    self.state
  }

  /// 1-based position of the step currently executing, or last executed.
  pub fn cursor(&self) -> usize {
    self.cursor
  }

  /// Number of queued steps.
  pub fn total(&self) -> usize {
    self.total
  }

  /// Return value of the last step that ran.
  pub fn result(&self) -> &Value {
    &self.result
  }

  pub fn started_at(&self) -> Option<SystemTime> {
    self.started_at
  }

  pub fn ended_at(&self) -> Option<SystemTime> {
    self.ended_at
  }

  pub fn elapsed(&self) -> Option<Duration> {
    self.elapsed
  }

  /// Renders `result` for diagnostics.
  pub fn to_text(&self) -> String {
    self.result.to_string()
  }

  // --- Transitions driven by the pipeline ---

  pub(crate) fn set_total(&mut self, total: usize) {
    self.total = total;
  }

  pub(crate) fn begin_run(&mut self) {
    self.started_at = Some(SystemTime::now());
    self.clock = Some(Instant::now());
    self.ended_at = None;
    self.elapsed = None;
    self.result = Value::Null;
    self.cursor = 0;
    self.state = RunState::Running;
  }

  pub(crate) fn advance(&mut self) -> usize {
    self.cursor += 1;
    self.cursor
  }

  /// Stores a step's return value and reports whether the run may continue.
  pub(crate) fn record(&mut self, result: Value) -> bool {
    self.result = result;
    self.state == RunState::Running
  }

  pub(crate) fn finish_run(&mut self) {
    self.ended_at = Some(SystemTime::now());
    self.elapsed = self.clock.map(|start| start.elapsed());
    if self.state == RunState::Running {
      self.state = RunState::Done;
    }
  }
}

impl fmt::Display for ExecutionContext {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.result)
  }
}
