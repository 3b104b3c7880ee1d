// caller/src/core/control.rs

//! Defines the run state of an execution context.

use std::fmt;

/// Lifecycle of one pipeline run.
///
/// `Pending -> Running -> {Stopped, Done}`. Both terminal states are per run:
/// the next `execute` resets the context to `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
  /// The pipeline has never been executed.
  #[default]
  Pending,
  /// A run is in progress.
  Running,
  /// A step called `stop()`. No later step ran.
  Stopped,
  /// Every queued step completed.
  Done,
}

impl RunState {
  pub fn is_terminal(self) -> bool {
    matches!(self, RunState::Stopped | RunState::Done)
  }
}

impl fmt::Display for RunState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      RunState::Pending => "pending",
      RunState::Running => "running",
      RunState::Stopped => "stopped",
      RunState::Done => "done",
    };
    f.write_str(name)
  }
}
