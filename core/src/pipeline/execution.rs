// caller/src/pipeline/execution.rs

//! Contains `Pipeline::execute()`, the run loop over the queued steps.

use crate::core::context_data::Context;
use crate::core::values::Values;
use crate::error::CallerResult;
use crate::pipeline::definition::Pipeline;
use crate::resolve::dispatcher;
use tracing::{event, instrument, span, Level};

impl Pipeline {
  /// Runs every queued step in order against the shared context.
  ///
  /// `values` feed each step's parameters; `constructor_values` feed the
  /// constructors of classes that must be instantiated for a step. The same
  /// two sources are offered to every step.
  ///
  /// The run stops early when a step calls `stop()` on the context. Errors are
  /// fatal to the run and are returned as-is; scratch writes made by earlier
  /// steps are kept.
  #[instrument(
        name = "Pipeline::execute",
        skip_all,
        fields(
            num_steps = self.queue.len(),
            binding_mode = ?values.binding_mode(),
        ),
        err(Display)
    )]
  pub fn execute(&mut self, values: &Values, constructor_values: &Values) -> CallerResult<Context> {
    event!(Level::DEBUG, "Pipeline execution starting.");
    self.context.write().begin_run();

    for descriptor in &self.queue {
      let cursor = self.context.write().advance();
      let step_name = descriptor.label();
      let step_span = span!(Level::INFO, "pipeline_step_execution", step_name = %step_name, cursor);
      let _step_span_guard = step_span.enter();
      event!(Level::DEBUG, "Processing step.");

      // No lock is held here: the step may lock the context itself.
      let result = match dispatcher::invoke(descriptor, values, constructor_values, &self.context) {
        Ok(result) => result,
        Err(e) => {
          event!(Level::ERROR, error = %e, "Step failed.");
          return Err(e);
        }
      };

      if !self.context.write().record(result) {
        event!(Level::INFO, "Pipeline stopped by a step.");
        break;
      }
      event!(Level::DEBUG, "Step processing finished successfully.");
    }

    let mut ctx = self.context.write();
    ctx.finish_run();
    event!(
      Level::DEBUG,
      state = %ctx.state(),
      cursor = ctx.cursor(),
      elapsed_us = ctx.elapsed().map_or(0, |d| d.as_micros() as u64),
      "Pipeline execution finished."
    );
    drop(ctx);
    Ok(self.context.clone())
  }

  /// `execute` with no values and no constructor values.
  pub fn run(&mut self) -> CallerResult<Context> {
    self.execute(&Values::new(), &Values::new())
  }
}
