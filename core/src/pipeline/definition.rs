// caller/src/pipeline/definition.rs

//! Contains the `Pipeline` struct definition and the methods that build and
//! mutate its queue.

use crate::core::context::ExecutionContext;
use crate::core::context_data::Context;
use crate::core::step::{CallableDescriptor, CallableRef};
use crate::error::CallerResult;
use crate::registry::{Introspector, Registry};
use crate::resolve::SignatureExtractor;
use std::sync::Arc;
use tracing::{event, Level};

/// An ordered queue of steps sharing one execution context.
///
/// References are resolved when they are queued, so an invalid reference fails
/// `append`/`prepend` rather than `execute`.
pub struct Pipeline {
  introspector: Arc<dyn Introspector>,
  pub(crate) queue: Vec<CallableDescriptor>,
  pub(crate) context: Context,
}

impl Pipeline {
  /// An empty pipeline backed by an empty registry. Only function values and
  /// objects of classes known to that registry can be queued.
  pub fn new() -> Self {
    Self::with_introspector(Arc::new(Registry::new()))
  }

  pub fn with_introspector(introspector: Arc<dyn Introspector>) -> Self {
    Self {
      introspector,
      queue: Vec::new(),
      context: Context::new(ExecutionContext::new()),
    }
  }

  /// Builds a pipeline whose queue holds `callables` in the given order.
  pub fn from_callables<I, R>(introspector: Arc<dyn Introspector>, callables: I) -> CallerResult<Self>
  where
    I: IntoIterator<Item = R>,
    R: Into<CallableRef>,
  {
    let mut pipeline = Self::with_introspector(introspector);
    pipeline.prepend(callables)?;
    Ok(pipeline)
  }

  /// Queues `callables` after the existing steps.
  ///
  /// Every reference is resolved first. If one fails, the queue is unchanged.
  pub fn append<I, R>(&mut self, callables: I) -> CallerResult<()>
  where
    I: IntoIterator<Item = R>,
    R: Into<CallableRef>,
  {
    let mut resolved = self.resolve_all(callables)?;
    self.queue.append(&mut resolved);
    self.refresh_total();
    Ok(())
  }

  /// Queues `callables`, in the given order, before the existing steps.
  pub fn prepend<I, R>(&mut self, callables: I) -> CallerResult<()>
  where
    I: IntoIterator<Item = R>,
    R: Into<CallableRef>,
  {
    let mut resolved = self.resolve_all(callables)?;
    resolved.append(&mut self.queue);
    self.queue = resolved;
    self.refresh_total();
    Ok(())
  }

  /// Handle to the shared context, for seeding scratch data or inspecting a run.
  pub fn context(&self) -> Context {
    self.context.clone()
  }

  pub fn steps(&self) -> &[CallableDescriptor] {
    &self.queue
  }

  pub fn len(&self) -> usize {
    self.queue.len()
  }

  pub fn is_empty(&self) -> bool {
    self.queue.is_empty()
  }

  fn resolve_all<I, R>(&self, callables: I) -> CallerResult<Vec<CallableDescriptor>>
  where
    I: IntoIterator<Item = R>,
    R: Into<CallableRef>,
  {
    let extractor = SignatureExtractor::new(self.introspector.as_ref());
    callables
      .into_iter()
      .map(|callable| extractor.extract(callable.into()))
      .collect()
  }

  fn refresh_total(&mut self) {
    let total = self.queue.len();
    self.context.write().set_total(total);
    event!(Level::DEBUG, total, "Pipeline queue updated.");
  }
}

impl Default for Pipeline {
  fn default() -> Self {
    Self::new()
  }
}

impl std::fmt::Debug for Pipeline {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let labels: Vec<String> = self.queue.iter().map(CallableDescriptor::label).collect();
    f.debug_struct("Pipeline")
      .field("steps", &labels)
      .field("context", &self.context)
      .finish()
  }
}
