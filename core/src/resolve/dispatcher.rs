// caller/src/resolve/dispatcher.rs

//! Invokes a resolved step.

use crate::core::context_data::Context;
use crate::core::step::{CallableDescriptor, Target};
use crate::core::value::Value;
use crate::core::values::Values;
use crate::error::{CallerError, CallerResult};
use crate::resolve::binder::bind;
use tracing::{event, Level};

/// Binds and calls one step.
///
/// For `InstanceMethodNeedsConstruction`, constructor arguments are bound from
/// `constructor_values` and a new instance is built for this call only.
pub fn invoke(
  descriptor: &CallableDescriptor,
  values: &Values,
  constructor_values: &Values,
  context: &Context,
) -> CallerResult<Value> {
  let outcome = match &descriptor.target {
    Target::Plain(function) => {
      let args = bind(&descriptor.parameters, values, context)?;
      function.call(args)
    }
    Target::StaticMethod { method, .. } => {
      let args = bind(&descriptor.parameters, values, context)?;
      method.call(None, args)
    }
    Target::InstanceMethod { instance, method } => {
      let args = bind(&descriptor.parameters, values, context)?;
      method.call(Some(instance), args)
    }
    Target::InstanceMethodNeedsConstruction { class, method } => {
      let constructor_parameters = descriptor.constructor_parameters.as_deref().unwrap_or_default();
      let constructor_args = bind(constructor_parameters, constructor_values, context)?;
      let instance = class.instantiate(constructor_args).map_err(|source| {
        event!(Level::ERROR, class = %class.name(), error = %source, "Instance construction failed.");
        CallerError::ConstructionFailed {
          class: class.name().to_string(),
          source,
        }
      })?;
      event!(Level::DEBUG, class = %class.name(), "Constructed owner instance.");

      let args = bind(&descriptor.parameters, values, context)?;
      method.call(Some(&instance), args)
    }
  };

  outcome.map_err(|source| CallerError::StepFailed {
    step: descriptor.label(),
    source,
  })
}
