// caller/src/resolve/binder.rs

//! Matches caller-supplied values to a callable's declared parameters.
//!
//! The whole `Values` container is classified once, as ordered or named (see
//! [`Values::binding_mode`]); there is no per-parameter mixing. Context
//! parameters always receive the context handle and are invisible to the
//! matching of everything else.

use crate::core::context_data::Context;
use crate::core::handler::{Argument, Arguments};
use crate::core::step::ParameterDescriptor;
use crate::core::value::Value;
use crate::core::values::{BindingMode, Values};
use crate::error::{CallerError, CallerResult};
use tracing::{event, Level};

pub fn bind(parameters: &[ParameterDescriptor], values: &Values, context: &Context) -> CallerResult<Arguments> {
  let mode = values.binding_mode();
  event!(
    Level::TRACE,
    ?mode,
    num_parameters = parameters.len(),
    num_values = values.len(),
    "Binding arguments."
  );

  let mut arguments = Arguments::with_capacity(parameters.len());
  let mut position = 0;
  for parameter in parameters {
    if parameter.is_context() {
      arguments.push(&parameter.name, Argument::Context(context.clone()));
      continue;
    }

    let supplied = match mode {
      BindingMode::Ordered => values.positional(position),
      BindingMode::Named => values.by_name(&parameter.name),
    };
    position += 1;

    let value = choose(parameter, supplied)?;
    check_type(parameter, &value)?;
    arguments.push(&parameter.name, Argument::Value(value));
  }
  Ok(arguments)
}

/// Supplied value, else the default. A supplied `Null` counts as not supplied.
fn choose(parameter: &ParameterDescriptor, supplied: Option<&Value>) -> CallerResult<Value> {
  match supplied.filter(|v| !v.is_null()) {
    Some(value) => Ok(value.clone()),
    None => parameter.default.clone().ok_or_else(|| {
      event!(Level::DEBUG, parameter = %parameter.name, "Required parameter has no value.");
      CallerError::MissingParameter {
        name: parameter.name.clone(),
      }
    }),
  }
}

fn check_type(parameter: &ParameterDescriptor, value: &Value) -> CallerResult<()> {
  if parameter.accepts.admits(value) {
    return Ok(());
  }
  let actual = value.type_tag().name().to_string();
  event!(Level::DEBUG, parameter = %parameter.name, %actual, "Parameter type mismatch.");
  Err(CallerError::TypeMismatch {
    name: parameter.name.clone(),
    actual,
  })
}
