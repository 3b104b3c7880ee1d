// caller/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Reasons a callable reference cannot be turned into a queued step.
///
/// Messages name the offending function, class or method so they can be shown
/// directly to the developer wiring the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCallable {
  #[error("Invalid callback type \"{type_name}\"")]
  InvalidType { type_name: String },

  #[error("Function \"{name}()\" does not exist")]
  FunctionNotFound { name: String },

  #[error("Class \"{class}\" does not exist")]
  ClassNotFound { class: String },

  #[error("Method \"{class}::{method}()\" does not exist")]
  MethodNotFound { class: String, method: String },

  #[error("Method \"{class}::{method}()\" is not public")]
  MethodNotPublic { class: String, method: String },

  #[error("Parameter ${name} is declared more than once by \"{callable}\"")]
  DuplicateParameter { callable: String, name: String },
}

#[derive(Debug, Error)]
pub enum CallerError {
  /// Raised while a reference is being added to the queue, never during `execute`.
  #[error(transparent)]
  InvalidCallable(#[from] InvalidCallable),

  #[error("Failed to construct \"{class}\". Source: {source}")]
  ConstructionFailed {
    class: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Missing required parameter ${name}")]
  MissingParameter { name: String },

  #[error("Invalid parameter ${name} type \"{actual}\"")]
  TypeMismatch { name: String, actual: String },

  #[error("Step '{step}' failed. Source: {source}")]
  StepFailed {
    step: String,
    #[source]
    source: AnyhowError,
  },
}

impl CallerError {
  /// Name of the parameter a binding error refers to, if any.
  pub fn parameter(&self) -> Option<&str> {
    match self {
      CallerError::MissingParameter { name } | CallerError::TypeMismatch { name, .. } => Some(name),
      _ => None,
    }
  }
}

pub type CallerResult<T, E = CallerError> = std::result::Result<T, E>;
