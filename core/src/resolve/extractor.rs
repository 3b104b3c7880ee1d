// caller/src/resolve/extractor.rs

//! Turns a `CallableRef` into a `CallableDescriptor`.

use crate::core::signature::{Parameter, Signature};
use crate::core::step::{Accepts, CallableDescriptor, CallableRef, Owner, ParameterDescriptor, Target};
use crate::core::value::TypeTag;
use crate::error::{CallerResult, InvalidCallable};
use crate::registry::{ClassDef, FunctionDef, Introspector, INVOKE};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// Name that marks an untyped parameter as the context slot.
pub const CONTEXT_PARAMETER: &str = "context";

/// Resolves callable references against an [`Introspector`].
pub struct SignatureExtractor<'a> {
  introspector: &'a dyn Introspector,
}

/// What a reference normalizes to before its signature is read.
enum Resolved {
  Function(Arc<FunctionDef>),
  Method(Owner, String),
}

impl<'a> SignatureExtractor<'a> {
  pub fn new(introspector: &'a dyn Introspector) -> Self {
    Self { introspector }
  }

  #[instrument(name = "SignatureExtractor::extract", skip_all, err(Display))]
  pub fn extract(&self, callable: CallableRef) -> CallerResult<CallableDescriptor> {
    let descriptor = match self.normalize(callable)? {
      Resolved::Function(function) => CallableDescriptor {
        parameters: describe(function.signature()),
        target: Target::Plain(function),
        constructor_parameters: None,
      },
      Resolved::Method(owner, method) => self.resolve_method(owner, &method)?,
    };
    ensure_unique_names(&descriptor.label(), &descriptor.parameters)?;
    if let Some(constructor_parameters) = &descriptor.constructor_parameters {
      ensure_unique_names(&descriptor.label(), constructor_parameters)?;
    }
    event!(
      Level::DEBUG,
      step = %descriptor.label(),
      kind = descriptor.target.kind(),
      num_parameters = descriptor.parameters.len(),
      "Callable resolved."
    );
    Ok(descriptor)
  }

  fn normalize(&self, callable: CallableRef) -> CallerResult<Resolved> {
    let resolved = match callable {
      CallableRef::Function(function) => Resolved::Function(function),
      CallableRef::Invocable(obj) => Resolved::Method(Owner::Instance(obj), INVOKE.to_string()),
      CallableRef::Method(owner, method) => Resolved::Method(owner, method),
      CallableRef::Name(name) => {
        if let Some((class, method)) = name.split_once("::") {
          Resolved::Method(Owner::Class(class.to_string()), method.to_string())
        } else if let Some(function) = self.introspector.function(&name) {
          Resolved::Function(function)
        } else if self.introspector.class_exists(&name) {
          Resolved::Method(Owner::Class(name), INVOKE.to_string())
        } else {
          return Err(InvalidCallable::FunctionNotFound { name }.into());
        }
      }
    };
    Ok(resolved)
  }

  fn resolve_method(&self, owner: Owner, method_name: &str) -> CallerResult<CallableDescriptor> {
    // An object built from a definition answers for itself; only names go to the introspector.
    let (class_name, known) = match &owner {
      Owner::Class(name) => (name.clone(), None),
      Owner::Instance(obj) => (obj.class().to_string(), obj.definition().cloned()),
    };
    let class: Arc<ClassDef> = known
      .or_else(|| self.introspector.class(&class_name))
      .ok_or_else(|| InvalidCallable::ClassNotFound {
        class: class_name.clone(),
      })?;
    let method = class
      .method_def(method_name)
      .cloned()
      .ok_or_else(|| InvalidCallable::MethodNotFound {
        class: class_name.clone(),
        method: method_name.to_string(),
      })?;
    if !method.is_public() {
      return Err(
        InvalidCallable::MethodNotPublic {
          class: class_name,
          method: method_name.to_string(),
        }
        .into(),
      );
    }

    let parameters = describe(method.signature());
    let descriptor = if method.is_static() {
      CallableDescriptor {
        target: Target::StaticMethod { class, method },
        parameters,
        constructor_parameters: None,
      }
    } else {
      match owner {
        Owner::Instance(instance) => CallableDescriptor {
          target: Target::InstanceMethod { instance, method },
          parameters,
          constructor_parameters: None,
        },
        Owner::Class(_) => CallableDescriptor {
          constructor_parameters: Some(describe(&class.constructor_signature())),
          target: Target::InstanceMethodNeedsConstruction { class, method },
          parameters,
        },
      }
    };
    Ok(descriptor)
  }
}

/// Parameter names are unique within one parameter list.
fn ensure_unique_names(callable: &str, parameters: &[ParameterDescriptor]) -> CallerResult<()> {
  let mut seen = HashSet::with_capacity(parameters.len());
  match parameters.iter().find(|p| !seen.insert(p.name.as_str())) {
    Some(duplicate) => Err(
      InvalidCallable::DuplicateParameter {
        callable: callable.to_string(),
        name: duplicate.name.clone(),
      }
      .into(),
    ),
    None => Ok(()),
  }
}

/// Normalizes a declared signature into parameter descriptors.
pub fn describe(signature: &Signature) -> Vec<ParameterDescriptor> {
  signature.parameters().iter().map(describe_parameter).collect()
}

fn describe_parameter(parameter: &Parameter) -> ParameterDescriptor {
  let untyped = parameter.types.is_empty() || parameter.types.contains(&TypeTag::Mixed);
  let accepts = if parameter.types.contains(&TypeTag::Context) || (untyped && parameter.name == CONTEXT_PARAMETER) {
    Accepts::Context
  } else if untyped {
    Accepts::Any
  } else {
    Accepts::OneOf(parameter.types.clone())
  };
  ParameterDescriptor {
    name: parameter.name.clone(),
    accepts,
    default: parameter.default.clone(),
  }
}
