// tests/error_handling_tests.rs
mod common;
use caller::{
  Arguments, CallableRef, CallerError, ClassDef, FunctionDef, InvalidCallable, Pipeline, Registry, RunState,
  Signature, TypeTag, Value, Values,
};
use common::*;
use std::sync::Arc;

fn queue_error(callable: impl Into<CallableRef>) -> CallerError {
  Pipeline::from_callables(fixture_registry(), [callable.into()]).unwrap_err()
}

fn execute_error(callable: impl Into<CallableRef>, values: Values, constructor_values: Values) -> CallerError {
  let mut pipeline = Pipeline::from_callables(fixture_registry(), [callable.into()]).unwrap();
  pipeline.execute(&values, &constructor_values).unwrap_err()
}

#[test]
fn test_unknown_function_name() {
  setup_tracing();
  let err = queue_error("notFoundFunction");
  assert_eq!(err.to_string(), "Function \"notFoundFunction()\" does not exist");
  assert!(matches!(
    err,
    CallerError::InvalidCallable(InvalidCallable::FunctionNotFound { ref name }) if name == "notFoundFunction"
  ));
}

#[test]
fn test_unknown_class_and_method() {
  setup_tracing();
  let err = queue_error("NotFoundClass::callback");
  assert_eq!(err.to_string(), "Class \"NotFoundClass\" does not exist");

  let err = queue_error(("ClassMethod", "notFoundMethod"));
  assert_eq!(err.to_string(), "Method \"ClassMethod::notFoundMethod()\" does not exist");

  // Instances without an `invoke` method are not invocable.
  let err = queue_error(class_method().wrap(()));
  assert_eq!(err.to_string(), "Method \"ClassMethod::invoke()\" does not exist");
}

#[test]
fn test_non_public_methods_are_rejected() {
  setup_tracing();
  for class in [CLASS_METHOD, CLASS_STATIC_METHOD] {
    for method in ["callbackPrivate", "callbackProtected"] {
      let err = queue_error(format!("{}::{}", class, method));
      assert_eq!(err.to_string(), format!("Method \"{}::{}()\" is not public", class, method));
      match err {
        CallerError::InvalidCallable(inner) => assert_eq!(
          inner,
          InvalidCallable::MethodNotPublic {
            class: class.to_string(),
            method: method.to_string(),
          }
        ),
        other => panic!("Expected CallerError::InvalidCallable, got {:?}", other),
      }
    }
  }
}

#[test]
fn test_invalid_dynamic_callable_shapes() {
  setup_tracing();
  let err = CallableRef::try_from(Value::from(111)).unwrap_err();
  assert_eq!(err.to_string(), "Invalid callback type \"integer\"");

  let err = CallableRef::try_from(Value::from(vec!["ClassMethod"])).unwrap_err();
  assert_eq!(err.to_string(), "Invalid callback type \"sequence\"");

  let pair = CallableRef::try_from(Value::from(vec!["ClassStaticMethod", "callback"])).unwrap();
  let mut pipeline = Pipeline::from_callables(fixture_registry(), [pair]).unwrap();
  let ctx = pipeline.execute(&Values::ordered([1, 2]), &Values::new()).unwrap();
  assert_eq!(ctx.result(), Value::from("1:2:3"));
}

#[test]
fn test_missing_required_parameter() {
  setup_tracing();
  let err = execute_error("namedFunction", Values::new(), Values::new());
  assert_eq!(err.to_string(), "Missing required parameter $a");
  assert_eq!(err.parameter(), Some("a"));

  let err = execute_error("namedFunction", Values::named([("a", 1)]), Values::new());
  assert_eq!(err.to_string(), "Missing required parameter $b");

  let err = execute_error("ClassMethodWithConstructor::callback", Values::ordered([1, 2]), Values::new());
  assert_eq!(err.to_string(), "Missing required parameter $d");
}

#[test]
fn test_null_for_required_parameter_is_missing() {
  setup_tracing();
  let values = Values::ordered([Value::Null, Value::from(2)]);
  let err = execute_error("namedFunction", values, Values::new());
  assert!(matches!(err, CallerError::MissingParameter { ref name } if name == "a"));
}

#[test]
fn test_parameter_type_mismatch() {
  setup_tracing();
  let err = execute_error("ClassMethod::callbackWithTypedParameters", Values::ordered([111]), Values::new());
  assert_eq!(err.to_string(), "Invalid parameter $a type \"integer\"");
  assert_eq!(err.parameter(), Some("a"));

  let err = execute_error("typedFunction", Values::named([("a", "text")]), Values::new());
  assert!(matches!(err, CallerError::TypeMismatch { ref actual, .. } if actual == "string"));

  let list = Values::ordered([Value::from(vec![1, 2])]);
  let mut pipeline = Pipeline::from_callables(fixture_registry(), ["typedFunction"]).unwrap();
  assert!(pipeline.execute(&list, &Values::new()).is_ok());
}

#[test]
fn test_object_parameter_accepts_subclasses_by_interface() {
  setup_tracing();
  let typed = FunctionDef::anonymous(
    Signature::new().typed("clock", [TypeTag::Class("Clock".to_string())]),
    |args: Arguments| Ok(args.require("clock")?.clone()),
  );
  let mut pipeline = Pipeline::from_callables(fixture_registry(), [typed]).unwrap();

  let system_clock = ClassDef::new("SystemClock").implements("Clock").wrap(());
  let ctx = pipeline
    .execute(&Values::ordered([system_clock.clone()]), &Values::new())
    .unwrap();
  assert_eq!(ctx.result(), Value::from(system_clock));

  let other = ClassDef::new("Stopwatch").wrap(());
  let err = pipeline.execute(&Values::ordered([other]), &Values::new()).unwrap_err();
  assert_eq!(err.to_string(), "Invalid parameter $clock type \"Stopwatch\"");
}

#[test]
fn test_constructor_failure() {
  setup_tracing();
  let err = execute_error("FailingClass::callback", Values::new(), Values::new());
  match err {
    CallerError::ConstructionFailed { ref class, ref source } => {
      assert_eq!(class, FAILING_CLASS);
      assert_eq!(source.to_string(), "connection refused");
    }
    other => panic!("Expected CallerError::ConstructionFailed, got {:?}", other),
  }
}

#[test]
fn test_step_failure_keeps_earlier_writes_and_skips_later_steps() {
  setup_tracing();
  let failing = FunctionDef::new("explode", Signature::new(), |_args: Arguments| -> anyhow::Result<Value> {
    Err(anyhow::anyhow!("boom"))
  });
  let steps: Vec<CallableRef> = vec![
    recording_step("a", false).into(),
    failing.into(),
    recording_step("c", false).into(),
  ];
  let mut pipeline = Pipeline::from_callables(fixture_registry(), steps).unwrap();
  let err = pipeline
    .execute(&Values::named([("a", 1), ("c", 3)]), &Values::new())
    .unwrap_err();

  assert_eq!(err.to_string(), "Step 'explode' failed. Source: boom");
  let ctx = pipeline.context();
  assert!(ctx.has("a"));
  assert!(!ctx.has("c"));
  assert_eq!(ctx.cursor(), 2);
  assert_eq!(ctx.state(), RunState::Running);
}

#[test]
fn test_missing_context_in_body_surfaces_as_step_failure() {
  setup_tracing();
  let careless = FunctionDef::anonymous(Signature::new(), |args: Arguments| {
    args.require_context()?.set("never", true);
    Ok(Value::Null)
  });
  let err = execute_error(careless, Values::new(), Values::new());
  assert!(matches!(err, CallerError::StepFailed { ref step, .. } if step == "{closure}"));
}

#[test]
fn test_duplicate_parameter_names_are_rejected() {
  setup_tracing();
  let repeated = FunctionDef::anonymous(Signature::new().required("a").optional("a", 1), |args: Arguments| {
    Ok(joined(&args))
  });
  let err = queue_error(repeated);
  assert_eq!(err.to_string(), "Parameter $a is declared more than once by \"{closure}\"");
  match err {
    CallerError::InvalidCallable(inner) => assert_eq!(
      inner,
      InvalidCallable::DuplicateParameter {
        callable: "{closure}".to_string(),
        name: "a".to_string(),
      }
    ),
    other => panic!("Expected CallerError::InvalidCallable, got {:?}", other),
  }

  // Constructor parameters are checked on their own list.
  let registry = Registry::new();
  registry.register_class(
    ClassDef::new("Repeated")
      .constructor(Signature::new().required("d").required("d"), |_args: Arguments| Ok(()))
      .method("callback", Signature::new().required("d"), |_: &(), _args: Arguments| Ok(true)),
  );
  let mut pipeline = Pipeline::with_introspector(Arc::new(registry));
  let err = pipeline.append(["Repeated::callback"]).unwrap_err();
  assert!(matches!(
    err,
    CallerError::InvalidCallable(InvalidCallable::DuplicateParameter { ref callable, ref name })
      if callable == "Repeated::callback" && name == "d"
  ));
  assert!(pipeline.is_empty());
}

#[test]
fn test_unbound_argument_lookup_surfaces_as_step_failure() {
  setup_tracing();
  let lookup = FunctionDef::new("lookup", Signature::new().required("a"), |args: Arguments| {
    Ok(args.require("missing")?.clone())
  });
  let err = execute_error(lookup, Values::ordered([1]), Values::new());
  assert_eq!(
    err.to_string(),
    "Step 'lookup' failed. Source: no value bound to parameter `missing`"
  );
  assert!(matches!(err, CallerError::StepFailed { ref step, .. } if step == "lookup"));
}
