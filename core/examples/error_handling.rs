// caller/examples/error_handling.rs

use caller::{Arguments, CallerError, ClassDef, FunctionDef, Pipeline, Registry, Signature, TypeTag, Values};
use std::sync::Arc;
use tracing::{error, info};

// 1. Define a custom application error type
#[derive(Debug, thiserror::Error)]
enum ExampleAppError {
  #[error("Order {0} could not be processed")]
  OrderRejected(String),

  #[error("Caller error during pipeline execution: {0}")]
  Caller(#[from] CallerError), // Allows CallerError to be converted into ExampleAppError
}

fn registry() -> Arc<Registry> {
  let registry = Registry::new();
  registry
    .register_function(FunctionDef::new(
      "total",
      Signature::new().typed("items", [TypeTag::Sequence]),
      |args: Arguments| {
        let sum: i64 = args.require("items")?
          .as_sequence()
          .unwrap_or_default()
          .iter()
          .filter_map(|item| item.as_int())
          .sum();
        Ok(sum)
      },
    ))
    .register_function(FunctionDef::new(
      "fail",
      Signature::new().required("reason"),
      |args: Arguments| -> anyhow::Result<()> { Err(anyhow::anyhow!("{}", args.require("reason")?)) },
    ))
    .register_class(
      ClassDef::new("Gateway")
        .constructor(Signature::new().required("endpoint"), |args: Arguments| {
          anyhow::ensure!(!args.require("endpoint")?.to_string().is_empty(), "empty endpoint");
          Ok(args.require("endpoint")?.to_string())
        })
        .method("ping", Signature::new(), |endpoint: &String, _args: Arguments| {
          Ok(format!("pong from {}", endpoint))
        })
        .with_method(
          caller::MethodDef::instance("reset", Signature::new(), |_: &String, _args: Arguments| Ok(true))
            .visibility(caller::Visibility::Private),
        ),
    );
  Arc::new(registry)
}

fn process_order(order: &str) -> Result<(), ExampleAppError> {
  let mut pipeline = Pipeline::from_callables(registry(), ["total"])?;
  let ctx = pipeline.execute(&Values::ordered([vec![3, 4]]), &Values::new())?;
  if ctx.result().as_int() != Some(7) {
    return Err(ExampleAppError::OrderRejected(order.to_string()));
  }
  Ok(())
}

fn report(scenario: &str, outcome: Result<caller::Context, CallerError>) {
  match outcome {
    Ok(ctx) => info!(scenario, result = %ctx.result(), "Succeeded."),
    Err(e) => error!(scenario, error = %e, "Failed."),
  }
}

fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Error Handling Example ---");

  // Scenario 1: application errors wrapping CallerError
  match process_order("A-1") {
    Ok(()) => info!("Order A-1 processed."),
    Err(e) => error!(error = %e, "Order A-1 failed."),
  }

  // Scenario 2: resolution errors surface when a step is queued
  for reference in ["missingFunction", "Missing::ping", "Gateway::missing", "Gateway::reset"] {
    match Pipeline::from_callables(registry(), [reference]) {
      Ok(_) => info!(reference, "Queued."),
      Err(e) => error!(reference, error = %e, "Could not queue."),
    }
  }

  // Scenario 3: binding errors surface from execute
  if let Ok(mut pipeline) = Pipeline::from_callables(registry(), ["total"]) {
    report("missing parameter", pipeline.execute(&Values::new(), &Values::new()));
    report("type mismatch", pipeline.execute(&Values::ordered([42]), &Values::new()));
  }

  // Scenario 4: failures inside constructors and step bodies
  if let Ok(mut pipeline) = Pipeline::from_callables(registry(), ["Gateway::ping"]) {
    report("constructor", pipeline.execute(&Values::new(), &Values::ordered([""])));
    report("constructor ok", pipeline.execute(&Values::new(), &Values::ordered(["mq://local"])));
  }
  if let Ok(mut pipeline) = Pipeline::from_callables(registry(), ["fail"]) {
    let outcome = pipeline.execute(&Values::named([("reason", "disk full")]), &Values::new());
    if let Err(CallerError::StepFailed { step, source }) = &outcome {
      error!(step = %step, source = %source, "Step body failed.");
    }
    report("step body", outcome);
  }
}
