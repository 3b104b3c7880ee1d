// caller/examples/registry_basic.rs

use caller::{Arguments, CallableRef, CallerResult, ClassDef, Pipeline, Registry, Signature, Value, Values, INVOKE};
use std::sync::Arc;
use tracing::info;

#[derive(Debug)]
struct Tax {
  rate: f64,
}

#[derive(Debug)]
struct Formatter {
  currency: String,
}

fn main() -> CallerResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Registry Example ---");

  let registry = Registry::new();
  registry
    .register_class(
      // Built per call from constructor values.
      ClassDef::new("Tax")
        .constructor(Signature::new().optional("rate", 0.2), |args: Arguments| {
          Ok(Tax {
            rate: args.require("rate")?.as_float().unwrap_or(0.0),
          })
        })
        .method("apply", Signature::new().required("net"), |tax: &Tax, args: Arguments| {
          Ok(args.require("net")?.as_float().unwrap_or(0.0) * (1.0 + tax.rate))
        }),
    )
    .register_class(
      // Static helper, no instance needed.
      ClassDef::new("Rounding").static_method(
        "cents",
        Signature::new().context("context"),
        |args: Arguments| {
          let gross = args.require_context()?.result().as_float().unwrap_or(0.0);
          Ok((gross * 100.0).round() / 100.0)
        },
      ),
    )
    .register_class(ClassDef::new("Formatter").method(
      INVOKE,
      Signature::new().context("context"),
      |fmt: &Formatter, args: Arguments| Ok(format!("{} {}", args.require_context()?, fmt.currency)),
    ));
  info!(classes = ?registry.class_names(), "Registered classes.");

  // An existing instance is passed as an invocable object.
  let formatter = Formatter {
    currency: "EUR".to_string(),
  };
  let formatter = ClassDef::new("Formatter").wrap(formatter);

  let steps: Vec<CallableRef> = vec!["Tax::apply".into(), ("Rounding", "cents").into(), formatter.into()];
  let mut pipeline = Pipeline::from_callables(Arc::new(registry), steps)?;
  for step in pipeline.steps() {
    info!(step = %step.label(), kind = step.target.kind(), "Queued step.");
  }

  let ctx = pipeline.execute(&Values::named([("net", 10.0)]), &Values::named([("rate", 0.255)]))?;
  info!(result = %ctx.result(), "Finished.");
  assert_eq!(ctx.result(), Value::from("12.55 EUR"));

  // Constructor values are optional here: `rate` falls back to 0.2.
  let ctx = pipeline.execute(&Values::named([("net", 10.0)]), &Values::new())?;
  assert_eq!(ctx.result(), Value::from("12 EUR"));

  Ok(())
}
