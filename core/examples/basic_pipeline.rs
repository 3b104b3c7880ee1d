// caller/examples/basic_pipeline.rs

use caller::{Arguments, CallableRef, CallerError, FunctionDef, Pipeline, Registry, RunState, Signature, Value, Values};
use std::sync::Arc;
use tracing::info;

fn main() -> Result<(), CallerError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Pipeline Example ---");

  // 1. Describe and register a named function: greet(name, punctuation = "!")
  let registry = Registry::new();
  registry.register_function(FunctionDef::new(
    "greet",
    Signature::new().required("name").optional("punctuation", "!"),
    |args: Arguments| Ok(format!("Hello, {}{}", args.require("name")?, args.require("punctuation")?)),
  ));

  // 2. An anonymous step that reads the previous result through the context
  let shout = FunctionDef::anonymous(Signature::new().context("context"), |args: Arguments| {
    let ctx = args.require_context()?;
    let upper = ctx.to_text().to_uppercase();
    ctx.set("shouted", true);
    Ok(upper)
  });

  // 3. Build the pipeline: `greet` runs first, then `shout`
  let steps: Vec<CallableRef> = vec!["greet".into(), shout.into()];
  let mut pipeline = Pipeline::from_callables(Arc::new(registry), steps)?;

  // 4. Run it with positional values
  info!("Starting pipeline execution...");
  let ctx = pipeline.execute(&Values::ordered(["world"]), &Values::new())?;

  // 5. Inspect the results
  match ctx.state() {
    RunState::Done => info!("Pipeline completed successfully!"),
    RunState::Stopped => info!("Pipeline was stopped early."),
    other => info!("Pipeline ended in state {}", other),
  }
  info!("Result: {}", ctx.result());

  assert_eq!(ctx.result(), Value::from("HELLO, WORLD!"));
  assert_eq!(ctx.get("shouted"), Some(Value::from(true)));
  assert_eq!(ctx.cursor(), 2);

  Ok(())
}
