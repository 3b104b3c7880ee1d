// caller/examples/pipeline_stop.rs

use caller::{Arguments, CallerResult, FunctionDef, Pipeline, RunState, Signature, Value, Values};
use tracing::{info, warn};

/// Rejects orders above `limit` by stopping the run before they are charged.
fn validate(limit: i64) -> FunctionDef {
  FunctionDef::anonymous(
    Signature::new().required("amount").context("context"),
    move |args: Arguments| {
      let ctx = args.require_context()?;
      let amount = args.require("amount")?.as_int().unwrap_or(0);
      if amount > limit {
        warn!(amount, limit, "Amount over limit, stopping.");
        ctx.set("rejected", amount);
        ctx.stop();
        return Ok(Value::from("rejected"));
      }
      Ok(Value::from("validated"))
    },
  )
}

fn charge() -> FunctionDef {
  FunctionDef::anonymous(
    Signature::new().required("amount").context("context"),
    |args: Arguments| {
      info!(amount = %args.require("amount")?, "Charging.");
      args.require_context()?.set("charged", args.require("amount")?.clone());
      Ok("charged")
    },
  )
}

fn main() -> CallerResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Pipeline Stop Example ---");

  let mut pipeline = Pipeline::new();
  pipeline.append([validate(100), charge()])?;

  // Under the limit: both steps run.
  let ctx = pipeline.execute(&Values::named([("amount", 40)]), &Values::new())?;
  info!(state = %ctx.state(), result = %ctx.result(), "First run finished.");
  assert_eq!(ctx.state(), RunState::Done);
  assert_eq!(ctx.get("charged"), Some(Value::from(40)));

  // Over the limit: `charge` never runs.
  ctx.delete("charged");
  let ctx = pipeline.execute(&Values::named([("amount", 500)]), &Values::new())?;
  info!(state = %ctx.state(), result = %ctx.result(), "Second run finished.");
  assert_eq!(ctx.state(), RunState::Stopped);
  assert_eq!(ctx.cursor(), 1);
  assert!(!ctx.has("charged"));
  assert_eq!(ctx.get("rejected"), Some(Value::from(500)));

  Ok(())
}
