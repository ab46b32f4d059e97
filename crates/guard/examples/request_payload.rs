//! Validates a few signup payloads with engine-wide trimming, per-field
//! coercion and defaults.
//!
//! ```sh
//! RUST_LOG=nebula_guard=trace cargo run -p nebula-guard --example request_payload
//! ```

use nebula_guard::adapter::Middleware;
use nebula_guard::prelude::*;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

fn trim_strings(value: Value, _key: &str, _root: &Value) -> Value {
    match value {
        Value::String(text) => Value::String(text.trim().to_owned()),
        other => other,
    }
}

fn parse_age(value: Value, _key: &str, _root: &Value) -> Result<Value, BoxError> {
    match value {
        Value::String(text) => Ok(json!(text.parse::<i64>()?)),
        other => Ok(other),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let engine = Engine::builder()
        .transform_before(transform_fn(trim_strings))
        .on_fail(hook_fn(|value: Option<&Value>, key: &str, _: &Value| {
            tracing::info!(key, ?value, "rejected");
        }))
        .build();

    let fields = vec![
        Field::new(
            "user.email",
            string()
                .with_message("Email must be text")
                .matches(Regex::new(r"^[^@\s]+@[^@\s]+\.[a-z]{2,}$")?)
                .with_message("Invalid email"),
        ),
        Field::new(
            "user.age",
            integer()
                .with_message("Age must be a whole number")
                .min(13)
                .with_message("Too young"),
        )
        .transform_before(transform_fn(parse_age)),
        Field::new("user.tags", array().of().strings().max(5).optional().default(json!([]))),
        Field::new("terms", boolean().is_true().with_message("Terms must be accepted")),
    ];

    let payloads = [
        json!({"user": {"email": "  ann@example.com ", "age": "41"}, "terms": true}),
        json!({"user": {"email": "ann@", "age": 41}, "terms": true}),
        json!({"user": {"email": "bob@example.com", "age": 9}, "terms": true}),
        json!({"user": {"email": "cy@example.com", "age": 30}}),
    ];

    for mut payload in payloads.clone() {
        let verdict = engine.validate(&mut payload, &fields).await?;
        println!("{} -> {payload}", serde_json::to_string(&verdict)?);
    }

    let guard = Middleware::new(engine, fields);
    for mut payload in payloads {
        let outcome = guard.handle(&mut payload, |outcome| outcome).await;
        println!("middleware: {outcome:?}");
    }

    Ok(())
}
