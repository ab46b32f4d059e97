//! Transform chaining and write-back.

use std::sync::Arc;

use nebula_guard::prelude::*;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn append(suffix: &'static str) -> impl Transform + use<> {
    transform_fn(move |value: Value, _: &str, _: &Value| {
        json!(format!("{}{suffix}", value.as_str().unwrap_or_default()))
    })
}

#[tokio::test]
async fn global_transforms_run_before_field_transforms() {
    let observed = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&observed);

    let engine = Engine::builder()
        .transform_before(append("1"))
        .transform_before(append("2"))
        .build();
    let fields = [Field::new(
        "code",
        string().custom(move |value: &Value, _: &str, _: &Value| {
            *slot.lock() = Some(value.clone());
            true
        }),
    )
    .transform_before(append("3"))];

    let mut root = json!({"code": "x"});
    engine.validate(&mut root, &fields).await.unwrap();

    assert_eq!(*observed.lock(), Some(json!("x123")));
    assert_eq!(root, json!({"code": "x123"}));
}

#[tokio::test]
async fn each_transform_sees_previous_write_in_root() {
    let engine = Engine::builder()
        .transform_before(append("-a"))
        .transform_before(transform_fn(|value: Value, key: &str, root: &Value| {
            assert_eq!(root[key], value);
            value
        }))
        .build();

    let fields = [Field::new("s", string())];
    let mut root = json!({"s": "v"});
    engine.validate(&mut root, &fields).await.unwrap();
    assert_eq!(root["s"], json!("v-a"));
}

#[tokio::test]
async fn after_transforms_run_only_on_pass() {
    let fields = [Field::new("email", string().min(3))
        .transform_after(transform_fn(|value: Value, _: &str, _: &Value| {
            json!(value.as_str().unwrap_or_default().to_lowercase())
        }))];
    let engine = Engine::new();

    let mut ok = json!({"email": "Ann@Example.COM"});
    assert!(engine.validate(&mut ok, &fields).await.unwrap().is_pass());
    assert_eq!(ok["email"], json!("ann@example.com"));

    let mut short = json!({"email": "AB"});
    assert!(engine.validate(&mut short, &fields).await.unwrap().is_fail());
    assert_eq!(short["email"], json!("AB"));
}

#[tokio::test]
async fn coercion_before_check() {
    let to_number = transform_fn(|value: Value, _: &str, _: &Value| -> Result<Value, BoxError> {
        match value {
            Value::String(text) => Ok(json!(text.trim().parse::<i64>()?)),
            other => Ok(other),
        }
    });
    let fields = [Field::new("page", integer().min(1)).transform_before(to_number)];
    let engine = Engine::new();

    let mut root = json!({"page": " 3 "});
    assert_eq!(engine.validate(&mut root, &fields).await.unwrap(), Verdict::Pass);
    assert_eq!(root, json!({"page": 3}));
}

#[tokio::test]
async fn async_transform_is_awaited() {
    let engine = Engine::builder()
        .transform_after(transform_async(|value, _key, _root| {
            Box::pin(async move {
                tokio::task::yield_now().await;
                Ok(json!({"wrapped": value}))
            })
        }))
        .build();
    let fields = [Field::new("v", number())];
    let mut root = json!({"v": 1.5});
    engine.validate(&mut root, &fields).await.unwrap();
    assert_eq!(root, json!({"v": {"wrapped": 1.5}}));
}
