//! Internal errors abort validation.

use nebula_guard::prelude::*;
use nebula_guard::{Error, Stage};
use serde_json::{Value, json};

use crate::support;

fn failing_hook(message: &'static str) -> impl Hook + use<> {
    hook_fn(move |_: Option<&Value>, _: &str, _: &Value| -> Result<(), BoxError> {
        Err(message.into())
    })
}

#[tokio::test]
async fn before_hook_error_stops_run() {
    let events = support::events();
    let fields = [
        Field::new("a", integer()).before(failing_hook("rate limited")),
        Field::new("b", integer()).before(support::hook(&events, "field.before")),
    ];
    let mut root = json!({"a": 1, "b": 2});

    let err = Engine::new().validate(&mut root, &fields).await.unwrap_err();
    assert_eq!(err.stage(), Some(Stage::Before));
    assert_eq!(err.to_string(), "before hook failed for field 'a': rate limited");
    assert!(support::snapshot(&events).is_empty());
}

#[tokio::test]
async fn on_fail_error_replaces_failure() {
    let engine = Engine::builder().on_fail(failing_hook("audit down")).build();
    let fields = [Field::new("a", integer())];
    let mut root = json!({"a": "x"});

    let err = engine.validate(&mut root, &fields).await.unwrap_err();
    assert_eq!(err.stage(), Some(Stage::OnFail));
}

#[tokio::test]
async fn on_default_error_propagates() {
    let engine = Engine::builder().on_default(failing_hook("nope")).build();
    let fields = [Field::new("a", integer().optional().default(1))];
    let mut root = json!({});

    let err = engine.validate(&mut root, &fields).await.unwrap_err();
    assert_eq!(err.stage(), Some(Stage::OnDefault));
    // The default was already written when the hook ran.
    assert_eq!(root, json!({"a": 1}));
}

#[tokio::test]
async fn transform_error_names_stage_and_key() {
    let fields = [Field::new("user.age", integer()).transform_after(transform_fn(
        |_: Value, _: &str, _: &Value| -> Result<Value, BoxError> { Err("overflow".into()) },
    ))];
    let mut root = json!({"user": {"age": 30}});

    let err = Engine::new().validate(&mut root, &fields).await.unwrap_err();
    match err {
        Error::Hook { stage, key, .. } => {
            assert_eq!(stage, Stage::TransformAfter);
            assert_eq!(key, "user.age");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn async_rule_error_propagates() {
    let fields = [Field::new(
        "token",
        string().custom_async(|_value, _key, _root| {
            Box::pin(async { Err::<Verdict, BoxError>("introspection timeout".into()) })
        }),
    )];
    let mut root = json!({"token": "abc"});

    let err = Engine::new().validate(&mut root, &fields).await.unwrap_err();
    assert!(matches!(err, Error::Rule { .. }));
    assert!(err.to_string().contains("introspection timeout"));
}

#[tokio::test]
async fn default_far_past_array_end_is_a_path_error() {
    let fields = [Field::new(
        "slots.18446744073709551615",
        any().optional().default(json!(1)),
    )];
    let mut root = json!({"slots": []});

    let err = Engine::new().validate(&mut root, &fields).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Path(nebula_guard::PathError::IndexOutOfRange { len: 0, .. })
    ));
    assert_eq!(root, json!({"slots": []}));
}
