//! Hook ordering and short-circuiting.

use std::sync::Arc;
use std::time::Duration;

use nebula_guard::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::support::{self, Events};

fn recording_engine(events: &Events) -> Engine {
    Engine::builder()
        .before(support::hook(events, "before"))
        .transform_before(support::transform(events, "transform_before"))
        .transform_after(support::transform(events, "transform_after"))
        .after(support::hook(events, "after"))
        .on_fail(support::value_hook(events, "on_fail"))
        .on_default(support::value_hook(events, "on_default"))
        .on_success(support::success(events))
        .build()
}

#[tokio::test]
async fn stages_run_in_order() {
    let events = support::events();
    let fields = [Field::new("a", any().rule(support::rule(&events, "check", true)))
        .before(support::hook(&events, "field.before"))
        .transform_before(support::transform(&events, "field.transform_before"))
        .transform_after(support::transform(&events, "field.transform_after"))
        .after(support::hook(&events, "field.after"))];

    let mut root = json!({"a": 1});
    let verdict = recording_engine(&events)
        .validate(&mut root, &fields)
        .await
        .unwrap();

    assert_eq!(verdict, Verdict::Pass);
    assert_eq!(
        support::snapshot(&events),
        [
            "before:a",
            "field.before:a",
            "transform_before:a",
            "field.transform_before:a",
            "check:a",
            "transform_after:a",
            "field.transform_after:a",
            "after:a",
            "field.after:a",
            "on_success",
        ]
    );
}

#[tokio::test]
async fn fields_run_in_declaration_order() {
    let events = support::events();
    let fields = [
        Field::new("z", any().rule(support::rule(&events, "check", true))),
        Field::new("a", any().rule(support::rule(&events, "check", true))),
        Field::new("m", any().rule(support::rule(&events, "check", true))),
    ];
    let mut root = json!({"a": 1, "m": 2, "z": 3});
    Engine::new().validate(&mut root, &fields).await.unwrap();
    assert_eq!(support::snapshot(&events), ["check:z", "check:a", "check:m"]);
}

#[tokio::test]
async fn missing_required_field_stops_everything() {
    let events = support::events();
    let fields = [
        Field::new("a", integer()),
        Field::new("b", integer()).before(support::hook(&events, "field.before")),
        Field::new("c", integer()),
    ];

    let mut root = json!({"a": 1, "c": 3});
    let verdict = recording_engine(&events)
        .validate(&mut root, &fields)
        .await
        .unwrap();

    assert_eq!(verdict, Verdict::fail());
    assert_eq!(
        support::snapshot(&events),
        [
            "before:a",
            "transform_before:a",
            "transform_after:a",
            "after:a",
            "before:b",
            "field.before:b",
            "on_fail:b=-",
        ]
    );
}

#[tokio::test]
async fn failing_rule_stops_later_rules_and_fields() {
    let events = support::events();
    let fields = [
        Field::new(
            "a",
            any()
                .rule(support::rule(&events, "first", true))
                .rule(support::rule(&events, "second", false))
                .rule(support::rule(&events, "third", true)),
        ),
        Field::new("b", any().rule(support::rule(&events, "first", true))),
    ];

    let mut root = json!({"a": 1, "b": 2});
    let verdict = Engine::new().validate(&mut root, &fields).await.unwrap();
    assert_eq!(verdict, Verdict::fail());
    assert_eq!(support::snapshot(&events), ["first:a", "second:a"]);
}

#[tokio::test]
async fn min_failure_hides_max() {
    let fields = [Field::new(
        "n",
        number().min(5).with_message("min").max(2).with_message("max"),
    )];
    let mut root = json!({"n": 1});
    let verdict = Engine::new().validate(&mut root, &fields).await.unwrap();
    assert_eq!(verdict, Verdict::fail_with("min"));
}

#[tokio::test]
async fn on_fail_sees_transformed_value() {
    let events = support::events();
    let engine = Engine::builder()
        .transform_before(transform_fn(|v: Value, _: &str, _: &Value| {
            json!(v.as_i64().unwrap_or_default() * 10)
        }))
        .on_fail(support::value_hook(&events, "on_fail"))
        .on_success(support::success(&events))
        .build();

    let fields = [Field::new("n", integer().max(50))];
    let mut root = json!({"n": 7});
    let verdict = engine.validate(&mut root, &fields).await.unwrap();

    assert!(verdict.is_fail());
    assert_eq!(support::snapshot(&events), ["on_fail:n=70"]);
}

#[tokio::test]
async fn on_success_fires_once_with_root() {
    let seen = support::events();
    let sink = Arc::clone(&seen);
    let engine = Engine::builder()
        .on_success(success_fn(move |root: &Value| {
            sink.lock().push(root.to_string());
        }))
        .build();

    let fields = [Field::new("a", integer()), Field::new("b", string())];
    let mut root = json!({"a": 1, "b": "x"});
    engine.validate(&mut root, &fields).await.unwrap();

    assert_eq!(support::snapshot(&seen), [r#"{"a":1,"b":"x"}"#]);
}

#[tokio::test]
async fn async_rules_are_awaited_in_order() {
    let events = support::events();
    let slow_events = Arc::clone(&events);
    let fields = [Field::new(
        "a",
        any()
            .custom_async(move |_value, _key, _root| {
                let events = Arc::clone(&slow_events);
                Box::pin(async move {
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    events.lock().push("slow".to_owned());
                    Ok(Verdict::Pass)
                })
            })
            .rule(support::rule(&events, "fast", true)),
    )];

    let mut root = json!({"a": 1});
    Engine::new().validate(&mut root, &fields).await.unwrap();
    assert_eq!(support::snapshot(&events), ["slow", "fast:a"]);
}

#[tokio::test]
async fn async_rule_can_fail_with_payload() {
    let taken = ["admin", "root"];
    let fields = [Field::new(
        "username",
        string().custom_async(move |value, _key, _root| {
            Box::pin(async move {
                tokio::task::yield_now().await;
                let name = value.as_str().unwrap_or_default();
                Ok(if taken.iter().any(|t| *t == name) {
                    Verdict::fail_with("Username is taken")
                } else {
                    Verdict::Pass
                })
            })
        }),
    )];

    let mut root = json!({"username": "root"});
    let verdict = Engine::new().validate(&mut root, &fields).await.unwrap();
    assert_eq!(verdict, Verdict::fail_with("Username is taken"));
}
