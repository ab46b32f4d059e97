//! Shared recorders for lifecycle assertions.

use std::sync::Arc;

use nebula_guard::hook::{Hook, SuccessHook, Transform, hook_fn, success_fn, transform_fn};
use nebula_guard::rule::{Rule, rule_fn};
use parking_lot::Mutex;
use serde_json::Value;

pub type Events = Arc<Mutex<Vec<String>>>;

pub fn events() -> Events {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn snapshot(events: &Events) -> Vec<String> {
    events.lock().clone()
}

/// Hook that records `label:key`.
pub fn hook(events: &Events, label: &'static str) -> impl Hook + use<> {
    let events = Arc::clone(events);
    hook_fn(move |_: Option<&Value>, key: &str, _: &Value| {
        events.lock().push(format!("{label}:{key}"));
    })
}

/// Hook that records `label:key=value`, with `-` for an absent value.
pub fn value_hook(events: &Events, label: &'static str) -> impl Hook + use<> {
    let events = Arc::clone(events);
    hook_fn(move |value: Option<&Value>, key: &str, _: &Value| {
        let rendered = value.map_or_else(|| "-".to_owned(), ToString::to_string);
        events.lock().push(format!("{label}:{key}={rendered}"));
    })
}

/// Identity transform that records `label:key`.
pub fn transform(events: &Events, label: &'static str) -> impl Transform + use<> {
    let events = Arc::clone(events);
    transform_fn(move |value: Value, key: &str, _: &Value| {
        events.lock().push(format!("{label}:{key}"));
        value
    })
}

/// Rule that records `label:key` and returns `pass`.
pub fn rule(events: &Events, label: &str, pass: bool) -> impl Rule + use<> {
    let events = Arc::clone(events);
    let label = label.to_owned();
    rule_fn(move |_: &Value, key: &str, _: &Value| {
        events.lock().push(format!("{label}:{key}"));
        pass
    })
}

pub fn success(events: &Events) -> impl SuccessHook + use<> {
    let events = Arc::clone(events);
    success_fn(move |_: &Value| {
        events.lock().push("on_success".to_owned());
    })
}
