//! Object chains.

use serde_json::Value;

use crate::chain::{Handler, Kind};

super::kind_chain! {
    /// Chain for JSON objects. Arrays and `null` are not objects.
    ObjectChain
}

/// A chain that accepts only objects.
#[must_use]
pub fn object() -> ObjectChain {
    let mut handler = Handler::new(Kind::Object);
    handler.push_predicate(Value::is_object);
    ObjectChain { handler }
}

impl ObjectChain {
    /// The object has a member named `key`, whatever its value.
    #[must_use]
    pub fn has_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.handler
            .push_predicate(move |value| value.as_object().is_some_and(|map| map.contains_key(&key)));
        self
    }

    /// At least `min` members.
    #[must_use]
    pub fn min_keys(mut self, min: usize) -> Self {
        self.handler
            .push_predicate(move |value| value.as_object().is_some_and(|map| map.len() >= min));
        self
    }

    /// At most `max` members.
    #[must_use]
    pub fn max_keys(mut self, max: usize) -> Self {
        self.handler
            .push_predicate(move |value| value.as_object().is_some_and(|map| map.len() <= max));
        self
    }
}
