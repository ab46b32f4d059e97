//! String chains.

use regex::Regex;
use serde_json::Value;

use crate::chain::{Handler, Kind};

super::kind_chain! {
    /// Chain for JSON strings. Lengths are counted in characters.
    StringChain
}

/// A chain that accepts only strings.
#[must_use]
pub fn string() -> StringChain {
    let mut handler = Handler::new(Kind::String);
    handler.push_predicate(Value::is_string);
    StringChain { handler }
}

impl StringChain {
    /// The value equals `expected` exactly.
    #[must_use]
    pub fn equals(mut self, expected: impl Into<String>) -> Self {
        let expected = expected.into();
        self.handler
            .push_predicate(move |value| value.as_str() == Some(expected.as_str()));
        self
    }

    /// At least `min` characters.
    #[must_use]
    pub fn min(mut self, min: usize) -> Self {
        self.handler
            .push_predicate(move |value| char_count(value).is_some_and(|len| len >= min));
        self
    }

    /// At most `max` characters.
    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.handler
            .push_predicate(move |value| char_count(value).is_some_and(|len| len <= max));
        self
    }

    /// The pattern matches somewhere in the value; anchor it for a full match.
    #[must_use]
    pub fn matches(mut self, pattern: Regex) -> Self {
        self.handler
            .push_predicate(move |value| value.as_str().is_some_and(|s| pattern.is_match(s)));
        self
    }
}

fn char_count(value: &Value) -> Option<usize> {
    value.as_str().map(|s| s.chars().count())
}
