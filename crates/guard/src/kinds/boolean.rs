//! Boolean chains.

use serde_json::Value;

use crate::chain::{Handler, Kind};

super::kind_chain! {
    /// Chain for JSON booleans.
    BooleanChain
}

/// A chain that accepts only booleans.
#[must_use]
pub fn boolean() -> BooleanChain {
    let mut handler = Handler::new(Kind::Boolean);
    handler.push_predicate(Value::is_boolean);
    BooleanChain { handler }
}

impl BooleanChain {
    /// The value is `true`.
    #[must_use]
    pub fn is_true(self) -> Self {
        self.equals(true)
    }

    /// The value is `false`.
    #[must_use]
    pub fn is_false(self) -> Self {
        self.equals(false)
    }

    /// The value is `expected`.
    #[must_use]
    pub fn equals(mut self, expected: bool) -> Self {
        self.handler
            .push_predicate(move |value| value.as_bool() == Some(expected));
        self
    }
}
