//! Array chains.
//!
//! Array-shape constraints (`min`, `max`, `includes`) and element-shape
//! constraints (`strings`, `integers`, `every`, ...) share one chain, so both
//! compose in a single declaration:
//!
//! ```rust,ignore
//! let tags = array().of().strings().min(1).max(10);
//! ```

use serde_json::Value;

use crate::chain::{Handler, Kind};

super::kind_chain! {
    /// Chain for JSON arrays.
    ArrayChain
}

/// A chain that accepts only arrays.
#[must_use]
pub fn array() -> ArrayChain {
    let mut handler = Handler::new(Kind::Array);
    handler.push_predicate(Value::is_array);
    ArrayChain { handler }
}

impl ArrayChain {
    /// Element view: `array().of().integers()`.
    #[must_use]
    pub fn of(self) -> ArrayOf {
        ArrayOf(self)
    }

    /// At least `min` elements.
    #[must_use]
    pub fn min(mut self, min: usize) -> Self {
        self.handler
            .push_predicate(move |value| value.as_array().is_some_and(|items| items.len() >= min));
        self
    }

    /// At most `max` elements.
    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.handler
            .push_predicate(move |value| value.as_array().is_some_and(|items| items.len() <= max));
        self
    }

    /// Some element equals `needle`. Numbers compare numerically.
    #[must_use]
    pub fn includes(mut self, needle: impl Into<Value>) -> Self {
        let needle = needle.into();
        self.handler.push_predicate(move |value| {
            value
                .as_array()
                .is_some_and(|items| items.iter().any(|item| loosely_equal(item, &needle)))
        });
        self
    }

    /// Every element satisfies `predicate`. Vacuously true for `[]`.
    #[must_use]
    pub fn every<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.handler.push_predicate(move |value| {
            value
                .as_array()
                .is_some_and(|items| items.iter().all(&predicate))
        });
        self
    }

    /// At least one element satisfies `predicate`. False for `[]`.
    #[must_use]
    pub fn some<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.handler.push_predicate(move |value| {
            value
                .as_array()
                .is_some_and(|items| items.iter().any(&predicate))
        });
        self
    }

    /// Every element is a string.
    #[must_use]
    pub fn strings(self) -> Self {
        self.every(Value::is_string)
    }

    /// Every element is a number.
    #[must_use]
    pub fn numbers(self) -> Self {
        self.every(Value::is_number)
    }

    /// Every element is a whole number.
    #[must_use]
    pub fn integers(self) -> Self {
        self.every(super::is_integer)
    }

    /// Every element is a number with a fractional part.
    #[must_use]
    pub fn floats(self) -> Self {
        self.every(super::is_float)
    }

    /// Every element is a boolean.
    #[must_use]
    pub fn booleans(self) -> Self {
        self.every(Value::is_boolean)
    }

    /// Every element is an array.
    #[must_use]
    pub fn arrays(self) -> Self {
        self.every(Value::is_array)
    }

    /// Every element is an object.
    #[must_use]
    pub fn objects(self) -> Self {
        self.every(Value::is_object)
    }
}

/// Element view over an [`ArrayChain`].
///
/// Each method appends an element-kind rule to the underlying chain and
/// hands the chain back.
#[derive(Debug, Clone)]
#[must_use = "the element view does nothing until an element kind is chosen"]
pub struct ArrayOf(ArrayChain);

impl ArrayOf {
    pub fn strings(self) -> ArrayChain {
        self.0.strings()
    }

    pub fn numbers(self) -> ArrayChain {
        self.0.numbers()
    }

    pub fn integers(self) -> ArrayChain {
        self.0.integers()
    }

    pub fn floats(self) -> ArrayChain {
        self.0.floats()
    }

    pub fn booleans(self) -> ArrayChain {
        self.0.booleans()
    }

    pub fn arrays(self) -> ArrayChain {
        self.0.arrays()
    }

    pub fn objects(self) -> ArrayChain {
        self.0.objects()
    }
}

fn loosely_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => l.as_f64() == r.as_f64(),
        _ => left == right,
    }
}
