//! Number chains: `number`, `integer` and `float`.
//!
//! `integer` and `float` are number chains with one extra built-in check
//! appended to the type-check group, so a `with_message` right after the
//! constructor covers both "not a number" and "not an integer".

use serde_json::Value;

use crate::chain::{Handler, Kind};
use crate::rule::Predicate;

super::kind_chain! {
    /// Chain for JSON numbers, compared as `f64`.
    NumberChain
}

/// Numeric types accepted as bounds by [`NumberChain`].
pub trait NumericBound: Copy + Send + Sync + 'static {
    fn to_f64(self) -> f64;
}

macro_rules! numeric_bound {
    ($($ty:ty),*) => {
        $(
            impl NumericBound for $ty {
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

numeric_bound!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32);

impl NumericBound for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

/// A chain that accepts any JSON number.
#[must_use]
pub fn number() -> NumberChain {
    let mut handler = Handler::new(Kind::Number);
    handler.push_predicate(Value::is_number);
    NumberChain { handler }
}

/// A number chain that also requires a whole value.
#[must_use]
pub fn integer() -> NumberChain {
    let mut chain = number();
    chain.handler.set_kind(Kind::Integer);
    chain.handler.push_into_group(Predicate(super::is_integer));
    chain
}

/// Alias for [`integer`].
#[must_use]
pub fn int() -> NumberChain {
    integer()
}

/// A number chain that also requires a fractional part.
#[must_use]
pub fn float() -> NumberChain {
    let mut chain = number();
    chain.handler.set_kind(Kind::Float);
    chain.handler.push_into_group(Predicate(super::is_float));
    chain
}

impl NumberChain {
    /// The value is at least `min`.
    #[must_use]
    pub fn min(mut self, min: impl NumericBound) -> Self {
        let min = min.to_f64();
        self.handler
            .push_predicate(move |value| value.as_f64().is_some_and(|n| n >= min));
        self
    }

    /// The value is at most `max`.
    #[must_use]
    pub fn max(mut self, max: impl NumericBound) -> Self {
        let max = max.to_f64();
        self.handler
            .push_predicate(move |value| value.as_f64().is_some_and(|n| n <= max));
        self
    }

    /// The value equals `expected` numerically, so `2` equals `2.0`.
    #[must_use]
    pub fn equals(mut self, expected: impl NumericBound) -> Self {
        let expected = expected.to_f64();
        self.handler
            .push_predicate(move |value| value.as_f64() == Some(expected));
        self
    }
}
