//! Kind constructors.
//!
//! Each constructor returns a chain whose first rule checks the value's
//! kind. Kind-specific builders live on the returned chain type; the shared
//! ones (`custom`, `optional`, `default`, `with_message`, ...) come from
//! [`RuleChain`](crate::RuleChain).
//!
//! | constructor | chain | type check |
//! |-------------|-------|------------|
//! | [`string()`] | [`StringChain`] | JSON string |
//! | [`number()`] | [`NumberChain`] | JSON number |
//! | [`integer()`] / [`int()`] | [`NumberChain`] | number with no fractional part |
//! | [`float()`] | [`NumberChain`] | number with a fractional part |
//! | [`boolean()`] | [`BooleanChain`] | JSON boolean |
//! | [`array()`] | [`ArrayChain`] | JSON array |
//! | [`object()`] | [`ObjectChain`] | JSON object |
//! | [`any()`] | [`Handler`] | none |

/// Declares a kind chain wrapping a [`Handler`].
macro_rules! kind_chain {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            handler: $crate::chain::Handler,
        }

        impl $crate::chain::RuleChain for $name {
            fn handler(&self) -> &$crate::chain::Handler {
                &self.handler
            }

            fn handler_mut(&mut self) -> &mut $crate::chain::Handler {
                &mut self.handler
            }
        }

        impl From<$name> for $crate::chain::Handler {
            fn from(chain: $name) -> Self {
                chain.handler
            }
        }
    };
}

pub(crate) use kind_chain;

mod array;
mod boolean;
mod number;
mod object;
mod string;

pub use array::{ArrayChain, ArrayOf, array};
pub use boolean::{BooleanChain, boolean};
pub use number::{NumericBound, NumberChain, float, int, integer, number};
pub use object::{ObjectChain, object};
pub use string::{StringChain, string};

use serde_json::Value;

use crate::chain::{Handler, Kind};

/// Chain without a type check; only custom rules apply.
#[must_use]
pub fn any() -> Handler {
    Handler::new(Kind::Any)
}

/// Finite number with no fractional part. `2.0` counts.
pub(crate) fn is_integer(value: &Value) -> bool {
    value
        .as_f64()
        .is_some_and(|n| n.is_finite() && n.fract() == 0.0)
}

/// Finite number with a non-zero fractional part.
pub(crate) fn is_float(value: &Value) -> bool {
    value
        .as_f64()
        .is_some_and(|n| n.is_finite() && n.fract() != 0.0)
}
