//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use nebula_guard::prelude::*;
//!
//! let email = string().matches(Regex::new(r"^\S+@\S+$")?).with_message("Invalid email");
//! let fields = [Field::new("user.email", email)];
//! ```

// ============================================================================
// CORE
// ============================================================================

pub use crate::chain::{Handler, RuleChain};
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::error::{BoxError, Error};
pub use crate::field::Field;
pub use crate::verdict::{ErrorPayload, Verdict};
pub use regex::Regex;

// ============================================================================
// KINDS
// ============================================================================

pub use crate::kinds::{any, array, boolean, float, int, integer, number, object, string};

// ============================================================================
// CALLBACKS
// ============================================================================

pub use crate::hook::{
    Hook, SuccessHook, Transform, hook_async, hook_fn, success_async, success_fn,
    transform_async, transform_fn,
};
pub use crate::rule::{Rule, rule_async, rule_fn};
