//! # nebula-guard
//!
//! Declarative validation and transformation of JSON request payloads.
//!
//! A payload is checked against an ordered list of [`Field`] declarations.
//! Each declaration names a dotted path and a rule chain built from a kind
//! constructor; engine-wide and per-field hooks can observe or rewrite
//! values as they pass through.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nebula_guard::prelude::*;
//! use serde_json::json;
//!
//! let fields = [
//!     Field::new("name", string().min(1).with_message("Name is required")),
//!     Field::new("age", integer().with_message("Must be an integer").min(0).max(150)),
//!     Field::new("tags", array().of().strings().optional().default(json!([]))),
//! ];
//!
//! let mut body = json!({"name": "Ann", "age": 41});
//! let verdict = Engine::new().validate(&mut body, &fields).await?;
//! assert_eq!(verdict, Verdict::Pass);
//! assert_eq!(body["tags"], json!([]));
//! ```
//!
//! ## Outcomes
//!
//! - `Ok(Verdict::Pass)`: every field passed.
//! - `Ok(Verdict::Fail(payload))`: the first failing field; `payload` is the
//!   message or code attached with `with_message`/`with_code`, if any.
//!   A missing required field is always a bare `Fail(None)`.
//! - `Err(Error)`: a hook, transform or rule raised an error.
//!
//! ## Features
//!
//! - `adapters` (default): [`adapter::Middleware`], [`adapter::ContextGuard`]
//!   and [`adapter::ResolverGuard`].

#[cfg(feature = "adapters")]
pub mod adapter;
pub mod chain;
pub mod engine;
pub mod error;
pub mod field;
pub mod hook;
pub mod kinds;
pub mod path;
pub mod prelude;
pub mod rule;
pub mod verdict;

pub use chain::{DefaultValue, Handler, Kind, RuleChain};
pub use engine::{Engine, EngineBuilder, Options};
pub use error::{BoxError, Error, GuardResult, Stage};
pub use field::Field;
pub use path::{FieldPath, PathError};
pub use regex::Regex;
pub use rule::Rule;
pub use verdict::{ErrorPayload, IntoVerdict, Verdict};
