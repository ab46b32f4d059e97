//! Rule chains: the ordered, short-circuiting check list behind each field.
//!
//! Every kind constructor in [`crate::kinds`] returns a chain type that
//! implements [`RuleChain`], and every chain converts into the type-erased
//! [`Handler`] that a [`Field`](crate::Field) owns.
//!
//! # Payloads
//!
//! Built-in checks fail without a payload. [`RuleChain::with_message`] and
//! [`RuleChain::with_code`] attach one to the checks appended by the most
//! recent builder call; right after construction that is the kind's own type
//! check:
//!
//! ```rust,ignore
//! let age = integer()
//!     .with_message("Must be an integer")
//!     .min(0)
//!     .max(150)
//!     .with_message("Age out of range"); // only covers max(150)
//! ```

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::BoxError;
use crate::rule::{Predicate, Rule, rule_async, rule_fn};
use crate::verdict::{ErrorPayload, IntoVerdict, Verdict};

// ============================================================================
// KIND
// ============================================================================

/// The value kind a chain was declared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Number,
    Integer,
    Float,
    Boolean,
    Array,
    Object,
    Any,
}

impl Kind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// DEFAULT VALUE
// ============================================================================

/// Value injected for an absent optional field.
#[derive(Clone)]
pub enum DefaultValue {
    /// A literal, cloned on every application.
    Value(Value),
    /// Computed from the payload each time it is applied.
    Lazy(Arc<dyn Fn(&Value) -> Value + Send + Sync>),
}

impl DefaultValue {
    /// Produces the value to write for `root`.
    #[must_use]
    pub fn resolve(&self, root: &Value) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Lazy(compute) => compute(root),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Lazy(_) => f.write_str("Lazy(<function>)"),
        }
    }
}

// ============================================================================
// HANDLER
// ============================================================================

#[derive(Clone)]
struct RuleEntry {
    rule: Arc<dyn Rule>,
    payload: Option<ErrorPayload>,
}

/// Type-erased rule chain with optionality and default configuration.
#[derive(Clone)]
pub struct Handler {
    kind: Kind,
    rules: Vec<RuleEntry>,
    /// Index of the first rule appended by the latest builder call.
    group_start: usize,
    optional: bool,
    default: Option<DefaultValue>,
}

impl Handler {
    /// An empty chain for `kind`, without any type check.
    #[must_use]
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            rules: Vec::new(),
            group_start: 0,
            optional: false,
            default: None,
        }
    }

    /// Declared kind.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub(crate) fn set_kind(&mut self, kind: Kind) {
        self.kind = kind;
    }

    /// Appends `rule` as a new builder group.
    pub fn push(&mut self, rule: impl Rule + 'static) {
        self.group_start = self.rules.len();
        self.push_into_group(rule);
    }

    /// Appends `rule` to the current builder group, so that a following
    /// `with_message` covers it together with the rules before it.
    pub(crate) fn push_into_group(&mut self, rule: impl Rule + 'static) {
        self.rules.push(RuleEntry {
            rule: Arc::new(rule),
            payload: None,
        });
    }

    pub(crate) fn push_predicate<F>(&mut self, predicate: F)
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.push(Predicate(predicate));
    }

    /// Ends the current builder group; a following `with_message` has no
    /// checks to cover until another one is appended.
    fn close_group(&mut self) {
        self.group_start = self.rules.len();
    }

    fn set_group_payload(&mut self, payload: ErrorPayload) {
        for entry in &mut self.rules[self.group_start..] {
            entry.payload = Some(payload.clone());
        }
    }

    /// Number of rules in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether an absent value is tolerated.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Whether `default`/`default_with` was called, even with `null`.
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Resolves the default against `root`; `None` if no default was set.
    #[must_use]
    pub fn get_default(&self, root: &Value) -> Option<Value> {
        self.default.as_ref().map(|default| default.resolve(root))
    }

    /// Runs the rules in order, stopping at the first failure.
    ///
    /// Rules are awaited one at a time; a rule after the failing one is
    /// never evaluated.
    pub async fn check(&self, value: &Value, key: &str, root: &Value) -> Result<Verdict, BoxError> {
        for entry in &self.rules {
            match entry.rule.check(value, key, root).await? {
                Verdict::Pass => {}
                Verdict::Fail(own) => return Ok(Verdict::Fail(entry.payload.clone().or(own))),
            }
        }
        Ok(Verdict::Pass)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("kind", &self.kind)
            .field("rules", &self.rules.len())
            .field("optional", &self.optional)
            .field("default", &self.default)
            .finish()
    }
}

// ============================================================================
// BUILDER TRAIT
// ============================================================================

/// Builder methods shared by every chain kind.
///
/// All methods consume and return the chain, so a declaration reads as one
/// expression: `string().min(3).optional()`.
///
/// `with_message`, `with_code` and `with_payload` cover the checks added by
/// the builder call right before them. `optional`, `default` and
/// `default_with` add no checks, so a payload placed after them is ignored:
/// write `int().min(0).with_message("..").optional()`.
pub trait RuleChain: Sized {
    /// The underlying chain.
    fn handler(&self) -> &Handler;

    /// The underlying chain, for appending.
    fn handler_mut(&mut self) -> &mut Handler;

    /// Appends a synchronous rule over `(value, key, root)`.
    ///
    /// The predicate may return `bool`, a [`Verdict`], a message string, an
    /// `i64` code, or a `Result` of any of these to signal an internal error.
    fn custom<F, R>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value, &str, &Value) -> R + Send + Sync + 'static,
        R: IntoVerdict + 'static,
    {
        self.handler_mut().push(rule_fn(predicate));
        self
    }

    /// Appends an asynchronous rule over `(value, key, root)`.
    fn custom_async<F>(mut self, predicate: F) -> Self
    where
        F: for<'a> Fn(&'a Value, &'a str, &'a Value) -> BoxFuture<'a, Result<Verdict, BoxError>>
            + Send
            + Sync
            + 'static,
    {
        self.handler_mut().push(rule_async(predicate));
        self
    }

    /// Appends any [`Rule`] implementation.
    fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.handler_mut().push(rule);
        self
    }

    /// Tolerates an absent value. Does not supply a default.
    fn optional(mut self) -> Self {
        let handler = self.handler_mut();
        handler.optional = true;
        handler.close_group();
        self
    }

    /// Value written for an absent optional field.
    fn default(mut self, value: impl Into<Value>) -> Self {
        let handler = self.handler_mut();
        handler.default = Some(DefaultValue::Value(value.into()));
        handler.close_group();
        self
    }

    /// Default computed from the payload each time it is applied.
    fn default_with<F>(mut self, compute: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        let handler = self.handler_mut();
        handler.default = Some(DefaultValue::Lazy(Arc::new(compute)));
        handler.close_group();
        self
    }

    /// Failure message for the checks added by the previous builder call.
    fn with_message(mut self, message: impl Into<String>) -> Self {
        self.handler_mut()
            .set_group_payload(ErrorPayload::from(message.into()));
        self
    }

    /// Failure code for the checks added by the previous builder call.
    fn with_code(mut self, code: i64) -> Self {
        self.handler_mut().set_group_payload(ErrorPayload::Code(code));
        self
    }

    /// Failure payload for the checks added by the previous builder call.
    fn with_payload(mut self, payload: impl Into<ErrorPayload>) -> Self {
        self.handler_mut().set_group_payload(payload.into());
        self
    }
}

impl RuleChain for Handler {
    fn handler(&self) -> &Handler {
        self
    }

    fn handler_mut(&mut self) -> &mut Handler {
        self
    }
}
