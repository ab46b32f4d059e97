//! Rule outcomes.
//!
//! A rule either passes or fails. A failure may carry a caller-supplied
//! [`ErrorPayload`]; a failure without one is the plain "invalid" signal
//! that serializes as `false`.

use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::BoxError;

// ============================================================================
// ERROR PAYLOAD
// ============================================================================

/// Caller-chosen value returned verbatim when a constraint fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    /// Human-readable message, e.g. `"Must be an integer"`.
    Text(Cow<'static, str>),
    /// Numeric code, e.g. an HTTP status.
    Code(i64),
}

impl ErrorPayload {
    /// Creates a text payload.
    pub fn text(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Text(message.into())
    }

    /// Returns the message if this is a text payload.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Code(_) => None,
        }
    }

    /// Returns the code if this is a numeric payload.
    #[must_use]
    pub fn as_code(&self) -> Option<i64> {
        match self {
            Self::Code(code) => Some(*code),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Code(code) => write!(f, "{code}"),
        }
    }
}

impl From<&'static str> for ErrorPayload {
    fn from(text: &'static str) -> Self {
        Self::Text(Cow::Borrowed(text))
    }
}

impl From<String> for ErrorPayload {
    fn from(text: String) -> Self {
        Self::Text(Cow::Owned(text))
    }
}

impl From<i64> for ErrorPayload {
    fn from(code: i64) -> Self {
        Self::Code(code)
    }
}

// ============================================================================
// VERDICT
// ============================================================================

/// Outcome of a rule, a chain, or a whole validation run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Verdict {
    /// Every check passed.
    #[default]
    Pass,
    /// A check failed, optionally with the payload attached to it.
    Fail(Option<ErrorPayload>),
}

impl Verdict {
    /// A failure without payload.
    #[must_use]
    pub const fn fail() -> Self {
        Self::Fail(None)
    }

    /// A failure carrying `payload`.
    pub fn fail_with(payload: impl Into<ErrorPayload>) -> Self {
        Self::Fail(Some(payload.into()))
    }

    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    #[must_use]
    pub const fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }

    /// Returns the failure payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Pass | Self::Fail(None) => None,
            Self::Fail(Some(payload)) => Some(payload),
        }
    }

    /// Converts into `Result`, treating a bare failure as `None`.
    pub fn into_result(self) -> Result<(), Option<ErrorPayload>> {
        match self {
            Self::Pass => Ok(()),
            Self::Fail(payload) => Err(payload),
        }
    }
}

impl From<bool> for Verdict {
    fn from(passed: bool) -> Self {
        if passed { Self::Pass } else { Self::fail() }
    }
}

/// `true`, `false`, or the payload itself.
impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Pass => serializer.serialize_bool(true),
            Self::Fail(None) => serializer.serialize_bool(false),
            Self::Fail(Some(payload)) => payload.serialize(serializer),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("pass"),
            Self::Fail(None) => f.write_str("fail"),
            Self::Fail(Some(payload)) => write!(f, "fail: {payload}"),
        }
    }
}

// ============================================================================
// CONVERSION FROM RULE RETURN VALUES
// ============================================================================

/// Anything a rule predicate may return.
///
/// `true` passes and `false` fails without payload. A string or an integer
/// is a failure carrying that payload. `Err` is an internal error and aborts
/// the whole validation.
pub trait IntoVerdict {
    fn into_verdict(self) -> Result<Verdict, BoxError>;
}

impl IntoVerdict for Verdict {
    fn into_verdict(self) -> Result<Verdict, BoxError> {
        Ok(self)
    }
}

impl IntoVerdict for bool {
    fn into_verdict(self) -> Result<Verdict, BoxError> {
        Ok(Verdict::from(self))
    }
}

impl IntoVerdict for ErrorPayload {
    fn into_verdict(self) -> Result<Verdict, BoxError> {
        Ok(Verdict::Fail(Some(self)))
    }
}

impl IntoVerdict for &'static str {
    fn into_verdict(self) -> Result<Verdict, BoxError> {
        Ok(Verdict::fail_with(self))
    }
}

impl IntoVerdict for String {
    fn into_verdict(self) -> Result<Verdict, BoxError> {
        Ok(Verdict::fail_with(self))
    }
}

impl IntoVerdict for i64 {
    fn into_verdict(self) -> Result<Verdict, BoxError> {
        Ok(Verdict::fail_with(self))
    }
}

impl<T, E> IntoVerdict for Result<T, E>
where
    T: IntoVerdict,
    E: Into<BoxError>,
{
    fn into_verdict(self) -> Result<Verdict, BoxError> {
        match self {
            Ok(value) => value.into_verdict(),
            Err(error) => Err(error.into()),
        }
    }
}
