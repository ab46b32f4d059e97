//! Internal error types.
//!
//! Validation failures are *not* errors: they come back as
//! [`Verdict::Fail`](crate::Verdict::Fail). The types here cover the
//! unexpected cases: a hook, transform or rule raised an error, or a value
//! could not be written back into the payload.

use std::fmt;

use crate::path::PathError;

/// Error type accepted from caller-supplied hooks, transforms and rules.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias for engine operations.
pub type GuardResult<T> = Result<T, Error>;

/// The lifecycle point at which an internal error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Before,
    TransformBefore,
    TransformAfter,
    After,
    OnSuccess,
    OnFail,
    OnDefault,
}

impl Stage {
    /// Stable name used in logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::TransformBefore => "transform_before",
            Self::TransformAfter => "transform_after",
            Self::After => "after",
            Self::OnSuccess => "on_success",
            Self::OnFail => "on_fail",
            Self::OnDefault => "on_default",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort a validation run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A lifecycle hook or transform returned an error.
    #[error("{stage} hook failed for field '{key}': {source}")]
    Hook {
        /// Where in the lifecycle the hook ran.
        stage: Stage,
        /// Path of the field being processed; empty for `on_success`.
        key: String,
        /// The hook's own error.
        source: BoxError,
    },

    /// A rule raised an error instead of returning a verdict.
    #[error("rule failed for field '{key}': {source}")]
    Rule {
        /// Path of the field being checked.
        key: String,
        /// The rule's own error.
        source: BoxError,
    },

    /// A transformed or default value could not be written back.
    #[error(transparent)]
    Path(#[from] PathError),
}

impl Error {
    pub(crate) fn hook(stage: Stage, key: &str, source: BoxError) -> Self {
        Self::Hook {
            stage,
            key: key.to_owned(),
            source,
        }
    }

    pub(crate) fn rule(key: &str, source: BoxError) -> Self {
        Self::Rule {
            key: key.to_owned(),
            source,
        }
    }

    /// The lifecycle stage, for hook errors.
    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Hook { stage, .. } => Some(*stage),
            Self::Rule { .. } | Self::Path(_) => None,
        }
    }
}
