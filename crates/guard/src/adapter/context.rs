use std::future::Future;
use std::sync::Arc;

use http::StatusCode;
use serde_json::Value;

use crate::engine::Engine;
use crate::error::Error;
use crate::field::Field;
use crate::verdict::{ErrorPayload, Verdict};

/// A per-request context carrying the payload to validate.
pub trait RequestContext: Send {
    /// The payload; validated and rewritten in place.
    fn request_mut(&mut self) -> &mut Value;

    /// Ends the request with `status`.
    fn throw(&mut self, status: StatusCode, rejection: Rejection);
}

/// Why [`ContextGuard`] ended a request.
#[derive(Debug, thiserror::Error)]
pub enum Rejection {
    /// A field failed; carries the failing payload, if it had one.
    #[error("invalid request")]
    Invalid(Option<ErrorPayload>),

    /// Validation aborted.
    #[error(transparent)]
    Internal(#[from] Error),
}

impl Rejection {
    /// Status the guard throws this rejection with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Invalid(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Context-object adapter: validates the context's request, then either
/// continues with `next` or throws.
#[derive(Debug, Clone)]
pub struct ContextGuard {
    engine: Engine,
    fields: Arc<[Field]>,
}

impl ContextGuard {
    pub fn new(engine: Engine, fields: impl Into<Arc<[Field]>>) -> Self {
        Self {
            engine,
            fields: fields.into(),
        }
    }

    /// Returns the output of `next`, or `None` when the request was thrown.
    pub async fn handle<C, N, F>(&self, context: &mut C, next: N) -> Option<F::Output>
    where
        C: RequestContext,
        N: FnOnce() -> F,
        F: Future,
    {
        let rejection = match self.engine.validate(context.request_mut(), &self.fields).await {
            Ok(Verdict::Pass) => return Some(next().await),
            Ok(Verdict::Fail(payload)) => Rejection::Invalid(payload),
            Err(error) => {
                tracing::error!(%error, "request validation aborted");
                Rejection::Internal(error)
            }
        };
        context.throw(rejection.status(), rejection);
        None
    }
}
