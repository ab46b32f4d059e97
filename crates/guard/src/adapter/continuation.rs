use std::sync::Arc;

use serde_json::Value;

use super::{BAD_REQUEST, SERVER_ERROR};
use crate::engine::Engine;
use crate::field::Field;
use crate::verdict::{ErrorPayload, Verdict};

/// Continuation-style adapter.
///
/// Validates the request and hands the outcome to `next`: `None` on
/// success, the failing payload (or `400`) on failure, `500` when
/// validation aborted.
///
/// ```rust,ignore
/// let guard = Middleware::new(Engine::new(), vec![Field::new("name", string())]);
/// guard.handle(&mut body, |outcome| match outcome {
///     None => respond_ok(),
///     Some(payload) => respond_error(payload),
/// }).await;
/// ```
#[derive(Debug, Clone)]
pub struct Middleware {
    engine: Engine,
    fields: Arc<[Field]>,
}

impl Middleware {
    pub fn new(engine: Engine, fields: impl Into<Arc<[Field]>>) -> Self {
        Self {
            engine,
            fields: fields.into(),
        }
    }

    pub async fn handle<N, R>(&self, request: &mut Value, next: N) -> R
    where
        N: FnOnce(Option<ErrorPayload>) -> R,
    {
        match self.engine.validate(request, &self.fields).await {
            Ok(Verdict::Pass) => next(None),
            Ok(Verdict::Fail(payload)) => {
                next(Some(payload.unwrap_or(ErrorPayload::Code(BAD_REQUEST))))
            }
            Err(error) => {
                tracing::error!(%error, "request validation aborted");
                next(Some(ErrorPayload::Code(SERVER_ERROR)))
            }
        }
    }
}
