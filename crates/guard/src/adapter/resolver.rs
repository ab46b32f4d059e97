use std::fmt;
use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use crate::engine::Engine;
use crate::field::Field;
use crate::verdict::Verdict;

/// Rejection returned by [`ResolverGuard::resolve`].
///
/// A failed check is reported as a plain [`BadRequest`](Self::BadRequest);
/// the failing field's payload is not carried over.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError<E> {
    #[error("bad request")]
    BadRequest,

    #[error("server error")]
    ServerError,

    /// The wrapped resolver's own error.
    #[error(transparent)]
    Resolver(E),
}

/// Wraps a four-argument async resolver and validates its `args` first.
///
/// ```rust,ignore
/// let create_user = ResolverGuard::new(engine, fields, |_parent, args, ctx, _info| async move {
///     ctx.users.insert(args).await
/// });
/// let user = create_user.resolve((), args, ctx, info).await?;
/// ```
#[derive(Clone)]
pub struct ResolverGuard<R> {
    engine: Engine,
    fields: Arc<[Field]>,
    resolver: R,
}

impl<R> ResolverGuard<R> {
    pub fn new(engine: Engine, fields: impl Into<Arc<[Field]>>, resolver: R) -> Self {
        Self {
            engine,
            fields: fields.into(),
            resolver,
        }
    }

    /// Validates `args`, then calls the resolver with the validated (and
    /// possibly transformed) arguments.
    ///
    /// # Errors
    ///
    /// [`ResolverError::BadRequest`] if a field fails,
    /// [`ResolverError::ServerError`] if validation aborts, and
    /// [`ResolverError::Resolver`] for the resolver's own error.
    pub async fn resolve<P, C, I, T, E, F>(
        &self,
        parent: P,
        mut args: Value,
        context: C,
        info: I,
    ) -> Result<T, ResolverError<E>>
    where
        R: Fn(P, Value, C, I) -> F,
        F: Future<Output = Result<T, E>>,
    {
        match self.engine.validate(&mut args, &self.fields).await {
            Ok(Verdict::Pass) => {}
            Ok(Verdict::Fail(_)) => return Err(ResolverError::BadRequest),
            Err(error) => {
                tracing::error!(%error, "resolver argument validation aborted");
                return Err(ResolverError::ServerError);
            }
        }
        (self.resolver)(parent, args, context, info)
            .await
            .map_err(ResolverError::Resolver)
    }
}

impl<R> fmt::Debug for ResolverGuard<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverGuard")
            .field("engine", &self.engine)
            .field("fields", &self.fields.len())
            .finish_non_exhaustive()
    }
}
