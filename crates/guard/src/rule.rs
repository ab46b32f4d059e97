//! The single-check abstraction that rule chains are made of.

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::BoxError;
use crate::verdict::{IntoVerdict, Verdict};

/// A single pass/fail test over one field's value.
///
/// Receives the field value, the field key (its dotted path) and the whole
/// payload, so rules can look at sibling fields.
#[async_trait]
pub trait Rule: Send + Sync {
    async fn check(&self, value: &Value, key: &str, root: &Value) -> Result<Verdict, BoxError>;
}

/// Rule backed by a synchronous closure.
pub struct RuleFn<F>(F);

#[async_trait]
impl<F, R> Rule for RuleFn<F>
where
    F: Fn(&Value, &str, &Value) -> R + Send + Sync,
    R: IntoVerdict,
{
    async fn check(&self, value: &Value, key: &str, root: &Value) -> Result<Verdict, BoxError> {
        (self.0)(value, key, root).into_verdict()
    }
}

/// Rule backed by a closure returning a boxed future.
pub struct AsyncRuleFn<F>(F);

#[async_trait]
impl<F> Rule for AsyncRuleFn<F>
where
    F: for<'a> Fn(&'a Value, &'a str, &'a Value) -> BoxFuture<'a, Result<Verdict, BoxError>>
        + Send
        + Sync,
{
    async fn check(&self, value: &Value, key: &str, root: &Value) -> Result<Verdict, BoxError> {
        (self.0)(value, key, root).await
    }
}

/// Wraps a synchronous predicate as a [`Rule`].
pub fn rule_fn<F, R>(predicate: F) -> RuleFn<F>
where
    F: Fn(&Value, &str, &Value) -> R + Send + Sync,
    R: IntoVerdict,
{
    RuleFn(predicate)
}

/// Wraps an asynchronous predicate as a [`Rule`].
///
/// ```rust,ignore
/// let unique = rule_async(|value, _key, _root| Box::pin(async move {
///     Ok(Verdict::from(!users.exists(value.as_str().unwrap_or_default()).await))
/// }));
/// ```
pub fn rule_async<F>(predicate: F) -> AsyncRuleFn<F>
where
    F: for<'a> Fn(&'a Value, &'a str, &'a Value) -> BoxFuture<'a, Result<Verdict, BoxError>>
        + Send
        + Sync,
{
    AsyncRuleFn(predicate)
}

/// Rule that checks the value alone; used for the built-in constraints.
pub(crate) struct Predicate<F>(pub(crate) F);

#[async_trait]
impl<F> Rule for Predicate<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    async fn check(&self, value: &Value, _key: &str, _root: &Value) -> Result<Verdict, BoxError> {
        Ok(Verdict::from((self.0)(value)))
    }
}
