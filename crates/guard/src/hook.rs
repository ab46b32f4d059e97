//! Lifecycle hooks and value transforms.
//!
//! The engine calls these around each field's rule check. All of them are
//! async traits; the `*_fn` constructors wrap plain closures and the
//! `*_async` constructors wrap closures returning a [`BoxFuture`].
//!
//! | trait | called with | used for |
//! |-------|-------------|----------|
//! | [`Hook`] | `(value, key, root)` | `before`, `after`, `on_fail`, `on_default` |
//! | [`Transform`] | `(value, key, root)` | `transform_before`, `transform_after` |
//! | [`SuccessHook`] | `(root)` | `on_success` |

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::BoxError;

// ============================================================================
// RETURN CONVERSIONS
// ============================================================================

/// What a synchronous hook closure may return: `()` or a `Result`.
pub trait HookOutput {
    fn into_hook_result(self) -> Result<(), BoxError>;
}

impl HookOutput for () {
    fn into_hook_result(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E> HookOutput for Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_hook_result(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}

/// What a synchronous transform closure may return: a value or a `Result`.
pub trait TransformOutput {
    fn into_transformed(self) -> Result<Value, BoxError>;
}

impl TransformOutput for Value {
    fn into_transformed(self) -> Result<Value, BoxError> {
        Ok(self)
    }
}

impl<E> TransformOutput for Result<Value, E>
where
    E: Into<BoxError>,
{
    fn into_transformed(self) -> Result<Value, BoxError> {
        self.map_err(Into::into)
    }
}

// ============================================================================
// HOOK
// ============================================================================

/// Side-effecting callback around a field.
///
/// `value` is `None` when the field is absent from the payload.
#[async_trait]
pub trait Hook: Send + Sync {
    async fn call(&self, value: Option<&Value>, key: &str, root: &Value) -> Result<(), BoxError>;
}

/// Hook backed by a synchronous closure.
pub struct HookFn<F>(F);

#[async_trait]
impl<F, R> Hook for HookFn<F>
where
    F: Fn(Option<&Value>, &str, &Value) -> R + Send + Sync,
    R: HookOutput,
{
    async fn call(&self, value: Option<&Value>, key: &str, root: &Value) -> Result<(), BoxError> {
        (self.0)(value, key, root).into_hook_result()
    }
}

/// Hook backed by a closure returning a boxed future.
pub struct AsyncHookFn<F>(F);

#[async_trait]
impl<F> Hook for AsyncHookFn<F>
where
    F: for<'a> Fn(Option<&'a Value>, &'a str, &'a Value) -> BoxFuture<'a, Result<(), BoxError>>
        + Send
        + Sync,
{
    async fn call(&self, value: Option<&Value>, key: &str, root: &Value) -> Result<(), BoxError> {
        (self.0)(value, key, root).await
    }
}

/// Wraps a synchronous closure as a [`Hook`].
pub fn hook_fn<F, R>(hook: F) -> HookFn<F>
where
    F: Fn(Option<&Value>, &str, &Value) -> R + Send + Sync,
    R: HookOutput,
{
    HookFn(hook)
}

/// Wraps an asynchronous closure as a [`Hook`].
pub fn hook_async<F>(hook: F) -> AsyncHookFn<F>
where
    F: for<'a> Fn(Option<&'a Value>, &'a str, &'a Value) -> BoxFuture<'a, Result<(), BoxError>>
        + Send
        + Sync,
{
    AsyncHookFn(hook)
}

// ============================================================================
// TRANSFORM
// ============================================================================

/// Rewrites a field's value. The result is written back into the payload
/// before the next transform runs.
#[async_trait]
pub trait Transform: Send + Sync {
    async fn apply(&self, value: Value, key: &str, root: &Value) -> Result<Value, BoxError>;
}

/// Transform backed by a synchronous closure.
pub struct TransformFn<F>(F);

#[async_trait]
impl<F, R> Transform for TransformFn<F>
where
    F: Fn(Value, &str, &Value) -> R + Send + Sync,
    R: TransformOutput,
{
    async fn apply(&self, value: Value, key: &str, root: &Value) -> Result<Value, BoxError> {
        (self.0)(value, key, root).into_transformed()
    }
}

/// Transform backed by a closure returning a boxed future.
pub struct AsyncTransformFn<F>(F);

#[async_trait]
impl<F> Transform for AsyncTransformFn<F>
where
    F: for<'a> Fn(Value, &'a str, &'a Value) -> BoxFuture<'a, Result<Value, BoxError>>
        + Send
        + Sync,
{
    async fn apply(&self, value: Value, key: &str, root: &Value) -> Result<Value, BoxError> {
        (self.0)(value, key, root).await
    }
}

/// Wraps a synchronous closure as a [`Transform`].
///
/// ```rust,ignore
/// let trim = transform_fn(|value, _key, _root| match value {
///     Value::String(s) => Value::String(s.trim().to_owned()),
///     other => other,
/// });
/// ```
pub fn transform_fn<F, R>(transform: F) -> TransformFn<F>
where
    F: Fn(Value, &str, &Value) -> R + Send + Sync,
    R: TransformOutput,
{
    TransformFn(transform)
}

/// Wraps an asynchronous closure as a [`Transform`].
pub fn transform_async<F>(transform: F) -> AsyncTransformFn<F>
where
    F: for<'a> Fn(Value, &'a str, &'a Value) -> BoxFuture<'a, Result<Value, BoxError>>
        + Send
        + Sync,
{
    AsyncTransformFn(transform)
}

// ============================================================================
// SUCCESS HOOK
// ============================================================================

/// Called once with the whole payload after every field passed.
#[async_trait]
pub trait SuccessHook: Send + Sync {
    async fn call(&self, root: &Value) -> Result<(), BoxError>;
}

/// Success hook backed by a synchronous closure.
pub struct SuccessFn<F>(F);

#[async_trait]
impl<F, R> SuccessHook for SuccessFn<F>
where
    F: Fn(&Value) -> R + Send + Sync,
    R: HookOutput,
{
    async fn call(&self, root: &Value) -> Result<(), BoxError> {
        (self.0)(root).into_hook_result()
    }
}

/// Success hook backed by a closure returning a boxed future.
pub struct AsyncSuccessFn<F>(F);

#[async_trait]
impl<F> SuccessHook for AsyncSuccessFn<F>
where
    F: for<'a> Fn(&'a Value) -> BoxFuture<'a, Result<(), BoxError>> + Send + Sync,
{
    async fn call(&self, root: &Value) -> Result<(), BoxError> {
        (self.0)(root).await
    }
}

pub fn success_fn<F, R>(hook: F) -> SuccessFn<F>
where
    F: Fn(&Value) -> R + Send + Sync,
    R: HookOutput,
{
    SuccessFn(hook)
}

pub fn success_async<F>(hook: F) -> AsyncSuccessFn<F>
where
    F: for<'a> Fn(&'a Value) -> BoxFuture<'a, Result<(), BoxError>> + Send + Sync,
{
    AsyncSuccessFn(hook)
}
