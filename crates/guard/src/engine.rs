//! Validation engine.
//!
//! Runs an ordered list of [`Field`] declarations against a mutable JSON
//! payload. For each field, in declaration order:
//!
//! 1. read the value at the field's path
//! 2. `before` hooks (engine-wide, then the field's)
//! 3. absent and required: `on_fail`, stop with a bare failure
//! 4. absent and optional: write the default if there is one, call
//!    `on_default`, and move on to the next field without checking
//! 5. `transform_before` transforms, each result written back
//! 6. rule check; a failure calls `on_fail` and stops the run
//! 7. `transform_after` transforms, each result written back
//! 8. `after` hooks
//!
//! Once every field has passed, `on_success` is called with the payload.
//! Every step is awaited before the next one starts.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{Error, Stage};
use crate::field::Field;
use crate::hook::{Hook, SuccessHook, Transform};
use crate::path::{self, FieldPath};
use crate::verdict::Verdict;

// ============================================================================
// OPTIONS
// ============================================================================

/// Engine-wide hooks, fixed at construction.
///
/// Unset hooks are no-ops and empty transform lists leave values untouched.
#[derive(Clone, Default)]
pub struct Options {
    before: Option<Arc<dyn Hook>>,
    after: Option<Arc<dyn Hook>>,
    transform_before: Vec<Arc<dyn Transform>>,
    transform_after: Vec<Arc<dyn Transform>>,
    on_success: Option<Arc<dyn SuccessHook>>,
    on_fail: Option<Arc<dyn Hook>>,
    on_default: Option<Arc<dyn Hook>>,
}

impl Options {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .field("transform_before", &self.transform_before.len())
            .field("transform_after", &self.transform_after.len())
            .field("on_success", &self.on_success.is_some())
            .field("on_fail", &self.on_fail.is_some())
            .field("on_default", &self.on_default.is_some())
            .finish()
    }
}

/// Builder for [`Engine`] and [`Options`].
///
/// ```rust,ignore
/// let engine = Engine::builder()
///     .transform_before(transform_fn(trim_strings))
///     .on_fail(hook_fn(|value, key, _root| tracing::info!(key, ?value, "rejected")))
///     .build();
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing unless built"]
pub struct EngineBuilder {
    options: Options,
}

impl EngineBuilder {
    /// Hook run for every field before its presence check.
    pub fn before(mut self, hook: impl Hook + 'static) -> Self {
        self.options.before = Some(Arc::new(hook));
        self
    }

    /// Hook run for every field that passed, after its transforms.
    pub fn after(mut self, hook: impl Hook + 'static) -> Self {
        self.options.after = Some(Arc::new(hook));
        self
    }

    /// Adds a transform applied to every present field before its check.
    /// Repeatable; transforms run in the order added, ahead of field ones.
    pub fn transform_before(mut self, transform: impl Transform + 'static) -> Self {
        self.options.transform_before.push(Arc::new(transform));
        self
    }

    /// Adds a transform applied to every field after a passing check.
    pub fn transform_after(mut self, transform: impl Transform + 'static) -> Self {
        self.options.transform_after.push(Arc::new(transform));
        self
    }

    /// Called once with the payload when every field passed.
    pub fn on_success(mut self, hook: impl SuccessHook + 'static) -> Self {
        self.options.on_success = Some(Arc::new(hook));
        self
    }

    /// Called with the offending value when a field is missing or fails.
    pub fn on_fail(mut self, hook: impl Hook + 'static) -> Self {
        self.options.on_fail = Some(Arc::new(hook));
        self
    }

    /// Called with the written value when a default is applied.
    pub fn on_default(mut self, hook: impl Hook + 'static) -> Self {
        self.options.on_default = Some(Arc::new(hook));
        self
    }

    /// Finishes with the options alone, for [`Engine::set_options`].
    #[must_use]
    pub fn into_options(self) -> Options {
        self.options
    }

    #[must_use]
    pub fn build(self) -> Engine {
        Engine::with_options(self.options)
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Runs field declarations against a payload.
///
/// Cloning is cheap; clones share the same options.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: Arc<Options>,
}

impl Engine {
    /// An engine without hooks or transforms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    #[must_use]
    pub fn with_options(options: Options) -> Self {
        Self {
            options: Arc::new(options),
        }
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replaces the engine-wide hooks. Clones made earlier keep the old ones.
    pub fn set_options(&mut self, options: Options) {
        self.options = Arc::new(options);
    }

    /// Validates `root` against `fields`, stopping at the first failure.
    ///
    /// Transforms and defaults are written into `root` as they are applied,
    /// so on failure `root` holds whatever was written up to that point.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] when a hook, transform or rule raises an error, or
    /// when a transformed or default value cannot be written at its path.
    /// A failed check is not an error: it is `Ok(Verdict::Fail(..))`.
    #[tracing::instrument(skip_all, fields(field_count = fields.len()))]
    pub async fn validate(&self, root: &mut Value, fields: &[Field]) -> Result<Verdict, Error> {
        for field in fields {
            let verdict = self.validate_field(root, field).await?;
            if verdict.is_fail() {
                return Ok(verdict);
            }
        }

        if let Some(hook) = &self.options.on_success {
            hook.call(root)
                .await
                .map_err(|source| Error::hook(Stage::OnSuccess, "", source))?;
        }
        trace!("all fields passed");
        Ok(Verdict::Pass)
    }

    async fn validate_field(&self, root: &mut Value, field: &Field) -> Result<Verdict, Error> {
        let options = &*self.options;
        let key = field.key();
        let handler = field.handler();
        let current = path::get(root, field.path()).cloned();

        call_hook(Stage::Before, options.before.as_deref(), current.as_ref(), key, root).await?;
        call_hook(Stage::Before, field.before_hook(), current.as_ref(), key, root).await?;

        let Some(value) = current else {
            if !handler.is_optional() {
                debug!(key, "required field is missing");
                call_hook(Stage::OnFail, options.on_fail.as_deref(), None, key, root).await?;
                return Ok(Verdict::fail());
            }

            match handler.get_default(root) {
                Some(default) => {
                    path::set(root, field.path(), default.clone())?;
                    debug!(key, value = %default, "default applied");
                    call_hook(Stage::OnDefault, options.on_default.as_deref(), Some(&default), key, root)
                        .await?;
                }
                None => trace!(key, "optional field absent, skipped"),
            }
            return Ok(Verdict::Pass);
        };

        let value = apply_transforms(
            Stage::TransformBefore,
            options.transform_before.iter().chain(field.transforms_before()),
            value,
            root,
            field.path(),
        )
        .await?;

        let verdict = handler
            .check(&value, key, root)
            .await
            .map_err(|source| Error::rule(key, source))?;
        if verdict.is_fail() {
            debug!(key, %verdict, "field failed");
            call_hook(Stage::OnFail, options.on_fail.as_deref(), Some(&value), key, root).await?;
            return Ok(verdict);
        }

        let value = apply_transforms(
            Stage::TransformAfter,
            options.transform_after.iter().chain(field.transforms_after()),
            value,
            root,
            field.path(),
        )
        .await?;

        call_hook(Stage::After, options.after.as_deref(), Some(&value), key, root).await?;
        call_hook(Stage::After, field.after_hook(), Some(&value), key, root).await?;

        trace!(key, "field passed");
        Ok(Verdict::Pass)
    }
}

async fn call_hook(
    stage: Stage,
    hook: Option<&dyn Hook>,
    value: Option<&Value>,
    key: &str,
    root: &Value,
) -> Result<(), Error> {
    if let Some(hook) = hook {
        hook.call(value, key, root)
            .await
            .map_err(|source| Error::hook(stage, key, source))?;
    }
    Ok(())
}

/// Threads `value` through `transforms`, writing each result back at `path`
/// so the next transform sees it in `root` as well.
async fn apply_transforms<'t>(
    stage: Stage,
    transforms: impl Iterator<Item = &'t Arc<dyn Transform>> + Send,
    mut value: Value,
    root: &mut Value,
    path: &FieldPath,
) -> Result<Value, Error> {
    let key = path.as_str();
    for transform in transforms {
        value = transform
            .apply(value, key, root)
            .await
            .map_err(|source| Error::hook(stage, key, source))?;
        path::set(root, path, value.clone())?;
    }
    Ok(value)
}
