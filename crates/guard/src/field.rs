//! Field declarations.

use std::fmt;
use std::sync::Arc;

use crate::chain::Handler;
use crate::hook::{Hook, Transform};
use crate::path::FieldPath;

/// One entry of the list passed to [`Engine::validate`](crate::Engine::validate):
/// where the value lives, how to check it, and per-field hooks.
///
/// Field hooks run after the engine-wide hooks of the same stage; they add
/// to them rather than replacing them.
///
/// ```rust,ignore
/// let fields = [
///     Field::new("user.name", string().min(1)),
///     Field::new("user.age", integer().min(0).optional())
///         .transform_before(transform_fn(|v, _, _| coerce_number(v))),
/// ];
/// ```
#[derive(Clone)]
pub struct Field {
    path: FieldPath,
    handler: Handler,
    before: Option<Arc<dyn Hook>>,
    after: Option<Arc<dyn Hook>>,
    transform_before: Vec<Arc<dyn Transform>>,
    transform_after: Vec<Arc<dyn Transform>>,
}

impl Field {
    pub fn new(path: impl Into<FieldPath>, handler: impl Into<Handler>) -> Self {
        Self {
            path: path.into(),
            handler: handler.into(),
            before: None,
            after: None,
            transform_before: Vec::new(),
            transform_after: Vec::new(),
        }
    }

    /// Hook run before the presence check.
    #[must_use]
    pub fn before(mut self, hook: impl Hook + 'static) -> Self {
        self.before = Some(Arc::new(hook));
        self
    }

    /// Hook run after the post-check transforms.
    #[must_use]
    pub fn after(mut self, hook: impl Hook + 'static) -> Self {
        self.after = Some(Arc::new(hook));
        self
    }

    /// Adds a transform applied before the rule check. Repeatable; runs in
    /// the order added.
    #[must_use]
    pub fn transform_before(mut self, transform: impl Transform + 'static) -> Self {
        self.transform_before.push(Arc::new(transform));
        self
    }

    /// Adds a transform applied after a passing rule check.
    #[must_use]
    pub fn transform_after(mut self, transform: impl Transform + 'static) -> Self {
        self.transform_after.push(Arc::new(transform));
        self
    }

    #[must_use]
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// The dotted path, passed as `key` to rules and hooks.
    #[must_use]
    pub fn key(&self) -> &str {
        self.path.as_str()
    }

    #[must_use]
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub(crate) fn before_hook(&self) -> Option<&dyn Hook> {
        self.before.as_deref()
    }

    pub(crate) fn after_hook(&self) -> Option<&dyn Hook> {
        self.after.as_deref()
    }

    pub(crate) fn transforms_before(&self) -> &[Arc<dyn Transform>] {
        &self.transform_before
    }

    pub(crate) fn transforms_after(&self) -> &[Arc<dyn Transform>] {
        &self.transform_after
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("path", &self.path)
            .field("handler", &self.handler)
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .field("transform_before", &self.transform_before.len())
            .field("transform_after", &self.transform_after.len())
            .finish()
    }
}
