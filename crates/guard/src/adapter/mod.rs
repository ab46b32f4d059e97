//! Boundary adapters.
//!
//! Thin wrappers that run an [`Engine`](crate::Engine) over a fixed field
//! list and translate the outcome into a particular calling convention:
//!
//! - [`Middleware`]: continuation style, `next(None)` or `next(Some(payload))`
//! - [`ContextGuard`]: a request context that can `throw` a status
//! - [`ResolverGuard`]: wraps an async resolver `(parent, args, context, info)`
//!
//! Internal errors never reach the caller as [`Error`](crate::Error) here;
//! they are logged and mapped to a generic server-error signal.

mod continuation;
mod context;
mod resolver;

pub use continuation::Middleware;
pub use context::{ContextGuard, Rejection, RequestContext};
pub use resolver::{ResolverError, ResolverGuard};

/// Payload used when a failed check carried none.
pub const BAD_REQUEST: i64 = 400;

/// Payload used when validation aborted with an internal error.
pub const SERVER_ERROR: i64 = 500;
