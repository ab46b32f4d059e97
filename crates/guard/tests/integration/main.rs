//! Integration tests for nebula-guard.

#[cfg(feature = "adapters")]
mod adapters;
mod errors;
mod lifecycle;
mod support;
mod transforms;
