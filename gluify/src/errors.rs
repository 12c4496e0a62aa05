//! Error types for the gluify engine.
//!
//! Caller-supplied functions fail with whatever error type they like; those
//! failures flow through the engine as opaque [`anyhow::Error`] values and
//! surface to the caller untouched. The types in this module cover the only
//! failure modes the engine itself can introduce: a value crossing an erased
//! step boundary that does not match the type the call site declared, and a
//! deferred value reaching a consumer that cannot await it. Both are raised
//! as ordinary step failures, so a `catch` step can recover from them like
//! any other error.

use thiserror::Error;

/// Error raised when the value flowing into an erased step boundary is not
/// of the type the builder call site declared.
///
/// The declared type on a [`Pipeline`](crate::Pipeline) is checked by
/// downcast each time the erased value is handed to a typed function. The
/// check can only fail after an explicit re-declaration such as
/// [`Pipeline::resolved`](crate::Pipeline::resolved) named the wrong type.
#[derive(Debug, Clone, Error)]
#[error("pipeline value was not of the declared type (expected {expected})")]
pub struct TypeMismatchError {
    /// The type name the call site declared.
    pub expected: &'static str,
}

impl TypeMismatchError {
    /// Creates a new type mismatch error.
    #[must_use]
    pub fn new(expected: &'static str) -> Self {
        Self { expected }
    }
}

/// Error raised when a still-deferred value reaches a consumer that cannot
/// await it.
///
/// This happens when a pipeline containing a [`Deferred`](crate::Deferred)
/// result is walked by the synchronous executor, which never resolves
/// deferred values. Such pipelines must be executed with
/// [`Pipeline::run_async`](crate::Pipeline::run_async).
#[derive(Debug, Clone, Error)]
#[error("pipeline value is still deferred; only `run_async` can resolve it")]
pub struct UnresolvedDeferredError;
