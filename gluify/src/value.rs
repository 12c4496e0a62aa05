//! The erased value currency and the deferred-result abstraction.
//!
//! Internally every step operates on a single homogeneous value type,
//! [`BoxedValue`]; the public builder methods recover the caller's declared
//! types at their own signatures. Asynchronous results travel through the
//! same currency as [`Deferred`] values, detected by downcast and awaited
//! only by the asynchronous executor.

use crate::errors::{TypeMismatchError, UnresolvedDeferredError};
use futures::future::BoxFuture;
use std::any::Any;
use std::fmt;
use std::future::Future;

/// The erased value flowing between steps.
pub type BoxedValue = Box<dyn Any + Send>;

/// A deferred pipeline value: a boxed future the asynchronous executor
/// resolves before the next step runs.
///
/// A plain transform may return a `Deferred` to yield an unresolved
/// asynchronous result mid-pipeline; under
/// [`Pipeline::run_async`](crate::Pipeline::run_async) the executor awaits
/// it before walking on. The synchronous executor never resolves deferred
/// values; a pipeline that produces one must be executed asynchronously.
pub struct Deferred {
    future: BoxFuture<'static, Result<BoxedValue, anyhow::Error>>,
}

impl Deferred {
    /// Wraps a future producing a plain value.
    #[must_use]
    pub fn new<T, Fut>(future: Fut) -> Self
    where
        T: Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        Self {
            future: Box::pin(async move { Ok(Box::new(future.await) as BoxedValue) }),
        }
    }

    /// Wraps a future producing a fallible value; an `Err` outcome rejects
    /// the deferred and enters the pipeline's error state when resolved.
    #[must_use]
    pub fn try_new<T, E, Fut>(future: Fut) -> Self
    where
        T: Send + 'static,
        E: Into<anyhow::Error>,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            future: Box::pin(async move {
                future
                    .await
                    .map(|value| Box::new(value) as BoxedValue)
                    .map_err(Into::into)
            }),
        }
    }

    /// Wraps an already-erased future.
    pub(crate) fn from_erased<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = Result<BoxedValue, anyhow::Error>> + Send + 'static,
    {
        Self {
            future: Box::pin(future),
        }
    }

    /// Erases this deferred into the step value currency.
    pub(crate) fn erase(self) -> BoxedValue {
        Box::new(self)
    }

    /// Awaits the wrapped future.
    pub(crate) async fn resolve(self) -> Result<BoxedValue, anyhow::Error> {
        self.future.await
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Deferred")
    }
}

/// Awaits `value` if it is a [`Deferred`], otherwise returns it unchanged.
///
/// Resolution loops so a deferred that yields another deferred settles to a
/// concrete value, matching await semantics.
pub(crate) async fn resolve_value(value: BoxedValue) -> Result<BoxedValue, anyhow::Error> {
    let mut value = value;
    loop {
        match value.downcast::<Deferred>() {
            Ok(deferred) => value = deferred.resolve().await?,
            Err(concrete) => return Ok(concrete),
        }
    }
}

/// Recovers the declared type from the erased value.
///
/// A still-deferred value is reported as [`UnresolvedDeferredError`] rather
/// than a plain mismatch, since it means a synchronous consumer walked a
/// pipeline that needed `run_async`.
pub(crate) fn downcast_value<T: Any>(value: BoxedValue) -> Result<T, anyhow::Error> {
    match value.downcast::<T>() {
        Ok(value) => Ok(*value),
        Err(value) if value.is::<Deferred>() => Err(UnresolvedDeferredError.into()),
        Err(_) => Err(TypeMismatchError::new(std::any::type_name::<T>()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_value_passes_concrete_values_through() {
        let value: BoxedValue = Box::new(7_i32);
        let resolved = tokio_test::block_on(resolve_value(value)).unwrap();
        assert_eq!(downcast_value::<i32>(resolved).unwrap(), 7);
    }

    #[test]
    fn test_resolve_value_awaits_a_deferred() {
        let value = Deferred::new(async { "hello".to_string() }).erase();
        let resolved = tokio_test::block_on(resolve_value(value)).unwrap();
        assert_eq!(downcast_value::<String>(resolved).unwrap(), "hello");
    }

    #[test]
    fn test_resolve_value_settles_nested_deferreds() {
        let value = Deferred::new(async { Deferred::new(async { 3_u64 }) }).erase();
        let resolved = tokio_test::block_on(resolve_value(value)).unwrap();
        assert_eq!(downcast_value::<u64>(resolved).unwrap(), 3);
    }

    #[test]
    fn test_rejected_deferred_surfaces_its_error() {
        let value = Deferred::try_new(async { Err::<i32, _>(anyhow::anyhow!("rejected")) }).erase();
        let err = tokio_test::block_on(resolve_value(value)).unwrap_err();
        assert_eq!(err.to_string(), "rejected");
    }

    #[test]
    fn test_downcast_value_reports_mismatch() {
        let value: BoxedValue = Box::new(1_i32);
        let err = downcast_value::<String>(value).unwrap_err();
        assert!(err.downcast_ref::<crate::errors::TypeMismatchError>().is_some());
    }

    #[test]
    fn test_downcast_value_reports_unresolved_deferred() {
        let value = Deferred::new(async { 1_i32 }).erase();
        let err = downcast_value::<i32>(value).unwrap_err();
        assert!(err.downcast_ref::<crate::errors::UnresolvedDeferredError>().is_some());
    }
}
