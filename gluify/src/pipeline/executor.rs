//! The synchronous and asynchronous execution engines.
//!
//! Both engines walk the step list in append order with a single
//! `Result<BoxedValue, anyhow::Error>` state and one recovery policy:
//!
//! - error-free: transforms apply, handlers are inert passthroughs
//! - errored: transforms are skipped, the next handler consumes the error;
//!   a successful recovery clears the state, a failed one replaces the
//!   stored error and the search continues at a later handler
//!
//! A failure that survives the walk is returned to the caller untouched.
//! The asynchronous engine additionally resolves each produced value if it
//! is a [`Deferred`](crate::Deferred); suspension happens only at those
//! step boundaries.

use super::builder::Pipeline;
use super::step::Step;
use crate::value::{downcast_value, resolve_value, BoxedValue};
use std::time::Instant;
use tracing::{debug, trace};
use uuid::Uuid;

impl<T: Send + 'static> Pipeline<T> {
    /// Executes the pipeline synchronously.
    ///
    /// The lazy seed producer runs now (and again on every later call; no
    /// memoization), then the steps are walked in append order. Returns the
    /// final value, or the unrecovered failure.
    ///
    /// Deferred values are never resolved here; a pipeline whose steps
    /// yield a [`Deferred`](crate::Deferred) must be executed with
    /// [`run_async`](Self::run_async), otherwise the next typed boundary
    /// fails with
    /// [`UnresolvedDeferredError`](crate::errors::UnresolvedDeferredError).
    pub fn run(&self) -> Result<T, anyhow::Error> {
        let run_id = Uuid::new_v4();
        let start = Instant::now();
        debug!(
            run_id = %run_id,
            pipeline = self.label(),
            steps = self.steps.len(),
            "starting sync run"
        );

        let mut state = self.seed.produce();
        for (index, step) in self.steps.iter().enumerate() {
            state = match (state, step) {
                (Ok(value), Step::Transform(op)) => op(value),
                (Ok(value), Step::Recover(_)) => Ok(value),
                (Err(error), Step::Transform(_)) => Err(error),
                (Err(error), Step::Recover(handler)) => handler(error),
            };
            trace!(
                run_id = %run_id,
                step = index,
                kind = step.kind(),
                errored = state.is_err(),
                "walked step"
            );
        }

        debug!(
            run_id = %run_id,
            pipeline = self.label(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            success = state.is_ok(),
            "sync run finished"
        );
        downcast_result(state)
    }

    /// Executes the pipeline asynchronously.
    ///
    /// Identical walk and recovery policy to [`run`](Self::run), but the
    /// seed production, every transform output, and every handler output is
    /// resolved first if it is a [`Deferred`](crate::Deferred). Synchronous
    /// and asynchronous step functions mix freely.
    pub async fn run_async(&self) -> Result<T, anyhow::Error> {
        let run_id = Uuid::new_v4();
        let start = Instant::now();
        debug!(
            run_id = %run_id,
            pipeline = self.label(),
            steps = self.steps.len(),
            "starting async run"
        );

        let mut state = match self.seed.produce() {
            Ok(value) => resolve_value(value).await,
            Err(error) => Err(error),
        };
        for (index, step) in self.steps.iter().enumerate() {
            state = match (state, step) {
                (Ok(value), Step::Transform(op)) => match op(value) {
                    Ok(output) => resolve_value(output).await,
                    Err(error) => Err(error),
                },
                (Ok(value), Step::Recover(_)) => Ok(value),
                (Err(error), Step::Transform(_)) => Err(error),
                (Err(error), Step::Recover(handler)) => match handler(error) {
                    Ok(output) => resolve_value(output).await,
                    Err(error) => Err(error),
                },
            };
            trace!(
                run_id = %run_id,
                step = index,
                kind = step.kind(),
                errored = state.is_err(),
                "walked step"
            );
        }

        debug!(
            run_id = %run_id,
            pipeline = self.label(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            success = state.is_ok(),
            "async run finished"
        );
        downcast_result(state)
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("anonymous")
    }
}

fn downcast_result<T: Send + 'static>(
    state: Result<BoxedValue, anyhow::Error>,
) -> Result<T, anyhow::Error> {
    match state {
        Ok(value) => downcast_value::<T>(value),
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::super::builder::{gluify, gluify_try};
    use anyhow::anyhow;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_run_walks_transforms_in_order() {
        let result = gluify(|| 5_i32).pipe(|x| x * 2).pipe(|x| x + 10).run();
        assert_eq!(result.unwrap(), 20);
    }

    #[test]
    fn test_run_surfaces_an_unrecovered_failure() {
        let result = gluify_try(|| Err::<i32, _>(anyhow!("boom"))).run();
        assert_eq!(result.unwrap_err().to_string(), "boom");
    }

    #[test]
    fn test_failed_seed_is_recovered_by_a_handler() {
        let result = gluify_try(|| Err::<&str, _>(anyhow!("boom")))
            .catch(|_| "fallback")
            .run();
        assert_eq!(result.unwrap(), "fallback");
    }

    #[test]
    fn test_failed_transform_skips_to_the_handler() {
        let result = gluify(|| 1_i32)
            .pipe_try(|_| Err::<i32, _>(anyhow!("bad step")))
            .pipe(|x| x * 100)
            .catch(|_| 7)
            .pipe(|x| x + 1)
            .run();
        assert_eq!(result.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_run_async_walks_the_same_policy() {
        let result = gluify(|| 1_i32)
            .pipe_try(|_| Err::<i32, _>(anyhow!("bad step")))
            .catch(|_| 7)
            .pipe(|x| x + 1)
            .run_async()
            .await;
        assert_eq!(result.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_run_async_awaits_async_steps() {
        let result = gluify(|| 3_i32)
            .pipe_async(|x| async move { x * 3 })
            .run_async()
            .await;
        assert_eq!(result.unwrap(), 9);
    }
}
