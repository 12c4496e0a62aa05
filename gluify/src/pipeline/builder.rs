//! The fluent pipeline builder.
//!
//! Every builder operation is pure: it invokes no caller-supplied function,
//! performs no execution, and returns a new [`Pipeline`] whose step list is
//! the previous list plus one appended descriptor. Pipelines clone cheaply
//! (steps are `Arc`-backed), so a shared prefix can feed any number of
//! derived pipelines without interference.

use super::seed::Seed;
use super::step::{RecoverFn, Step, TransformFn};
use crate::value::{downcast_value, resolve_value, BoxedValue, Deferred};
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

/// A lazily-executed chain of transformation steps over a seed value.
///
/// `T` is the *declared* type of the value currently at the end of the
/// chain. Internally the value flows erased; each builder method re-declares
/// the types for its own call site and the erased boundary re-checks them by
/// downcast at execution time.
pub struct Pipeline<T> {
    pub(crate) seed: Seed,
    pub(crate) steps: Vec<Step>,
    pub(crate) name: Option<String>,
    pub(crate) _marker: PhantomData<fn() -> T>,
}

/// Creates a pipeline from a lazily-invoked producer.
///
/// The producer runs once per execution, never at build time; arguments are
/// bound by closure capture.
#[must_use]
pub fn gluify<T, F>(producer: F) -> Pipeline<T>
where
    T: Send + 'static,
    F: Fn() -> T + Send + Sync + 'static,
{
    Pipeline::from_producer(producer)
}

/// Creates a pipeline from a fallible producer.
///
/// An `Err` outcome puts the execution into the error state before any step
/// runs, recoverable by a later [`Pipeline::catch`].
#[must_use]
pub fn gluify_try<T, E, F>(producer: F) -> Pipeline<T>
where
    T: Send + 'static,
    E: Into<anyhow::Error>,
    F: Fn() -> Result<T, E> + Send + Sync + 'static,
{
    Pipeline::from_try_producer(producer)
}

/// Creates a pipeline from an asynchronous producer.
///
/// The produced future is awaited by [`Pipeline::run_async`] before the
/// first step runs.
#[must_use]
pub fn gluify_async<T, Fut, F>(producer: F) -> Pipeline<T>
where
    T: Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
{
    Pipeline::from_async_producer(producer)
}

impl<T: Send + 'static> Pipeline<T> {
    fn with_seed(seed: Seed) -> Self {
        Self {
            seed,
            steps: Vec::new(),
            name: None,
            _marker: PhantomData,
        }
    }

    /// Creates a pipeline seeded with a concrete value, cloned into each
    /// execution.
    #[must_use]
    pub fn of(value: T) -> Self
    where
        T: Clone + Sync,
    {
        Self::with_seed(Seed::Value(Arc::new(move || {
            Box::new(value.clone()) as BoxedValue
        })))
    }

    /// Creates a pipeline from a lazily-invoked producer.
    #[must_use]
    pub fn from_producer<F>(producer: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::with_seed(Seed::Producer(Arc::new(move || {
            Ok(Box::new(producer()) as BoxedValue)
        })))
    }

    /// Creates a pipeline from a fallible producer.
    #[must_use]
    pub fn from_try_producer<E, F>(producer: F) -> Self
    where
        E: Into<anyhow::Error>,
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        Self::with_seed(Seed::Producer(Arc::new(move || {
            producer()
                .map(|value| Box::new(value) as BoxedValue)
                .map_err(Into::into)
        })))
    }

    /// Creates a pipeline from an asynchronous producer.
    #[must_use]
    pub fn from_async_producer<Fut, F>(producer: F) -> Self
    where
        Fut: Future<Output = T> + Send + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
    {
        Self::with_seed(Seed::Producer(Arc::new(move || {
            Ok(Deferred::new(producer()).erase())
        })))
    }

    fn push_transform<B>(self, op: TransformFn) -> Pipeline<B> {
        let Self {
            seed,
            mut steps,
            name,
            ..
        } = self;
        steps.push(Step::Transform(op));
        Pipeline {
            seed,
            steps,
            name,
            _marker: PhantomData,
        }
    }

    fn push_recover(self, op: RecoverFn) -> Self {
        let Self {
            seed,
            mut steps,
            name,
            ..
        } = self;
        steps.push(Step::Recover(op));
        Pipeline {
            seed,
            steps,
            name,
            _marker: PhantomData,
        }
    }

    /// Appends a transform step.
    #[must_use]
    pub fn pipe<B, F>(self, f: F) -> Pipeline<B>
    where
        B: Send + 'static,
        F: Fn(T) -> B + Send + Sync + 'static,
    {
        self.push_transform(Arc::new(move |value: BoxedValue| {
            let input = downcast_value::<T>(value)?;
            Ok(Box::new(f(input)) as BoxedValue)
        }))
    }

    /// Appends a fallible transform step; an `Err` outcome enters the error
    /// state.
    #[must_use]
    pub fn pipe_try<B, E, F>(self, f: F) -> Pipeline<B>
    where
        B: Send + 'static,
        E: Into<anyhow::Error>,
        F: Fn(T) -> Result<B, E> + Send + Sync + 'static,
    {
        self.push_transform(Arc::new(move |value: BoxedValue| {
            let input = downcast_value::<T>(value)?;
            f(input)
                .map(|output| Box::new(output) as BoxedValue)
                .map_err(Into::into)
        }))
    }

    /// Appends an async-aware transform step.
    ///
    /// The step resolves its *input* before calling `f`: if the value
    /// flowing in is itself a [`Deferred`] that nothing has awaited yet, it
    /// is awaited first and only the resolved value is passed on. Plain
    /// transforms skip that input-side resolution; under
    /// [`Pipeline::run_async`] both behave equivalently because the executor
    /// awaits every step's output.
    #[must_use]
    pub fn pipe_async<B, Fut, F>(self, f: F) -> Pipeline<B>
    where
        B: Send + 'static,
        Fut: Future<Output = B> + Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.push_transform(Arc::new(move |value: BoxedValue| {
            let f = Arc::clone(&f);
            Ok(Deferred::from_erased(async move {
                let input = downcast_value::<T>(resolve_value(value).await?)?;
                Ok(Box::new(f(input).await) as BoxedValue)
            })
            .erase())
        }))
    }

    /// Appends an async-aware fallible transform step.
    #[must_use]
    pub fn pipe_try_async<B, E, Fut, F>(self, f: F) -> Pipeline<B>
    where
        B: Send + 'static,
        E: Into<anyhow::Error>,
        Fut: Future<Output = Result<B, E>> + Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.push_transform(Arc::new(move |value: BoxedValue| {
            let f = Arc::clone(&f);
            Ok(Deferred::from_erased(async move {
                let input = downcast_value::<T>(resolve_value(value).await?)?;
                f(input)
                    .await
                    .map(|output| Box::new(output) as BoxedValue)
                    .map_err(Into::into)
            })
            .erase())
        }))
    }

    /// Appends an error handler step.
    ///
    /// Inert while no error is pending; when the walk is in the error state
    /// the first handler after the failing step consumes the error and its
    /// return value clears the state.
    #[must_use]
    pub fn catch<F>(self, handler: F) -> Self
    where
        F: Fn(anyhow::Error) -> T + Send + Sync + 'static,
    {
        self.push_recover(Arc::new(move |error: anyhow::Error| {
            Ok(Box::new(handler(error)) as BoxedValue)
        }))
    }

    /// Appends an error handler whose recovery may itself fail.
    ///
    /// A failed recovery replaces the stored error and the search continues
    /// at a *later* handler, never the same one.
    #[must_use]
    pub fn catch_try<E, F>(self, handler: F) -> Self
    where
        E: Into<anyhow::Error>,
        F: Fn(anyhow::Error) -> Result<T, E> + Send + Sync + 'static,
    {
        self.push_recover(Arc::new(move |error: anyhow::Error| {
            handler(error)
                .map(|output| Box::new(output) as BoxedValue)
                .map_err(Into::into)
        }))
    }

    /// Appends an asynchronous error handler step.
    #[must_use]
    pub fn catch_async<Fut, F>(self, handler: F) -> Self
    where
        Fut: Future<Output = T> + Send + 'static,
        F: Fn(anyhow::Error) -> Fut + Send + Sync + 'static,
    {
        self.push_recover(Arc::new(move |error: anyhow::Error| {
            Ok(Deferred::new(handler(error)).erase())
        }))
    }

    /// Appends a fallback-value handler: any pending error is replaced by a
    /// clone of `fallback`.
    #[must_use]
    pub fn or(self, fallback: T) -> Self
    where
        T: Clone + Sync,
    {
        self.catch(move |_| fallback.clone())
    }

    /// Appends a side-effect step; the value flows through unchanged.
    #[must_use]
    pub fn tap<F>(self, f: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.pipe(move |value| {
            f(&value);
            value
        })
    }

    /// Appends a fallible side-effect step.
    ///
    /// A failure in `f` enters the error state exactly like a transform
    /// failure; on success the value flows through unchanged.
    #[must_use]
    pub fn tap_try<E, F>(self, f: F) -> Self
    where
        E: Into<anyhow::Error>,
        F: Fn(&T) -> Result<(), E> + Send + Sync + 'static,
    {
        self.pipe_try(move |value| -> Result<T, E> {
            f(&value)?;
            Ok(value)
        })
    }

    /// Appends a conditional transform: `f` is applied only when the
    /// predicate holds, otherwise the value flows through unchanged.
    #[must_use]
    pub fn when<P, F>(self, predicate: P, f: F) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.pipe(move |value| if predicate(&value) { f(value) } else { value })
    }

    /// Sets the pipeline label used in tracing events. Appends no step.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the pipeline label, if one was set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the number of appended steps.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if no steps have been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Pipeline<Deferred> {
    /// Re-declares the pipeline's value type as the deferred result's type.
    ///
    /// When a plain transform returns a [`Deferred`], the asynchronous
    /// executor resolves it before the next step runs; this method records
    /// that at the type level without appending a step. Naming the wrong
    /// type here surfaces as a
    /// [`TypeMismatchError`](crate::errors::TypeMismatchError) at the next
    /// typed boundary.
    #[must_use]
    pub fn resolved<U: Send + 'static>(self) -> Pipeline<U> {
        let Self {
            seed, steps, name, ..
        } = self;
        Pipeline {
            seed,
            steps,
            name,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for Pipeline<T> {
    fn clone(&self) -> Self {
        Self {
            seed: self.seed.clone(),
            steps: self.steps.clone(),
            name: self.name.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Pipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("seed", &self.seed)
            .field("steps", &self.steps.len())
            .field("name", &self.name)
            .finish()
    }
}
