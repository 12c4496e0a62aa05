//! Seed representation: the pipeline's starting value.

use crate::value::BoxedValue;
use std::fmt;
use std::sync::Arc;

/// Produces the starting value for one execution; may fail.
pub(crate) type ProduceFn = Arc<dyn Fn() -> Result<BoxedValue, anyhow::Error> + Send + Sync>;

/// Clones a concrete starting value into one execution.
pub(crate) type CloneValueFn = Arc<dyn Fn() -> BoxedValue + Send + Sync>;

/// The starting value of a pipeline.
///
/// Either a concrete value cloned into each execution, or a lazy producer
/// invoked at most once per execution and never at build time. Executions
/// never share a produced value; re-running a pipeline invokes the producer
/// again.
#[derive(Clone)]
pub(crate) enum Seed {
    /// A concrete starting value.
    Value(CloneValueFn),
    /// A lazily-invoked producer.
    Producer(ProduceFn),
}

impl Seed {
    /// Obtains the starting value for one execution.
    pub(crate) fn produce(&self) -> Result<BoxedValue, anyhow::Error> {
        match self {
            Self::Value(clone_value) => Ok(clone_value()),
            Self::Producer(producer) => producer(),
        }
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(_) => f.write_str("Seed::Value"),
            Self::Producer(_) => f.write_str("Seed::Producer"),
        }
    }
}
