//! Step descriptors: the tagged operations a pipeline walks.

use crate::value::BoxedValue;
use std::fmt;
use std::sync::Arc;

/// A value transform over the erased step currency.
pub(crate) type TransformFn =
    Arc<dyn Fn(BoxedValue) -> Result<BoxedValue, anyhow::Error> + Send + Sync>;

/// A recovery operation consuming the pending error.
pub(crate) type RecoverFn =
    Arc<dyn Fn(anyhow::Error) -> Result<BoxedValue, anyhow::Error> + Send + Sync>;

/// One appended operation descriptor.
///
/// Created exactly once at builder-call time, never mutated, and shared
/// read-only across branched pipelines.
#[derive(Clone)]
pub(crate) enum Step {
    /// A value transform; skipped while the walk is in the error state.
    Transform(TransformFn),
    /// An error handler; inert unless the walk is in the error state.
    Recover(RecoverFn),
}

impl Step {
    /// Short label for tracing events.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Transform(_) => "transform",
            Self::Recover(_) => "recover",
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transform(_) => f.write_str("Step::Transform"),
            Self::Recover(_) => f.write_str("Step::Recover"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_kind_labels() {
        let transform = Step::Transform(Arc::new(|value| Ok(value)));
        let recover = Step::Recover(Arc::new(|error| Err(error)));

        assert_eq!(transform.kind(), "transform");
        assert_eq!(recover.kind(), "recover");
        assert_eq!(format!("{transform:?}"), "Step::Transform");
        assert_eq!(format!("{recover:?}"), "Step::Recover");
    }
}
