//! # Gluify
//!
//! A fluent, lazily-executed value pipeline with inline error recovery.
//!
//! Gluify lets a caller compose a chain of transformation steps over a
//! lazily-produced seed value and defer every invocation until an execution
//! entry point is called:
//!
//! - **Deferred execution**: building a pipeline invokes nothing; the seed
//!   producer and every step run only inside [`Pipeline::run`] or
//!   [`Pipeline::run_async`]
//! - **Dual executors**: the same step list can be walked synchronously or
//!   with every step output awaited, so sync and async steps mix freely
//! - **Inline recovery**: `catch` steps are inert until a failure occurs,
//!   then the first one after the failing step consumes the error
//! - **Branching**: pipelines clone cheaply; a shared prefix can feed any
//!   number of derived pipelines without interference
//! - **Convenience catalog**: array, object, string, and general
//!   transforms, each a thin adapter over `pipe`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gluify::gluify;
//!
//! let value = gluify(|| 5)
//!     .pipe(|x| x * 2)
//!     .pipe(|x| x + 10)
//!     .run()?;
//! assert_eq!(value, 20);
//!
//! let recovered = gluify(|| fetch_config())
//!     .pipe(|config| config.timeout)
//!     .or(Duration::from_secs(30))
//!     .run()?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod errors;
pub mod pipeline;
mod transforms;
pub mod value;

pub use pipeline::{gluify, gluify_async, gluify_try, Pipeline};
pub use value::Deferred;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::{TypeMismatchError, UnresolvedDeferredError};
    pub use crate::pipeline::{gluify, gluify_async, gluify_try, Pipeline};
    pub use crate::value::{BoxedValue, Deferred};
}
