//! Pipeline building and execution.
//!
//! This module provides:
//! - The seed and step descriptors a pipeline is made of
//! - The fluent builder, whose every call returns a new pipeline
//! - The synchronous and asynchronous execution engines

mod builder;
mod executor;
mod seed;
mod step;


pub use builder::{gluify, gluify_async, gluify_try, Pipeline};
