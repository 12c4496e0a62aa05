//! Convenience transform catalog.
//!
//! Thin adapters over [`Pipeline::pipe`](crate::Pipeline::pipe) and
//! [`Pipeline::pipe_try`](crate::Pipeline::pipe_try), grouped by the shape
//! of the value they operate on. Each method encodes the declared
//! input/output types at its own signature and carries no semantics beyond
//! the wrapped native operation.

mod array;
mod general;
mod object;
mod string;
