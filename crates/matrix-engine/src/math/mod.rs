//! Small dense matrix type used throughout the crate.
//!
//! `Matrix` is a row-major container with just enough convenience methods
//! for the arithmetic in `compute`. It is intentionally dependency-light so
//! callers can build one from nested rows or a flat buffer.
pub mod matrix;

pub use matrix::{Matrix, Shape, ShapeError};
