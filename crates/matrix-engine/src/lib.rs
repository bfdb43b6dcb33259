//! matrix-engine: dimension validation and arithmetic for small matrices.
//!
//! The crate exposes a dense row-major `Matrix` container, the four
//! supported `Operation`s, a pure `validate` step that checks operand shapes
//! and a `compute` step that produces a new result matrix. `solve` chains
//! the two the way an interactive caller would.
//!
//! Nothing here holds state between calls. Callers own their matrices and
//! pass them by reference; every operation returns a freshly allocated
//! result.
pub mod compute;
pub mod error;
pub mod math;
pub mod operation;
pub mod validate;

pub use compute::{compute, solve};
pub use error::MatrixError;
pub use math::{Matrix, Shape, ShapeError};
pub use operation::Operation;
pub use validate::validate;
