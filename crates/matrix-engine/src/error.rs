use std::error::Error;
use std::fmt;

use crate::math::Shape;
use crate::operation::Operation;

/// Failures reported by `validate` and `compute`.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// The operand shapes do not suit the operation. Safe to show to a user as-is.
    DimensionMismatch {
        operation: Operation,
        shape_a: Shape,
        shape_b: Shape,
        message: String,
    },
    /// `compute` was called with operands that never passed validation.
    InvalidOperands {
        operation: Operation,
        shape_a: Shape,
        shape_b: Shape,
    },
}

impl MatrixError {
    pub fn operation(&self) -> Operation {
        match self {
            MatrixError::DimensionMismatch { operation, .. }
            | MatrixError::InvalidOperands { operation, .. } => *operation,
        }
    }

    pub fn shapes(&self) -> (Shape, Shape) {
        match self {
            MatrixError::DimensionMismatch {
                shape_a, shape_b, ..
            }
            | MatrixError::InvalidOperands {
                shape_a, shape_b, ..
            } => (*shape_a, *shape_b),
        }
    }

    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, MatrixError::DimensionMismatch { .. })
    }
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatrixError::DimensionMismatch { message, .. } => f.write_str(message),
            MatrixError::InvalidOperands {
                operation,
                shape_a,
                shape_b,
            } => write!(
                f,
                "Invalid operands for {}: A is {}x{}, B is {}x{}",
                operation, shape_a.0, shape_a.1, shape_b.0, shape_b.1
            ),
        }
    }
}

impl Error for MatrixError {}
