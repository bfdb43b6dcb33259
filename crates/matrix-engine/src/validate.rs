//! Shape compatibility checks run before any arithmetic.
use crate::error::MatrixError;
use crate::math::Shape;
use crate::operation::Operation;

/// Check that matrices of `shape_a` and `shape_b` can be combined with `operation`.
///
/// * Add / Subtract need identical shapes.
/// * Multiply needs `cols(A) == rows(B)`.
/// * ScalarMultiply only reads B's (0, 0) cell and accepts any shapes.
///
/// On failure the returned `MatrixError::DimensionMismatch` carries a message
/// meant to be shown to the user verbatim.
pub fn validate(operation: Operation, shape_a: Shape, shape_b: Shape) -> Result<(), MatrixError> {
    let (rows_a, cols_a) = shape_a;
    let (rows_b, cols_b) = shape_b;

    let message = match operation {
        Operation::Add | Operation::Subtract if shape_a != shape_b => Some(format!(
            "For addition and subtraction, both matrices must have the same dimensions \
             (A is {}x{}, B is {}x{})",
            rows_a, cols_a, rows_b, cols_b
        )),
        Operation::Multiply if cols_a != rows_b => Some(format!(
            "For multiplication, columns of A ({}) must equal rows of B ({})",
            cols_a, rows_b
        )),
        _ => None,
    };

    match message {
        Some(message) => {
            log::debug!(
                "{} rejected for A {}x{} and B {}x{}",
                operation,
                rows_a,
                cols_a,
                rows_b,
                cols_b
            );
            Err(MatrixError::DimensionMismatch {
                operation,
                shape_a,
                shape_b,
                message,
            })
        }
        None => Ok(()),
    }
}
