//! Matrix arithmetic for the four supported operations.
use num_traits::Num;

use crate::error::MatrixError;
use crate::math::Matrix;
use crate::operation::Operation;
use crate::validate::validate;

/// Apply `operation` to `a` and `b`, returning a new matrix.
///
/// Shapes must already have passed [`validate`]. Operands that would not
/// pass are rejected with `MatrixError::InvalidOperands` before any cell is
/// touched.
///
/// For `ScalarMultiply` the scalar is `b[(0, 0)]`, or zero when B has no
/// such cell, and the result has A's shape.
pub fn compute<T>(operation: Operation, a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>, MatrixError>
where
    T: Copy + Num,
{
    if validate(operation, a.shape(), b.shape()).is_err() {
        return Err(MatrixError::InvalidOperands {
            operation,
            shape_a: a.shape(),
            shape_b: b.shape(),
        });
    }

    let result = match operation {
        Operation::Add => a.zip_with(b, |&x, &y| x + y),
        Operation::Subtract => a.zip_with(b, |&x, &y| x - y),
        Operation::Multiply => multiply(a, b),
        Operation::ScalarMultiply => {
            let scalar = b.get(0, 0).copied().unwrap_or_else(T::zero);
            a.mapv(|&x| x * scalar)
        }
    };

    log::debug!(
        "{} of {}x{} and {}x{} produced {}x{}",
        operation,
        a.nrows(),
        a.ncols(),
        b.nrows(),
        b.ncols(),
        result.nrows(),
        result.ncols()
    );

    Ok(result)
}

/// Validate then compute; the single entry point an interactive caller needs.
pub fn solve<T>(operation: Operation, a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>, MatrixError>
where
    T: Copy + Num,
{
    validate(operation, a.shape(), b.shape())?;
    compute(operation, a, b)
}

// Row, column, then k innermost; each cell starts at zero.
fn multiply<T>(a: &Matrix<T>, b: &Matrix<T>) -> Matrix<T>
where
    T: Copy + Num,
{
    let (rows_a, cols_a) = a.shape();
    let cols_b = b.ncols();

    let mut data = Vec::with_capacity(rows_a * cols_b);
    for i in 0..rows_a {
        for j in 0..cols_b {
            let mut acc = T::zero();
            for k in 0..cols_a {
                acc = acc + a[(i, k)] * b[(k, j)];
            }
            data.push(acc);
        }
    }

    Matrix::from_raw_parts((rows_a, cols_b), data)
}
