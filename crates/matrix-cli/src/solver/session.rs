//! Caller-held solver state.
//!
//! A `SolverSession` is what the interactive surface keeps between user
//! actions: the selected dimensions, both operands, the chosen operation and
//! the outcome of the last calculation. The engine itself is stateless and
//! only ever sees borrowed matrices.
use anyhow::{Context, Result};

use matrix_engine::{solve, Matrix, MatrixError, Operation, Shape};

use crate::solver::input::{check_shape, coerce_cell, CellInput};

/// Which operand a session call refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    A,
    B,
}

impl Operand {
    pub fn name(&self) -> &'static str {
        match self {
            Operand::A => "A",
            Operand::B => "B",
        }
    }
}

/// Solver state for an interactive front end.
///
/// The `matrix-solver` binary builds a session once from its arguments and
/// calls `calculate`. Front ends that edit cells and dimensions between
/// calculations use `set_shape`, `set_cell`, `set_operation` and `clear`.
#[derive(Debug, Clone)]
pub struct SolverSession {
    matrix_a: Matrix<f64>,
    matrix_b: Matrix<f64>,
    operation: Operation,
    result: Option<Matrix<f64>>,
    error: Option<String>,
}

impl Default for SolverSession {
    /// Two 2x2 zero matrices and addition selected.
    fn default() -> Self {
        Self::with_shapes((2, 2), (2, 2), Operation::default())
            .expect("2x2 is a selectable shape")
    }
}

impl SolverSession {
    pub fn with_shapes(shape_a: Shape, shape_b: Shape, operation: Operation) -> Result<Self> {
        Ok(Self {
            matrix_a: zeros(check_shape(shape_a)?)?,
            matrix_b: zeros(check_shape(shape_b)?)?,
            operation,
            result: None,
            error: None,
        })
    }

    pub fn matrix(&self, operand: Operand) -> &Matrix<f64> {
        match operand {
            Operand::A => &self.matrix_a,
            Operand::B => &self.matrix_b,
        }
    }

    fn matrix_mut(&mut self, operand: Operand) -> &mut Matrix<f64> {
        match operand {
            Operand::A => &mut self.matrix_a,
            Operand::B => &mut self.matrix_b,
        }
    }

    pub fn shape(&self, operand: Operand) -> Shape {
        self.matrix(operand).shape()
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn set_operation(&mut self, operation: Operation) {
        self.operation = operation;
    }

    /// Last successful result, kept until the next success or `clear`.
    pub fn result(&self) -> Option<&Matrix<f64>> {
        self.result.as_ref()
    }

    /// Message of the last failed calculation.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Change one operand's dimensions.
    ///
    /// Any dimension change reinitialises both operands to zeros. The last
    /// result and error are left as they are.
    pub fn set_shape(&mut self, operand: Operand, shape: Shape) -> Result<()> {
        check_shape(shape).with_context(|| format!("Cannot resize matrix {}", operand.name()))?;
        let (shape_a, shape_b) = match operand {
            Operand::A => (shape, self.matrix_b.shape()),
            Operand::B => (self.matrix_a.shape(), shape),
        };
        log::debug!(
            "Resizing to A {}x{}, B {}x{}",
            shape_a.0,
            shape_a.1,
            shape_b.0,
            shape_b.1
        );
        self.matrix_a = zeros(shape_a)?;
        self.matrix_b = zeros(shape_b)?;
        Ok(())
    }

    /// Store one raw cell value, coercing it to a number.
    pub fn set_cell(&mut self, operand: Operand, row: usize, col: usize, raw: &str) -> Result<()> {
        let (rows, cols) = self.shape(operand);
        if row >= rows || col >= cols {
            anyhow::bail!(
                "Cell ({}, {}) is outside matrix {} ({}x{})",
                row,
                col,
                operand.name(),
                rows,
                cols
            );
        }
        self.matrix_mut(operand)[(row, col)] = coerce_cell(raw);
        Ok(())
    }

    /// Copy raw rows into an operand, row-major from the top-left cell.
    ///
    /// Cells beyond the operand's shape are ignored and cells not supplied
    /// keep their current value.
    pub fn fill(&mut self, operand: Operand, cells: &[Vec<CellInput>]) {
        let (rows, cols) = self.shape(operand);
        let target = self.matrix_mut(operand);
        for (row, values) in cells.iter().take(rows).enumerate() {
            for (col, cell) in values.iter().take(cols).enumerate() {
                target[(row, col)] = cell.value();
            }
        }
    }

    /// Validate and compute the selected operation.
    ///
    /// On success the result replaces the previous one and the error is
    /// cleared. On failure the error message is stored and the previous
    /// result is kept.
    pub fn calculate(&mut self) -> Result<&Matrix<f64>, MatrixError> {
        self.error = None;
        match solve(self.operation, &self.matrix_a, &self.matrix_b) {
            Ok(result) => Ok(&*self.result.insert(result)),
            Err(e) => {
                log::debug!("Calculation failed: {}", e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Reset both operands to zeros at their current shapes and drop the result and error.
    pub fn clear(&mut self) -> Result<()> {
        self.matrix_a = zeros(self.matrix_a.shape())?;
        self.matrix_b = zeros(self.matrix_b.shape())?;
        self.result = None;
        self.error = None;
        Ok(())
    }
}

fn zeros(shape: Shape) -> Result<Matrix<f64>> {
    Matrix::zeros(shape.0, shape.1)
        .with_context(|| format!("Cannot allocate a {}x{} matrix", shape.0, shape.1))
}
