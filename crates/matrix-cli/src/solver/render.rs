//! Plain-text rendering of matrices and calculation outcomes.
use matrix_engine::{Matrix, Operation};

/// Fixed two-decimal rendering used for every displayed cell.
pub fn format_number(value: f64) -> String {
    // Negative zero prints as "0.00".
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.2}", value)
}

/// Render a matrix one row per line, cells right-aligned to a common width.
pub fn render_matrix(matrix: &Matrix<f64>) -> String {
    let cells: Vec<String> = matrix.as_slice().iter().map(|&v| format_number(v)).collect();
    let width = cells.iter().map(String::len).max().unwrap_or(0);

    cells
        .chunks(matrix.ncols())
        .map(|row| {
            row.iter()
                .map(|cell| format!("{:>width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Heading plus body for a named matrix, e.g. `Result (2x2):`.
pub fn render_titled(title: &str, matrix: &Matrix<f64>) -> String {
    let (rows, cols) = matrix.shape();
    format!("{} ({}x{}):\n{}", title, rows, cols, render_matrix(matrix))
}

/// Full report of a calculation with both operands.
pub fn render_report(
    operation: Operation,
    a: &Matrix<f64>,
    b: &Matrix<f64>,
    result: &Matrix<f64>,
) -> String {
    let b_section = match operation {
        Operation::ScalarMultiply => format!(
            "Scalar: {}",
            format_number(b.get(0, 0).copied().unwrap_or(0.0))
        ),
        _ => render_titled("Matrix B", b),
    };
    format!(
        "{}\n\n{}\n\nOperation: {}\n\n{}",
        render_titled("Matrix A", a),
        b_section,
        operation.label(),
        render_titled("Result", result)
    )
}
