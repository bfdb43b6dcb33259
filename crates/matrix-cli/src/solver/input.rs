//! Raw user input handling: cell coercion, matrix literals and shapes.
//!
//! The engine requires well-formed numeric matrices. Everything lenient
//! about user input (blank cells, stray characters, out-of-range sizes)
//! is resolved here before a matrix is built.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use matrix_engine::Shape;

/// Smallest rows/cols value a user can select.
pub const MIN_DIMENSION: usize = 1;
/// Largest rows/cols value a user can select.
pub const MAX_DIMENSION: usize = 5;

/// One cell as supplied by a user or a config file, before coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellInput {
    Number(f64),
    Text(String),
}

impl CellInput {
    pub fn value(&self) -> f64 {
        match self {
            CellInput::Number(v) if v.is_nan() => 0.0,
            CellInput::Number(v) => *v,
            CellInput::Text(s) => coerce_cell(s),
        }
    }
}

impl From<f64> for CellInput {
    fn from(value: f64) -> Self {
        CellInput::Number(value)
    }
}

impl From<&str> for CellInput {
    fn from(value: &str) -> Self {
        CellInput::Text(value.to_string())
    }
}

/// Coerce a raw cell string into a number.
///
/// Leading whitespace is skipped and the longest numeric prefix is parsed,
/// so `"3.5kg"` reads as 3.5. Anything without a numeric prefix, including
/// the empty string, becomes 0.
pub fn coerce_cell(raw: &str) -> f64 {
    let prefix = numeric_prefix(raw.trim_start());
    match prefix.parse::<f64>() {
        Ok(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return &s[..end + "Infinity".len()];
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return "";
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    &s[..end]
}

/// Split a matrix literal such as `"1,2;3,4"` into raw cells.
///
/// Rows are separated by `;` or newlines. Within a row, cells are separated
/// by commas when any are present (empty cells are kept), otherwise by
/// whitespace. Blank rows are dropped.
pub fn parse_cells_literal(text: &str) -> Vec<Vec<CellInput>> {
    text.split(|c: char| c == ';' || c == '\n')
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .map(|row| {
            if row.contains(',') {
                row.split(',').map(|cell| CellInput::from(cell.trim())).collect()
            } else {
                row.split_whitespace().map(CellInput::from).collect()
            }
        })
        .collect()
}

/// Shape spanned by raw rows: row count by the longest row.
pub fn inferred_shape(cells: &[Vec<CellInput>]) -> Shape {
    let cols = cells.iter().map(Vec::len).max().unwrap_or(0);
    (cells.len(), cols)
}

/// Reject shapes outside the selectable `MIN_DIMENSION..=MAX_DIMENSION` range.
pub fn check_shape(shape: Shape) -> Result<Shape> {
    let range = MIN_DIMENSION..=MAX_DIMENSION;
    if !range.contains(&shape.0) || !range.contains(&shape.1) {
        anyhow::bail!(
            "Matrix dimensions must be between {} and {} (got {}x{})",
            MIN_DIMENSION,
            MAX_DIMENSION,
            shape.0,
            shape.1
        );
    }
    Ok(shape)
}

/// Parse a `RxC` shape such as `2x3`.
pub fn parse_shape(text: &str) -> Result<Shape> {
    let mut parts = text
        .trim()
        .split(|c: char| c == 'x' || c == 'X' || c == '×')
        .map(str::trim);
    let (rows, cols) = match (parts.next(), parts.next(), parts.next()) {
        (Some(rows), Some(cols), None) => (rows, cols),
        _ => anyhow::bail!("Shape must look like ROWSxCOLS, e.g. 2x3: {}", text),
    };
    let rows: usize = rows
        .parse()
        .with_context(|| format!("Invalid row count in shape: {}", text))?;
    let cols: usize = cols
        .parse()
        .with_context(|| format!("Invalid column count in shape: {}", text))?;
    check_shape((rows, cols))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_plain_numbers() {
        assert_eq!(coerce_cell("42"), 42.0);
        assert_eq!(coerce_cell("-3.25"), -3.25);
        assert_eq!(coerce_cell("  7"), 7.0);
        assert_eq!(coerce_cell("+.5"), 0.5);
        assert_eq!(coerce_cell("5."), 5.0);
        assert_eq!(coerce_cell("1e3"), 1000.0);
        assert_eq!(coerce_cell("2.5E-1"), 0.25);
    }

    #[test]
    fn coerce_takes_numeric_prefix() {
        assert_eq!(coerce_cell("3.5kg"), 3.5);
        assert_eq!(coerce_cell("12abc"), 12.0);
        assert_eq!(coerce_cell("1e"), 1.0);
        assert_eq!(coerce_cell("1e+"), 1.0);
        assert_eq!(coerce_cell("4.2.1"), 4.2);
    }

    #[test]
    fn coerce_garbage_to_zero() {
        assert_eq!(coerce_cell(""), 0.0);
        assert_eq!(coerce_cell("abc"), 0.0);
        assert_eq!(coerce_cell("."), 0.0);
        assert_eq!(coerce_cell("-"), 0.0);
        assert_eq!(coerce_cell("NaN"), 0.0);
        assert_eq!(coerce_cell("e5"), 0.0);
    }

    #[test]
    fn coerce_infinity() {
        assert_eq!(coerce_cell("Infinity"), f64::INFINITY);
        assert_eq!(coerce_cell("-Infinity and beyond"), f64::NEG_INFINITY);
    }

    #[test]
    fn literal_rows_and_separators() {
        let cells = parse_cells_literal("1,2;3,4");
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[1], vec![CellInput::from("3"), CellInput::from("4")]);

        let cells = parse_cells_literal("1 2 3\n4 5 6\n");
        assert_eq!(inferred_shape(&cells), (2, 3));

        let cells = parse_cells_literal("1,,3;");
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0][1].value(), 0.0);
    }

    #[test]
    fn shape_parsing_and_bounds() {
        assert_eq!(parse_shape("2x3").unwrap(), (2, 3));
        assert_eq!(parse_shape(" 5 X 1 ").unwrap(), (5, 1));
        assert!(parse_shape("6x2").is_err());
        assert!(parse_shape("0x2").is_err());
        assert!(parse_shape("2").is_err());
        assert!(parse_shape("2x3x4").is_err());
        assert!(parse_shape("ax3").is_err());
    }
}
