use std::error::Error;
use std::fmt;
use std::ops::{Index, IndexMut, Neg};

use num_traits::{One, Zero};

/// `(rows, cols)` pair describing a matrix's dimensions.
pub type Shape = (usize, usize);

/// Dense row-major matrix. Always at least 1x1 and never ragged.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Matrix<T> {
    pub fn from_shape_vec(shape: Shape, data: Vec<T>) -> Result<Self, ShapeError> {
        let (rows, cols) = shape;
        if rows == 0 || cols == 0 {
            return Err(ShapeError::Empty);
        }
        let len = rows
            .checked_mul(cols)
            .ok_or(ShapeError::TooLarge { rows, cols })?;
        if data.len() != len {
            return Err(ShapeError::LengthMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Caller guarantees a non-empty shape whose area matches `data.len()`.
    pub(crate) fn from_raw_parts(shape: Shape, data: Vec<T>) -> Self {
        debug_assert!(shape.0 > 0 && shape.1 > 0 && data.len() == shape.0 * shape.1);
        Self {
            data,
            rows: shape.0,
            cols: shape.1,
        }
    }

    /// Build a matrix from nested rows. Every row must have the length of the first.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ShapeError> {
        let nrows = rows.len();
        let ncols = rows.first().map(Vec::len).unwrap_or(0);
        if nrows == 0 || ncols == 0 {
            return Err(ShapeError::Empty);
        }

        let mut data = Vec::with_capacity(nrows * ncols);
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(ShapeError::Ragged {
                    row: row_idx,
                    expected: ncols,
                    found: row.len(),
                });
            }
            data.extend(row);
        }

        Ok(Self {
            data,
            rows: nrows,
            cols: ncols,
        })
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> Shape {
        (self.rows, self.cols)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Panics when `(row, col)` lies outside the matrix.
    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    /// Checked cell access; `None` outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(self.offset(row, col))
        } else {
            None
        }
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.data.chunks(self.cols)
    }

    pub fn mapv<U, F>(&self, mut f: F) -> Matrix<U>
    where
        F: FnMut(&T) -> U,
    {
        Matrix {
            data: self.data.iter().map(|v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Combine two same-shaped matrices cell by cell.
    ///
    /// Panics when the shapes differ; `compute` checks shapes before calling.
    pub fn zip_with<U, F>(&self, other: &Matrix<T>, mut f: F) -> Matrix<U>
    where
        F: FnMut(&T, &T) -> U,
    {
        assert_eq!(
            self.shape(),
            other.shape(),
            "zip_with requires matrices of equal shape"
        );
        Matrix {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| f(a, b))
                .collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn transpose(&self) -> Matrix<T>
    where
        T: Clone,
    {
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                data.push(self[(row, col)].clone());
            }
        }
        Matrix {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    pub fn to_rows(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        self.rows_iter().map(|row| row.to_vec()).collect()
    }
}

impl<T> Matrix<T>
where
    T: Clone,
{
    pub fn from_elem(rows: usize, cols: usize, value: T) -> Result<Self, ShapeError> {
        let len = rows
            .checked_mul(cols)
            .ok_or(ShapeError::TooLarge { rows, cols })?;
        Self::from_shape_vec((rows, cols), vec![value; len])
    }
}

impl<T> Matrix<T>
where
    T: Clone + Zero,
{
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, ShapeError> {
        Self::from_elem(rows, cols, T::zero())
    }
}

impl<T> Matrix<T>
where
    T: Clone + Zero + One,
{
    pub fn identity(n: usize) -> Result<Self, ShapeError> {
        let mut m = Self::zeros(n, n)?;
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        Ok(m)
    }
}

impl<T> Matrix<T>
where
    T: Clone + Neg<Output = T>,
{
    /// Flip the sign of every cell.
    pub fn negate(&self) -> Matrix<T> {
        self.mapv(|v| -v.clone())
    }
}

impl Matrix<f64> {
    /// Shape-aware comparison with an absolute tolerance per cell.
    pub fn approx_eq(&self, other: &Matrix<f64>, tol: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tol)
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl<T> TryFrom<Vec<Vec<T>>> for Matrix<T> {
    type Error = ShapeError;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        Matrix::from_rows(rows)
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (row_idx, row) in self.rows_iter().enumerate() {
            write!(f, "[")?;
            for (col_idx, value) in row.iter().enumerate() {
                write!(f, "{}", value)?;
                if col_idx + 1 != row.len() {
                    write!(f, ", ")?;
                }
            }
            write!(f, "]")?;
            if row_idx + 1 != self.rows {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}

/// Reasons a buffer or set of rows cannot form a `Matrix`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    Empty,
    LengthMismatch { rows: usize, cols: usize, len: usize },
    Ragged { row: usize, expected: usize, found: usize },
    /// `rows * cols` does not fit in `usize`.
    TooLarge { rows: usize, cols: usize },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::Empty => write!(f, "matrix must have at least one row and one column"),
            ShapeError::LengthMismatch { rows, cols, len } => write!(
                f,
                "invalid shape ({}, {}) for buffer of length {}",
                rows, cols, len
            ),
            ShapeError::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} cells, expected {}",
                row, found, expected
            ),
            ShapeError::TooLarge { rows, cols } => {
                write!(f, "shape ({}, {}) is too large to allocate", rows, cols)
            }
        }
    }
}

impl Error for ShapeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn zero_sized_shapes_are_empty() {
        assert_eq!(Matrix::<f64>::zeros(0, 3).unwrap_err(), ShapeError::Empty);
        assert_eq!(
            Matrix::<f64>::from_rows(vec![vec![]]).unwrap_err(),
            ShapeError::Empty
        );
    }

    #[test]
    fn get_is_bounds_checked() {
        let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(m.get(1, 0), Some(&3));
        assert_eq!(m.get(0, 2), None);
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_past_last_column_panics() {
        let m = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        let _ = m[(0, 3)];
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_mut_past_last_row_panics() {
        let mut m = Matrix::<f64>::zeros(2, 3).unwrap();
        m[(2, 0)] = 1.0;
    }

    #[test]
    fn overflowing_shape_is_too_large() {
        let err = Matrix::<u8>::from_shape_vec((usize::MAX, 2), vec![]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::TooLarge {
                rows: usize::MAX,
                cols: 2
            }
        );
        assert!(matches!(
            Matrix::from_elem(2, usize::MAX, 0.0),
            Err(ShapeError::TooLarge { .. })
        ));
    }

    #[test]
    fn display_nests_rows() {
        let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(m.to_string(), "[[1, 2], [3, 4]]");
    }
}
