//! Dense row-major matrices over the engine's integer types.

use crate::integer::Integer;
use num_traits::Zero;

/// A dense matrix with a fixed number of rows and columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// A matrix of arbitrary-precision integers; the representation used for
/// hyperplane systems throughout the enumeration code.
pub type MatrixInt = Matrix<Integer>;

impl<T: Zero + Clone> Matrix<T> {
    /// Creates a zero-filled matrix of the given shape.
    pub fn zero(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![T::zero(); rows * cols],
        }
    }
}

impl<T> Matrix<T> {
    /// Builds a matrix from a list of equal-length rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not all share the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            assert_eq!(row.len(), n_cols, "matrix rows must have equal length");
            data.extend(row);
        }
        Matrix {
            rows: n_rows,
            cols: n_cols,
            data,
        }
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the entry at the given row and column.
    pub fn entry(&self, row: usize, col: usize) -> &T {
        &self.data[row * self.cols + col]
    }

    /// Returns a mutable reference to the entry at the given row and
    /// column.
    pub fn entry_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[row * self.cols + col]
    }

    /// Returns the given row as a slice.
    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Iterates over the rows as slices.
    pub fn row_iter(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks_exact(self.cols.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_and_access() {
        let mut m: MatrixInt = Matrix::zero(2, 3);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        *m.entry_mut(1, 2) = Integer::from(7);
        assert_eq!(*m.entry(1, 2), Integer::from(7));
        assert_eq!(*m.entry(0, 2), Integer::from(0));
    }

    #[test]
    fn test_from_rows() {
        let m = Matrix::from_rows(vec![
            vec![Integer::from(1), Integer::from(2)],
            vec![Integer::from(3), Integer::from(4)],
        ]);
        assert_eq!(m.row(1), &[Integer::from(3), Integer::from(4)]);
        assert_eq!(m.row_iter().count(), 2);
    }
}
