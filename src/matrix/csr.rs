//! Compressed Sparse Row (CSR) view of a [`SparseMatrix`]

use crate::matrix::{Scalar, SparseMatrix};

/// A read-only CSR snapshot of a sparse matrix
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_starts: offsets into column_indices and values, one per row plus a final end offset
/// - column_indices: column index of each stored value
/// - values: the non-zero values in row-major, column-ascending order
///
/// The view is not kept in sync with the matrix it was taken from; call
/// [`SparseMatrix::to_csr`] again after mutating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrView<T> {
    /// Non-zero values (size: nnz)
    pub values: Vec<T>,

    /// Column indices (size: nnz)
    pub column_indices: Vec<usize>,

    /// Row offsets (size: n_rows + 1, or 1 for a matrix with no entries)
    /// row_starts[r + 1] - row_starts[r] is the number of non-zeros in row r
    pub row_starts: Vec<usize>,
}

impl<T: Copy> CsrView<T> {
    /// Returns the number of non-zero elements in the view
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns an iterator over `(col, value)` for row `i`
    ///
    /// Rows beyond the stored offsets (including every row of the
    /// degenerate empty view) yield nothing.
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        let (start, end) = match (self.row_starts.get(i), self.row_starts.get(i + 1)) {
            (Some(&start), Some(&end)) => (start, end),
            _ => (0, 0),
        };

        self.column_indices[start..end]
            .iter()
            .zip(&self.values[start..end])
            .map(|(&col, &val)| (col, val))
    }
}

impl<T: Scalar> SparseMatrix<T> {
    /// Derives the CSR arrays from the stored entries
    ///
    /// A matrix with no entries yields empty `values` and `column_indices`
    /// and `row_starts == [0]`, whatever its dimensions.
    pub fn to_csr(&self) -> CsrView<T> {
        if self.is_empty() {
            return CsrView {
                values: Vec::new(),
                column_indices: Vec::new(),
                row_starts: vec![0],
            };
        }

        let nnz = self.nnz();
        let mut values = Vec::with_capacity(nnz);
        let mut column_indices = Vec::with_capacity(nnz);
        let mut row_starts = Vec::with_capacity(self.n_rows() + 1);
        row_starts.push(0);

        for row in 0..self.n_rows() {
            for (col, value) in self.row_entries(row) {
                column_indices.push(col);
                values.push(value);
            }
            row_starts.push(column_indices.len());
        }

        CsrView {
            values,
            column_indices,
            row_starts,
        }
    }
}
