//! Utilities for converting between our matrix type and external libraries

use ndarray::{Array2, ArrayView2};
use sprs::CsMat;

use crate::error::Result;
use crate::matrix::{Scalar, SparseMatrix};

/// Converts a sparse matrix to sprs CsMat format (CSR storage)
pub fn to_sprs_csr<T>(matrix: &SparseMatrix<T>) -> CsMat<T>
where
    T: Scalar + Default,
{
    let csr = matrix.to_csr();

    // The empty view carries a single offset; sprs wants one per row plus one
    let row_starts = if csr.row_starts.len() == matrix.n_rows() + 1 {
        csr.row_starts
    } else {
        vec![0; matrix.n_rows() + 1]
    };

    CsMat::new(matrix.shape(), row_starts, csr.column_indices, csr.values)
}

/// Converts a sprs CsMat (CSR or CSC) into a sparse matrix
///
/// Explicitly stored zeros are dropped.
pub fn from_sprs_csr<T>(matrix: CsMat<T>) -> Result<SparseMatrix<T>>
where
    T: Scalar + Default,
{
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let (n_rows, n_cols) = matrix.shape();
    let mut result = SparseMatrix::new(n_rows, n_cols);

    for (row, vec) in matrix.outer_iterator().enumerate() {
        for (col, &value) in vec.iter() {
            result.set(row, col, value)?;
        }
    }

    Ok(result)
}

/// Expands a sparse matrix into a dense ndarray
pub fn to_dense<T: Scalar>(matrix: &SparseMatrix<T>) -> Array2<T> {
    let mut dense = Array2::zeros(matrix.shape());
    for (row, col, value) in matrix.iter() {
        dense[[row, col]] = value;
    }
    dense
}

/// Builds a sparse matrix holding the non-zero cells of a dense array
pub fn from_dense<T: Scalar>(dense: ArrayView2<'_, T>) -> Result<SparseMatrix<T>> {
    let (n_rows, n_cols) = dense.dim();
    SparseMatrix::from_triplets(
        n_rows,
        n_cols,
        dense
            .indexed_iter()
            .filter(|(_, value)| !value.is_zero())
            .map(|((row, col), &value)| (row, col, value)),
    )
}
