//! Matrix transpose

use crate::error::Result;
use crate::matrix::{Scalar, SparseMatrix};

/// Returns a new matrix with rows and columns swapped
///
/// Every entry `(r, c, v)` of `m` becomes `(c, r, v)` in an `n_cols x n_rows`
/// result.
pub fn transpose<T: Scalar>(m: &SparseMatrix<T>) -> Result<SparseMatrix<T>> {
    let mut result = SparseMatrix::new(m.n_cols(), m.n_rows());

    for (row, col, value) in m.iter() {
        result.set(col, row, value)?;
    }

    Ok(result)
}
