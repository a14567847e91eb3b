//! Row-wise accumulated sparse matrix multiplication

use std::collections::BTreeMap;

use num_traits::{NumCast, ToPrimitive};
use tracing::trace;

use crate::error::{Error, Result};
use crate::matrix::{Scalar, SparseMatrix};

const OP: &str = "multiply";

fn widen<T: Scalar>(value: T) -> Option<i128> {
    ToPrimitive::to_i128(&value)
}

/// Computes the product `a * b`
///
/// For each occupied row `i` of `a`, every `a[i][k]` is paired with the
/// entries of row `k` of `b` and the products are summed per output column in
/// an ordered accumulator. Partial sums are held in `i128`, so an
/// intermediate value may leave the range of `T` as long as the final sum
/// fits. Rows and inner indices are visited in ascending order. Work is
/// proportional to the number of matching pairs; rows of `a` without entries, and rows of `b` that no entry of `a`
/// points at, are never visited. Sums that come out to zero are not stored.
///
/// # Errors
///
/// - [`Error::DimensionMismatch`] if `a.n_cols() != b.n_rows()`
/// - [`Error::Overflow`] if a final sum does not fit in `T`
pub fn multiply<T: Scalar>(a: &SparseMatrix<T>, b: &SparseMatrix<T>) -> Result<SparseMatrix<T>> {
    if a.n_cols() != b.n_rows() {
        return Err(Error::DimensionMismatch {
            op: OP,
            lhs: a.shape(),
            rhs: b.shape(),
        });
    }

    let mut result = SparseMatrix::new(a.n_rows(), b.n_cols());

    for i in a.occupied_rows() {
        // Row i of the result, summed in i128 so only the final value is range-checked
        let mut accum: BTreeMap<usize, i128> = BTreeMap::new();

        for (k, a_val) in a.row_entries(i) {
            let Some(b_row) = b.row_map(k) else {
                continue;
            };

            for (&j, &b_val) in b_row {
                let overflow = || Error::Overflow { op: OP, row: i, col: j };
                let product = widen(a_val)
                    .zip(widen(b_val))
                    .and_then(|(x, y)| x.checked_mul(y))
                    .ok_or_else(overflow)?;
                let sum = accum.entry(j).or_insert(0);
                *sum = sum.checked_add(product).ok_or_else(overflow)?;
            }
        }

        for (j, sum) in accum {
            if sum != 0 {
                let value = <T as NumCast>::from(sum).ok_or(Error::Overflow {
                    op: OP,
                    row: i,
                    col: j,
                })?;
                result.set(i, j, value)?;
            }
        }
    }

    trace!(
        rows = result.n_rows(),
        cols = result.n_cols(),
        nnz = result.nnz(),
        "multiplied matrices"
    );
    Ok(result)
}
