//! Elementwise addition and subtraction

use tracing::trace;

use crate::error::{Error, Result};
use crate::matrix::{Scalar, SparseMatrix};

/// Elementwise operation applied by [`combine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementwiseOp {
    Add,
    Subtract,
}

impl ElementwiseOp {
    /// Operation name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            ElementwiseOp::Add => "add",
            ElementwiseOp::Subtract => "subtract",
        }
    }

    /// Applies the operation, returning `None` on overflow
    fn apply<T: Scalar>(&self, lhs: T, rhs: T) -> Option<T> {
        match self {
            ElementwiseOp::Add => lhs.checked_add(&rhs),
            ElementwiseOp::Subtract => lhs.checked_sub(&rhs),
        }
    }
}

/// Combines two equally shaped matrices entry by entry
///
/// The result starts as a copy of `a`; every entry of `b` is then folded into
/// the value already at that position. Positions that cancel to zero are not
/// stored, so the result holds the union of both non-zero patterns minus the
/// cancellations.
///
/// # Errors
///
/// - [`Error::DimensionMismatch`] if the shapes differ
/// - [`Error::Overflow`] if a sum or difference does not fit in `T`
pub fn combine<T: Scalar>(
    a: &SparseMatrix<T>,
    b: &SparseMatrix<T>,
    op: ElementwiseOp,
) -> Result<SparseMatrix<T>> {
    if a.shape() != b.shape() {
        return Err(Error::DimensionMismatch {
            op: op.name(),
            lhs: a.shape(),
            rhs: b.shape(),
        });
    }

    let mut result = a.clone();

    for (row, col, value) in b.iter() {
        let current = result.get(row, col);
        let combined = op.apply(current, value).ok_or(Error::Overflow {
            op: op.name(),
            row,
            col,
        })?;
        result.set(row, col, combined)?;
    }

    trace!(op = op.name(), nnz = result.nnz(), "combined matrices");
    Ok(result)
}

/// Computes `a + b`
pub fn add<T: Scalar>(a: &SparseMatrix<T>, b: &SparseMatrix<T>) -> Result<SparseMatrix<T>> {
    combine(a, b, ElementwiseOp::Add)
}

/// Computes `a - b`
pub fn subtract<T: Scalar>(a: &SparseMatrix<T>, b: &SparseMatrix<T>) -> Result<SparseMatrix<T>> {
    combine(a, b, ElementwiseOp::Subtract)
}
