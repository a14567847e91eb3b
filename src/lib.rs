//! # sparse-ops: sparse integer matrices
//!
//! Matrices with mostly-zero entries are stored as a map from row index to a
//! map from column index to value, holding only the non-zero entries.
//!
//! ## Overview
//!
//! - [`SparseMatrix`]: storage, bounds-checked `set`, lenient `get`
//! - Text format load/save (`rows=N`, `cols=N`, then `(row, col, value)` lines)
//! - [`CsrView`]: compressed sparse row arrays derived on demand
//! - Arithmetic: [`add`], [`subtract`], [`multiply`], [`transpose`]
//!
//! Every operation borrows its inputs and returns a new matrix, so the same
//! inputs can be shared between threads and used by several operations at once.
//!
//! ## Usage
//!
//! ```
//! use sparse_ops::{multiply, SparseMatrix};
//!
//! let a: SparseMatrix = "rows=2\ncols=3\n(0, 0, 1)\n(0, 1, 2)\n".parse()?;
//! let b: SparseMatrix = "rows=3\ncols=2\n(0, 0, 3)\n(1, 0, 4)\n".parse()?;
//!
//! let c = multiply(&a, &b)?;
//! assert_eq!(c.get(0, 0), 11);
//! assert_eq!(c.nnz(), 1);
//! # Ok::<(), sparse_ops::Error>(())
//! ```

pub mod error;
pub mod logging;
pub mod matrix;
pub mod ops;
pub mod utils;

// Re-export primary components
pub use error::{Axis, Error, Result};
pub use matrix::{CsrView, Scalar, SparseMatrix};
pub use ops::{add, combine, multiply, subtract, transpose, ElementwiseOp, Operation};
pub use utils::{from_dense, from_sprs_csr, to_dense, to_sprs_csr};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
