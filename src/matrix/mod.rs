// Matrix data structures, CSR view and text format I/O

pub mod csr;
pub mod io;
pub mod sparse;

pub use csr::CsrView;
pub use sparse::{Scalar, SparseMatrix};
