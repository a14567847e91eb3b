// Arithmetic on sparse matrices. Every operation borrows its inputs and
// returns a newly allocated result.

pub mod combine;
pub mod multiply;
pub mod transpose;

use std::fmt;
use std::str::FromStr;

pub use combine::{add, combine, subtract, ElementwiseOp};
pub use multiply::multiply;
pub use transpose::transpose;

use crate::error::{Error, Result};
use crate::matrix::{Scalar, SparseMatrix};

/// An operation selected by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    /// Transposes the first operand; the second is ignored
    Transpose,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Transpose,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Transpose => "transpose",
        }
    }

    /// Runs the operation on `a` and `b`
    pub fn apply<T: Scalar>(&self, a: &SparseMatrix<T>, b: &SparseMatrix<T>) -> Result<SparseMatrix<T>> {
        match self {
            Operation::Add => add(a, b),
            Operation::Subtract => subtract(a, b),
            Operation::Multiply => multiply(a, b),
            Operation::Transpose => transpose(a),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = Error;

    /// Accepts the operation name or its symbol (`+`, `-`, `*`, `T`), case-insensitively
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "add" | "addition" | "+" => Ok(Operation::Add),
            "subtract" | "subtraction" | "-" => Ok(Operation::Subtract),
            "multiply" | "multiplication" | "*" => Ok(Operation::Multiply),
            "transpose" | "t" => Ok(Operation::Transpose),
            _ => Err(Error::UnknownOperation(s.to_string())),
        }
    }
}
