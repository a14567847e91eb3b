//! Error type shared by parsing, mutation and arithmetic

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using this crate's [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Matrix axis named in index errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "Row"),
            Axis::Column => write!(f, "Column"),
        }
    }
}

/// Errors that can occur while loading, saving or combining matrices
#[derive(Error, Debug)]
pub enum Error {
    /// The source file could not be located or opened
    #[error("Matrix file not found: {}", path.display())]
    NotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// Malformed header or entry line
    #[error("Invalid matrix file format at line {line}: {message}")]
    Format {
        /// 1-based line number in the source
        line: usize,
        /// What was wrong with it
        message: String,
    },

    /// Coordinate outside the declared dimensions
    #[error("{axis} index {index} out of range [0, {bound})")]
    IndexOutOfRange {
        axis: Axis,
        index: i64,
        bound: usize,
    },

    /// Shapes are incompatible with the requested operation
    #[error("Cannot {op} matrices of dimensions {}x{} and {}x{}{}", .lhs.0, .lhs.1, .rhs.0, .rhs.1, detail(.op, .lhs, .rhs))]
    DimensionMismatch {
        /// Operation name (`add`, `subtract`, `multiply`)
        op: &'static str,
        /// Shape of the left operand
        lhs: (usize, usize),
        /// Shape of the right operand
        rhs: (usize, usize),
    },

    /// A value no longer fits in the element type
    #[error("Integer overflow during {op} at ({row}, {col})")]
    Overflow {
        op: &'static str,
        row: usize,
        col: usize,
    },

    /// Operation name not recognised
    #[error("Unknown operation '{0}' (expected add, subtract, multiply or transpose)")]
    UnknownOperation(String),

    /// Read or write failure other than a missing source
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

fn detail(op: &str, lhs: &(usize, usize), rhs: &(usize, usize)) -> String {
    if op == "multiply" {
        format!(
            ": first matrix columns ({}) must match second matrix rows ({})",
            lhs.1, rhs.0
        )
    } else {
        String::new()
    }
}

impl Error {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        Error::Format {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_messages() {
        let add = Error::DimensionMismatch {
            op: "add",
            lhs: (2, 3),
            rhs: (3, 2),
        };
        assert_eq!(add.to_string(), "Cannot add matrices of dimensions 2x3 and 3x2");

        let mul = Error::DimensionMismatch {
            op: "multiply",
            lhs: (2, 3),
            rhs: (2, 3),
        };
        assert!(mul.to_string().contains("columns (3) must match second matrix rows (2)"));
    }

    #[test]
    fn test_index_message() {
        let err = Error::IndexOutOfRange {
            axis: Axis::Column,
            index: -1,
            bound: 4,
        };
        assert_eq!(err.to_string(), "Column index -1 out of range [0, 4)");
    }
}
