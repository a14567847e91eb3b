//! Text format I/O
//!
//! A matrix is stored as two header lines followed by one line per non-zero
//! entry:
//!
//! ```text
//! rows=3
//! cols=3
//! (0, 1, 7)
//! (2, 2, -4)
//! ```
//!
//! Blank lines between entries are ignored. A coordinate equal to the
//! declared row (or column) count is read as the last row (or column), so
//! files written with one-indexed coordinates at the boundary still load.
//!
//! # Examples
//!
//! ```
//! use sparse_ops::SparseMatrix;
//!
//! let matrix: SparseMatrix = "rows=2\ncols=2\n(0, 1, 3)\n".parse().unwrap();
//! assert_eq!(matrix.get(0, 1), 3);
//! assert_eq!(matrix.to_string(), "rows=2\ncols=2\n(0, 1, 3)\n");
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::num::IntErrorKind;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Axis, Error, Result};
use crate::matrix::{Scalar, SparseMatrix};

const ROWS_PREFIX: &str = "rows=";
const COLS_PREFIX: &str = "cols=";

impl<T: Scalar> SparseMatrix<T> {
    /// Parses a matrix from a line-oriented reader
    ///
    /// Fails on the first malformed line.
    ///
    /// # Errors
    ///
    /// - [`Error::Format`] for a bad header, dimension or entry line, or text
    ///   that is not valid UTF-8
    /// - [`Error::IndexOutOfRange`] for a coordinate outside the declared shape
    /// - [`Error::Io`] if the reader fails
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines().enumerate();

        let n_rows = parse_header(lines.next(), 1, ROWS_PREFIX)?;
        let n_cols = parse_header(lines.next(), 2, COLS_PREFIX)?;

        let mut matrix = Self::new(n_rows, n_cols);

        for (idx, line) in lines {
            let line = line.map_err(|e| read_error(idx + 1, e))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (row, col, value) = parse_entry::<T>(line, idx + 1)?;
            let row = adjust_index(row, n_rows, Axis::Row)?;
            let col = adjust_index(col, n_cols, Axis::Column)?;

            // Zeros are legal in the source but never stored
            if !value.is_zero() {
                matrix.set(row, col, value)?;
            }
        }

        Ok(matrix)
    }

    /// Loads a matrix from a file
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the file does not exist, otherwise as [`SparseMatrix::parse`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::NotFound {
                path: path.to_path_buf(),
            },
            _ => Error::io(format!("Error opening {}", path.display()), e),
        })?;

        let matrix = Self::parse(BufReader::new(file))?;
        debug!(
            path = %path.display(),
            rows = matrix.n_rows(),
            cols = matrix.n_cols(),
            nnz = matrix.nnz(),
            "loaded matrix"
        );
        Ok(matrix)
    }

    /// Writes the header and every entry, sorted by row then column
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{}", self)?;
        writer.flush()
    }

    /// Saves the matrix to a file, replacing any existing content
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be created or written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let context = || format!("Error writing to file: {}", path.display());

        let file = File::create(path).map_err(|e| Error::io(context(), e))?;
        self.write_to(BufWriter::new(file))
            .map_err(|e| Error::io(context(), e))?;

        debug!(path = %path.display(), nnz = self.nnz(), "saved matrix");
        Ok(())
    }
}

impl<T: Scalar> FromStr for SparseMatrix<T> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.as_bytes())
    }
}

impl<T: Scalar> fmt::Display for SparseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}{}", ROWS_PREFIX, self.n_rows())?;
        writeln!(f, "{}{}", COLS_PREFIX, self.n_cols())?;
        for (row, col, value) in self.sorted_entries() {
            writeln!(f, "({}, {}, {})", row, col, value)?;
        }
        Ok(())
    }
}

fn parse_header(
    line: Option<(usize, io::Result<String>)>,
    line_no: usize,
    prefix: &str,
) -> Result<usize> {
    let line = match line {
        Some((_, line)) => line.map_err(|e| read_error(line_no, e))?,
        None => String::new(),
    };
    let line = line.trim();

    let value = line.strip_prefix(prefix).ok_or_else(|| {
        Error::format(
            line_no,
            "First two lines must be in format 'rows=N' and 'cols=N'",
        )
    })?;

    value
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::format(line_no, format!("Invalid dimension values: {}", line)))
}

fn parse_entry<T: Scalar>(line: &str, line_no: usize) -> Result<(i64, i64, T)> {
    let inner = line
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| Error::format(line_no, format!("Invalid format: {}", line)))?;

    let tokens: Vec<&str> = inner.split(',').map(str::trim).collect();
    if tokens.len() != 3 {
        return Err(Error::format(
            line_no,
            format!("Invalid element format: {}", line),
        ));
    }

    let invalid = || Error::format(line_no, format!("Invalid numeric values in line: {}", line));
    let row = parse_coordinate(tokens[0]).ok_or_else(invalid)?;
    let col = parse_coordinate(tokens[1]).ok_or_else(invalid)?;
    let value = tokens[2].parse::<T>().map_err(|_| invalid())?;

    Ok((row, col, value))
}

/// Coordinates too large for `i64` saturate so the range check rejects them
fn parse_coordinate(token: &str) -> Option<i64> {
    match token.parse::<i64>() {
        Ok(index) => Some(index),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// Undecodable text is a malformed source; anything else is a read failure
fn read_error(line_no: usize, e: io::Error) -> Error {
    match e.kind() {
        io::ErrorKind::InvalidData => Error::format(line_no, "invalid UTF-8"),
        _ => Error::io("Error reading matrix source", e),
    }
}

/// Applies the boundary tolerance and range check to one coordinate
fn adjust_index(index: i64, bound: usize, axis: Axis) -> Result<usize> {
    let adjusted = if index >= 0 && index as u64 == bound as u64 {
        index - 1
    } else {
        index
    };

    if adjusted < 0 || adjusted as u64 >= bound as u64 {
        return Err(Error::IndexOutOfRange {
            axis,
            index: adjusted,
            bound,
        });
    }
    Ok(adjusted as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<SparseMatrix<i64>> {
        text.parse()
    }

    #[test]
    fn test_parse_basic() {
        let matrix = parse("rows=3\ncols=4\n(0, 1, 7)\n\n(2, 3, -4)\n").unwrap();

        assert_eq!(matrix.shape(), (3, 4));
        assert_eq!(matrix.nnz(), 2);
        assert_eq!(matrix.get(0, 1), 7);
        assert_eq!(matrix.get(2, 3), -4);
    }

    #[test]
    fn test_parse_tolerates_spacing() {
        let matrix = parse("  rows= 2 \ncols=2\n(1,1,3)\n( 0 , 0 , 9 )\n").unwrap();

        assert_eq!(matrix.get(1, 1), 3);
        assert_eq!(matrix.get(0, 0), 9);
    }

    #[test]
    fn test_boundary_coordinate_shifts() {
        let matrix = parse("rows=2\ncols=2\n(2, 0, 5)\n").unwrap();
        assert_eq!(matrix.get(1, 0), 5);
        assert_eq!(matrix.nnz(), 1);

        let matrix = parse("rows=2\ncols=3\n(0, 3, 8)\n").unwrap();
        assert_eq!(matrix.get(0, 2), 8);
    }

    #[test]
    fn test_coordinate_past_boundary_fails() {
        assert!(matches!(
            parse("rows=2\ncols=2\n(3, 0, 5)\n"),
            Err(Error::IndexOutOfRange { axis: Axis::Row, index: 3, bound: 2 })
        ));
        assert!(matches!(
            parse("rows=2\ncols=2\n(0, -1, 5)\n"),
            Err(Error::IndexOutOfRange { axis: Axis::Column, index: -1, .. })
        ));
    }

    #[test]
    fn test_zero_values_not_stored() {
        let matrix = parse("rows=2\ncols=2\n(0, 0, 0)\n(1, 1, 2)\n").unwrap();

        assert_eq!(matrix.nnz(), 1);
        assert_eq!(matrix.sorted_entries(), vec![(1, 1, 2)]);
    }

    #[test]
    fn test_duplicate_coordinate_last_wins() {
        let matrix = parse("rows=2\ncols=2\n(0, 0, 1)\n(0, 0, 6)\n").unwrap();

        assert_eq!(matrix.get(0, 0), 6);
        assert_eq!(matrix.nnz(), 1);
    }

    #[test]
    fn test_bad_headers() {
        assert!(matches!(parse("cols=2\nrows=2\n"), Err(Error::Format { line: 1, .. })));
        assert!(matches!(parse("rows=2\ncolumns=2\n"), Err(Error::Format { line: 2, .. })));
        assert!(matches!(parse("rows=x\ncols=2\n"), Err(Error::Format { line: 1, .. })));
        assert!(matches!(parse("rows=-1\ncols=2\n"), Err(Error::Format { line: 1, .. })));
        assert!(matches!(parse(""), Err(Error::Format { line: 1, .. })));
        assert!(matches!(parse("rows=2\n"), Err(Error::Format { line: 2, .. })));
    }

    #[test]
    fn test_bad_entries() {
        let cases = [
            "rows=2\ncols=2\n0, 0, 1\n",
            "rows=2\ncols=2\n(0, 0, 1\n",
            "rows=2\ncols=2\n(0, 0)\n",
            "rows=2\ncols=2\n(0, 0, 1, 2)\n",
            "rows=2\ncols=2\n(a, 0, 1)\n",
            "rows=2\ncols=2\n(0, 0, 1.5)\n",
        ];
        for text in cases {
            assert!(
                matches!(parse(text), Err(Error::Format { line: 3, .. })),
                "expected format error for {:?}",
                text
            );
        }
    }

    #[test]
    fn test_fails_on_first_bad_line() {
        let err = parse("rows=2\ncols=2\n(0, 0, 1)\n(9, 9, 9)\nbogus\n").unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { .. }));
    }

    #[test]
    fn test_write_sorted() {
        let matrix =
            SparseMatrix::<i64>::from_triplets(3, 3, vec![(2, 1, 4), (0, 2, -3), (0, 0, 1)])
                .unwrap();

        let mut out = Vec::new();
        matrix.write_to(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "rows=3\ncols=3\n(0, 0, 1)\n(0, 2, -3)\n(2, 1, 4)\n"
        );
        assert_eq!(matrix.to_string(), "rows=3\ncols=3\n(0, 0, 1)\n(0, 2, -3)\n(2, 1, 4)\n");
    }

    #[test]
    fn test_invalid_utf8_is_format_error() {
        let entry = SparseMatrix::<i64>::parse(&b"rows=2\ncols=2\n(0, 0, \xff)\n"[..]);
        assert!(matches!(entry, Err(Error::Format { line: 3, .. })));

        let header = SparseMatrix::<i64>::parse(&b"rows=\xfe2\ncols=2\n"[..]);
        assert!(matches!(header, Err(Error::Format { line: 1, .. })));
    }

    #[test]
    fn test_oversized_coordinate_out_of_range() {
        assert!(matches!(
            parse("rows=2\ncols=2\n(99999999999999999999, 0, 1)\n"),
            Err(Error::IndexOutOfRange { axis: Axis::Row, index: i64::MAX, bound: 2 })
        ));
        assert!(matches!(
            parse("rows=2\ncols=2\n(0, -99999999999999999999, 1)\n"),
            Err(Error::IndexOutOfRange { axis: Axis::Column, index: i64::MIN, bound: 2 })
        ));
    }

    #[test]
    fn test_write_matches_display() {
        let matrix = parse("rows=3\ncols=2\n(2, 1, 4)\n(0, 0, -1)\n").unwrap();

        let mut out = Vec::new();
        matrix.write_to(&mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), matrix.to_string());
    }

    #[test]
    fn test_adjust_index() {
        assert_eq!(adjust_index(0, 3, Axis::Row).unwrap(), 0);
        assert_eq!(adjust_index(3, 3, Axis::Row).unwrap(), 2);
        assert!(adjust_index(4, 3, Axis::Row).is_err());
        assert!(adjust_index(0, 0, Axis::Row).is_err());
    }
}
