//! Dictionary-of-keys sparse matrix

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use num_traits::{PrimInt, Signed};

use crate::error::{Axis, Error, Result};

/// Element types a [`SparseMatrix`] can hold: signed primitive integers
pub trait Scalar:
    PrimInt + Signed + FromStr + fmt::Display + fmt::Debug + Send + Sync + 'static
{
}

impl<T> Scalar for T where
    T: PrimInt + Signed + FromStr + fmt::Display + fmt::Debug + Send + Sync + 'static
{
}

/// A sparse matrix stored as a map from row index to a map from column index to value
///
/// Only non-zero values are stored. Writing zero through [`SparseMatrix::set`]
/// removes the entry, and a row whose last entry is removed is dropped from the
/// outer map, so an absent key always means zero.
///
/// The dimensions are fixed at construction and define the valid index space
/// `[0, n_rows) x [0, n_cols)`.
#[derive(Clone, PartialEq, Eq)]
pub struct SparseMatrix<T = i64> {
    n_rows: usize,
    n_cols: usize,
    entries: HashMap<usize, HashMap<usize, T>>,
    nnz: usize,
}

impl<T: Scalar> SparseMatrix<T> {
    /// Creates an empty matrix with the given dimensions
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            entries: HashMap::new(),
            nnz: 0,
        }
    }

    /// Builds a matrix from `(row, col, value)` triplets
    ///
    /// Later triplets overwrite earlier ones at the same position and zero
    /// values clear the position, exactly as repeated calls to `set` would.
    pub fn from_triplets<I>(n_rows: usize, n_cols: usize, triplets: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let mut matrix = Self::new(n_rows, n_cols);
        for (row, col, value) in triplets {
            matrix.set(row, col, value)?;
        }
        Ok(matrix)
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// `(n_rows, n_cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Returns the number of stored (non-zero) entries
    pub fn nnz(&self) -> usize {
        self.nnz
    }

    /// True when no entry is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value at `(row, col)`, or zero when nothing is stored there
    ///
    /// Positions outside the matrix also read as zero; only `set` validates.
    pub fn get(&self, row: usize, col: usize) -> T {
        if row >= self.n_rows || col >= self.n_cols {
            return T::zero();
        }
        self.entries
            .get(&row)
            .and_then(|cols| cols.get(&col))
            .copied()
            .unwrap_or_else(T::zero)
    }

    /// Stores `value` at `(row, col)`
    ///
    /// A zero value removes whatever is stored at that position.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `row >= n_rows` or `col >= n_cols`.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.n_rows {
            return Err(Error::IndexOutOfRange {
                axis: Axis::Row,
                index: i64::try_from(row).unwrap_or(i64::MAX),
                bound: self.n_rows,
            });
        }
        if col >= self.n_cols {
            return Err(Error::IndexOutOfRange {
                axis: Axis::Column,
                index: i64::try_from(col).unwrap_or(i64::MAX),
                bound: self.n_cols,
            });
        }

        if value.is_zero() {
            if let Some(cols) = self.entries.get_mut(&row) {
                if cols.remove(&col).is_some() {
                    self.nnz -= 1;
                }
                if cols.is_empty() {
                    self.entries.remove(&row);
                }
            }
        } else if self
            .entries
            .entry(row)
            .or_default()
            .insert(col, value)
            .is_none()
        {
            self.nnz += 1;
        }
        Ok(())
    }

    /// Iterates over the stored entries as `(row, col, value)` in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.entries
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, &value)| (row, col, value)))
    }

    /// Returns the stored entries of `row` sorted by column, empty when the row has none
    pub fn row_entries(&self, row: usize) -> Vec<(usize, T)> {
        let mut entries: Vec<_> = self
            .entries
            .get(&row)
            .map(|cols| cols.iter().map(|(&col, &value)| (col, value)).collect())
            .unwrap_or_default();
        entries.sort_unstable_by_key(|&(col, _)| col);
        entries
    }

    /// Returns every stored entry in row-major, column-ascending order
    pub fn sorted_entries(&self) -> Vec<(usize, usize, T)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by_key(|&(row, col, _)| (row, col));
        entries
    }

    /// Indices of rows holding at least one entry, ascending
    pub fn occupied_rows(&self) -> Vec<usize> {
        let mut rows: Vec<_> = self.entries.keys().copied().collect();
        rows.sort_unstable();
        rows
    }

    pub(crate) fn row_map(&self, row: usize) -> Option<&HashMap<usize, T>> {
        self.entries.get(&row)
    }
}

impl<T: Scalar> fmt::Debug for SparseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz)?;

        let rows = self.occupied_rows();
        let max_rows_to_print = 5.min(rows.len());

        if max_rows_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for &row in &rows[..max_rows_to_print] {
                write!(f, "    row {}: ", row)?;
                let entries = self.row_entries(row);
                let max_elements = 5.min(entries.len());

                for (col, value) in &entries[..max_elements] {
                    write!(f, "({}, {:?}) ", col, value)?;
                }

                if entries.len() > max_elements {
                    write!(f, "... ({} more)", entries.len() - max_elements)?;
                }

                writeln!(f)?;
            }

            if rows.len() > max_rows_to_print {
                writeln!(f, "    ... ({} more rows)", rows.len() - max_rows_to_print)?;
            }
        }

        write!(f, "}}")
    }
}
