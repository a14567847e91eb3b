//! Property-based tests for storage invariants and arithmetic identities
//!
//! Matrices are generated as random triplet lists with small values so that
//! products and sums never approach the i64 limits.

use proptest::prelude::*;
use sparse_ops::{add, multiply, subtract, to_dense, transpose, SparseMatrix};

// ============================================================================
// Test Utilities
// ============================================================================

/// Generate a random sparse matrix of a fixed shape with up to `max_nnz` writes
fn sparse_matrix_strategy(
    n_rows: usize,
    n_cols: usize,
    max_nnz: usize,
) -> impl Strategy<Value = SparseMatrix> {
    prop::collection::vec((0..n_rows, 0..n_cols, -20i64..20), 0..=max_nnz).prop_map(
        move |triplets| SparseMatrix::from_triplets(n_rows, n_cols, triplets).unwrap(),
    )
}

/// Random shape plus a matrix of that shape
fn any_matrix() -> impl Strategy<Value = SparseMatrix> {
    (1usize..8, 1usize..8).prop_flat_map(|(r, c)| sparse_matrix_strategy(r, c, 24))
}

/// Two matrices of the same random shape
fn same_shape_pair() -> impl Strategy<Value = (SparseMatrix, SparseMatrix)> {
    (1usize..8, 1usize..8).prop_flat_map(|(r, c)| {
        (sparse_matrix_strategy(r, c, 24), sparse_matrix_strategy(r, c, 24))
    })
}

/// Three matrices with chainable shapes m x n, n x p, p x q
fn chain_triple() -> impl Strategy<Value = (SparseMatrix, SparseMatrix, SparseMatrix)> {
    (1usize..6, 1usize..6, 1usize..6, 1usize..6).prop_flat_map(|(m, n, p, q)| {
        (
            sparse_matrix_strategy(m, n, 12),
            sparse_matrix_strategy(n, p, 12),
            sparse_matrix_strategy(p, q, 12),
        )
    })
}

fn assert_invariants(m: &SparseMatrix) {
    assert_eq!(m.nnz(), m.iter().count());
    for (row, col, value) in m.iter() {
        assert_ne!(value, 0);
        assert!(row < m.n_rows() && col < m.n_cols());
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: nnz equals the stored entry count and no stored value is zero
    #[test]
    fn prop_storage_invariants(m in any_matrix()) {
        assert_invariants(&m);
    }

    /// Property: A - A has no entries
    #[test]
    fn prop_self_subtraction_empty(a in any_matrix()) {
        let c = subtract(&a, &a).unwrap();
        prop_assert_eq!(c.nnz(), 0);
        prop_assert_eq!(c.shape(), a.shape());
    }

    /// Property: (A + B) - B == A
    #[test]
    fn prop_add_then_subtract((a, b) in same_shape_pair()) {
        let sum = add(&a, &b).unwrap();
        assert_invariants(&sum);
        let back = subtract(&sum, &b).unwrap();
        prop_assert_eq!(back, a);
    }

    /// Property: addition matches the dense sum
    #[test]
    fn prop_add_matches_dense((a, b) in same_shape_pair()) {
        let sum = add(&a, &b).unwrap();
        prop_assert_eq!(to_dense(&sum), to_dense(&a) + to_dense(&b));
    }

    /// Property: transpose is an involution
    #[test]
    fn prop_double_transpose(m in any_matrix()) {
        let t = transpose(&m).unwrap();
        prop_assert_eq!(t.shape(), (m.n_cols(), m.n_rows()));
        prop_assert_eq!(t.nnz(), m.nnz());
        prop_assert_eq!(transpose(&t).unwrap(), m);
    }

    /// Property: (AB)C == A(BC)
    #[test]
    fn prop_multiply_associative((a, b, c) in chain_triple()) {
        let left = multiply(&multiply(&a, &b).unwrap(), &c).unwrap();
        let right = multiply(&a, &multiply(&b, &c).unwrap()).unwrap();
        assert_invariants(&left);
        prop_assert_eq!(left, right);
    }

    /// Property: (AB)C is defined exactly when A(BC) is
    #[test]
    fn prop_multiply_definedness(
        a in any_matrix(),
        b in any_matrix(),
        c in any_matrix(),
    ) {
        let left = multiply(&a, &b).and_then(|ab| multiply(&ab, &c));
        let right = multiply(&b, &c).and_then(|bc| multiply(&a, &bc));
        prop_assert_eq!(left.is_ok(), right.is_ok());
        if let (Ok(left), Ok(right)) = (left, right) {
            prop_assert_eq!(left, right);
        }
    }

    /// Property: multiplication matches the dense product
    #[test]
    fn prop_multiply_matches_dense((a, b, _c) in chain_triple()) {
        let product = multiply(&a, &b).unwrap();
        prop_assert_eq!(to_dense(&product), to_dense(&a).dot(&to_dense(&b)));
    }

    /// Property: parse(serialize(m)) == m
    #[test]
    fn prop_text_roundtrip(m in any_matrix()) {
        let text = m.to_string();
        let parsed: SparseMatrix = text.parse().unwrap();
        prop_assert_eq!(parsed, m);
    }

    /// Property: CSR offsets count the non-zeros of every row
    #[test]
    fn prop_csr_row_counts(m in any_matrix()) {
        let csr = m.to_csr();
        prop_assert_eq!(csr.nnz(), m.nnz());
        if m.is_empty() {
            prop_assert_eq!(csr.row_starts, vec![0]);
        } else {
            prop_assert_eq!(csr.row_starts.len(), m.n_rows() + 1);
            for r in 0..m.n_rows() {
                prop_assert_eq!(csr.row_starts[r + 1] - csr.row_starts[r], m.row_entries(r).len());
                let row: Vec<_> = csr.row_iter(r).collect();
                prop_assert_eq!(row, m.row_entries(r));
            }
        }
    }
}
