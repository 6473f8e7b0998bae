//! Hyperplane orderings for incremental cone intersection.
//!
//! Both the double-description and dual drivers intersect one hyperplane
//! at a time, and the order matters enormously for the size of the
//! intermediate solution sets. [`PosOrder`] prefers hyperplanes with few
//! non-zero coefficients, which tend to cut off the fewest rays.

use gordan_maths::MatrixInt;

/// An ordering of the rows of a hyperplane matrix.
///
/// Rows with fewer non-zero entries sort first; ties break by row index,
/// so the ordering is deterministic.
pub struct PosOrder<'a> {
    matrix: &'a MatrixInt,
}

impl<'a> PosOrder<'a> {
    /// Creates an ordering over the rows of the given matrix.
    pub fn new(matrix: &'a MatrixInt) -> Self {
        PosOrder { matrix }
    }

    fn weight(&self, row: usize) -> usize {
        self.matrix
            .row(row)
            .iter()
            .filter(|entry| !entry.is_zero())
            .count()
    }

    /// Returns the processing order for all rows: the first
    /// `initial_rows` rows keep their original positions, and the rest
    /// are sorted under this ordering.
    pub fn sorted_rows(&self, initial_rows: usize) -> Vec<usize> {
        let rows = self.matrix.rows();
        let pinned = initial_rows.min(rows);
        let mut order: Vec<usize> = (0..rows).collect();
        order[pinned..].sort_by_key(|&r| (self.weight(r), r));
        order
    }
}
