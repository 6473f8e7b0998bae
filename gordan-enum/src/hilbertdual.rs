//! A modified dual algorithm for Hilbert basis enumeration.
//!
//! This follows the dual algorithm of Bruns and Ichim ("Normaliz:
//! algorithms for affine monoids and rational cones", J. Algebra 324,
//! 2010), modified to support validity constraints. The Hilbert basis of
//! the non-negative orthant is the set of unit vectors; the algorithm then
//! intersects one hyperplane at a time, converting the basis of the
//! current cone into the basis of its intersection with the hyperplane by
//! a completion loop over positive/negative pairs with a reduction test.
//!
//! Validity constraints may be imposed throughout: invalidity is preserved
//! under addition, so sums that violate a constraint are discarded the
//! moment they are formed.

use crate::maxadmissible::MaxAdmissible;
use crate::ordering::PosOrder;
use crate::validityconstraints::ValidityConstraints;
use gordan_core::bitmask::{Bitmask, Bitmask1, Bitmask2, BitmaskLike};
use gordan_core::error::{EnumerationError, EnumerationResult};
use gordan_core::progress::ProgressTracker;
use gordan_maths::{Integer, MatrixInt, Vector};
use std::collections::VecDeque;
use tracing::debug;

/// A candidate basis vector: its coordinates, the bitmask of non-zero
/// coordinates, and its dot product with the hyperplane currently being
/// processed.
struct VecSpec<B> {
    vector: Vector<Integer>,
    mask: B,
    next_hyp: Integer,
}

impl<B: BitmaskLike> VecSpec<B> {
    /// The unit vector in the given position, with no dot product yet.
    fn unit(pos: usize, dim: usize) -> Self {
        let mut mask = B::with_len(dim);
        mask.set(pos, true);
        VecSpec {
            vector: Vector::unit(dim, pos),
            mask,
            next_hyp: Integer::zero(),
        }
    }

    /// The sum of two vectors lying on opposite sides of the current
    /// hyperplane.
    fn sum(pos: &VecSpec<B>, neg: &VecSpec<B>) -> Self {
        let mut vector = pos.vector.clone();
        vector += &neg.vector;
        let mut mask = pos.mask.clone();
        mask.union_with(&neg.mask);
        let mut next_hyp = pos.next_hyp.clone();
        next_hyp += &neg.next_hyp;
        VecSpec {
            vector,
            mask,
            next_hyp,
        }
    }

    /// Determines whether every coordinate of `other` is at most the
    /// corresponding coordinate of this vector.
    fn dominated_by(&self, other: &VecSpec<B>) -> bool {
        // The mask test is a fast way of saying no.
        if !self.mask.contains(&other.mask) {
            return false;
        }
        self.vector
            .iter()
            .zip(other.vector.iter())
            .all(|(a, b)| b <= a)
    }
}

/// Implements the dual algorithm for Hilbert basis enumeration.
///
/// All routines of interest are associated functions; no value of this
/// type is ever constructed.
pub struct HilbertDual;

impl HilbertDual {
    /// Enumerates the Hilbert basis of the intersection of the
    /// non-negative orthant with the null space of `subspace`, streaming
    /// each basis element into `action` exactly once, in no particular
    /// order.
    ///
    /// If `constraints` is non-empty, only valid basis elements are
    /// produced. The first `initial_rows` hyperplanes are processed in
    /// their given order; the rest are sorted to keep intermediate bases
    /// small. Cancellation through the tracker is honoured between
    /// hyperplanes.
    pub fn enumerate<A>(
        action: A,
        subspace: &MatrixInt,
        constraints: &ValidityConstraints,
        tracker: Option<&ProgressTracker>,
        initial_rows: usize,
    ) -> EnumerationResult<()>
    where
        A: FnMut(Vector<Integer>),
    {
        let dim = subspace.cols();
        if dim == 0 {
            return Err(EnumerationError::InvalidInput(
                "hyperplane matrix has no columns".into(),
            ));
        }

        if dim <= 64 {
            Self::enumerate_using_bitmask::<Bitmask1, A>(
                action,
                subspace,
                constraints,
                tracker,
                initial_rows,
            )
        } else if dim <= 128 {
            Self::enumerate_using_bitmask::<Bitmask2, A>(
                action,
                subspace,
                constraints,
                tracker,
                initial_rows,
            )
        } else {
            Self::enumerate_using_bitmask::<Bitmask, A>(
                action,
                subspace,
                constraints,
                tracker,
                initial_rows,
            )
        }
    }

    fn enumerate_using_bitmask<B, A>(
        mut action: A,
        subspace: &MatrixInt,
        constraints: &ValidityConstraints,
        tracker: Option<&ProgressTracker>,
        initial_rows: usize,
    ) -> EnumerationResult<()>
    where
        B: BitmaskLike,
        A: FnMut(Vector<Integer>),
    {
        let dim = subspace.cols();
        let constraint_masks: Vec<B> = constraints.bitmasks(dim);

        // The Hilbert basis of the orthant itself.
        let mut basis: Vec<VecSpec<B>> = (0..dim).map(|pos| VecSpec::unit(pos, dim)).collect();

        let order = PosOrder::new(subspace).sorted_rows(initial_rows);
        let total = order.len();
        for (done, &row) in order.iter().enumerate() {
            if let Some(tracker) = tracker {
                if !tracker.set_percent(100.0 * done as f64 / total.max(1) as f64) {
                    return Ok(());
                }
            }
            Self::intersect_hyperplane(&mut basis, subspace.row(row), &constraint_masks);
            if basis.is_empty() {
                break;
            }
        }
        debug!(
            basis = basis.len(),
            hyperplanes = total,
            "dual algorithm complete"
        );

        for vec in basis {
            if tracker.is_some_and(ProgressTracker::is_cancelled) {
                return Ok(());
            }
            action(vec.vector);
        }
        if let Some(tracker) = tracker {
            tracker.set_percent(100.0);
        }
        Ok(())
    }

    /// Tests whether `vec` reduces against any candidate in `against`.
    ///
    /// `vec` reduces against `b` when `vec - b` is non-negative and lies
    /// on the hyperplane (`list_sign == 0`), on or above it
    /// (`list_sign > 0`), or on or below it (`list_sign < 0`).
    fn reduces<B: BitmaskLike>(
        vec: &VecSpec<B>,
        against: &[VecSpec<B>],
        list_sign: i32,
    ) -> bool {
        against.iter().any(|b| {
            let side_ok = match list_sign {
                0 => b.next_hyp == vec.next_hyp,
                s if s > 0 => b.next_hyp <= vec.next_hyp,
                _ => b.next_hyp >= vec.next_hyp,
            };
            side_ok && vec.dominated_by(b)
        })
    }

    /// Converts the Hilbert basis of the current cone into the Hilbert
    /// basis of its intersection with one further hyperplane.
    fn intersect_hyperplane<B: BitmaskLike>(
        basis: &mut Vec<VecSpec<B>>,
        hyperplane: &[Integer],
        constraint_masks: &[B],
    ) {
        let mut zero: Vec<VecSpec<B>> = Vec::new();
        let mut pos: Vec<VecSpec<B>> = Vec::new();
        let mut neg: Vec<VecSpec<B>> = Vec::new();

        for mut vec in basis.drain(..) {
            vec.next_hyp = vec.vector.dot(hyperplane);
            match vec.next_hyp.signum() {
                0 => zero.push(vec),
                1 => pos.push(vec),
                _ => neg.push(vec),
            }
        }

        // Completion: process positive/negative pairs until no pair
        // produces a new irreducible vector. Newly accepted vectors are
        // paired against the entire opposite list.
        let mut pairs: VecDeque<(usize, usize)> = (0..pos.len())
            .flat_map(|p| (0..neg.len()).map(move |n| (p, n)))
            .collect();

        while let Some((p, n)) = pairs.pop_front() {
            let sum = VecSpec::sum(&pos[p], &neg[n]);

            // Invalidity is preserved under addition, so constraint
            // violations can be discarded outright.
            if !constraint_masks.is_empty()
                && !MaxAdmissible::is_admissible(&sum.mask, constraint_masks)
            {
                continue;
            }

            match sum.next_hyp.signum() {
                0 => {
                    if !Self::reduces(&sum, &zero, 0) {
                        zero.push(sum);
                    }
                }
                1 => {
                    if !Self::reduces(&sum, &pos, 1) {
                        pairs.extend((0..neg.len()).map(|n2| (pos.len(), n2)));
                        pos.push(sum);
                    }
                }
                _ => {
                    if !Self::reduces(&sum, &neg, -1) {
                        pairs.extend((0..pos.len()).map(|p2| (p2, neg.len())));
                        neg.push(sum);
                    }
                }
            }
        }

        // Vectors accepted early can be made redundant by later arrivals;
        // one final pass against the finished list removes them.
        let mut reduced: Vec<VecSpec<B>> = Vec::with_capacity(zero.len());
        for (i, vec) in zero.iter().enumerate() {
            let redundant = zero.iter().enumerate().any(|(j, b)| {
                j != i && b.next_hyp == vec.next_hyp && vec.dominated_by(b)
            });
            if !redundant {
                reduced.push(VecSpec {
                    vector: vec.vector.clone(),
                    mask: vec.mask.clone(),
                    next_hyp: Integer::zero(),
                });
            }
        }

        *basis = reduced;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gordan_maths::Matrix;

    fn matrix(rows: &[&[i64]]) -> MatrixInt {
        Matrix::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|&v| Integer::from(v)).collect())
                .collect(),
        )
    }

    fn collect_basis(
        subspace: &MatrixInt,
        constraints: &ValidityConstraints,
    ) -> Vec<Vec<i64>> {
        let mut basis: Vec<Vec<i64>> = Vec::new();
        HilbertDual::enumerate(
            |vec: Vector<Integer>| {
                basis.push(
                    vec.iter()
                        .map(|c| c.to_bigint().try_into().expect("small test values"))
                        .collect(),
                );
            },
            subspace,
            constraints,
            None,
            0,
        )
        .expect("enumeration succeeds");
        basis.sort();
        basis
    }

    #[test]
    fn test_orthant_basis_is_units() {
        let subspace: MatrixInt = Matrix::zero(0, 3);
        let basis = collect_basis(&subspace, &ValidityConstraints::none());
        assert_eq!(
            basis,
            vec![vec![0, 0, 1], vec![0, 1, 0], vec![1, 0, 0]]
        );
    }

    #[test]
    fn test_diagonal_plane() {
        // x0 = x1: basis {(1,1,0), (0,0,1)}.
        let subspace = matrix(&[&[1, -1, 0]]);
        let basis = collect_basis(&subspace, &ValidityConstraints::none());
        assert_eq!(basis, vec![vec![0, 0, 1], vec![1, 1, 0]]);
    }

    #[test]
    fn test_interior_point_needed() {
        // x0 + x1 = 2 x2. The extreme rays are (2,0,1) and (0,2,1), but
        // the Hilbert basis also needs the interior point (1,1,1).
        let subspace = matrix(&[&[1, 1, -2]]);
        let basis = collect_basis(&subspace, &ValidityConstraints::none());
        assert_eq!(
            basis,
            vec![vec![0, 2, 1], vec![1, 1, 1], vec![2, 0, 1]]
        );
    }

    #[test]
    fn test_matching_sums() {
        // x0 + x1 = x2 + x3: the four extreme rays already form the basis.
        let subspace = matrix(&[&[1, 1, -1, -1]]);
        let basis = collect_basis(&subspace, &ValidityConstraints::none());
        assert_eq!(
            basis,
            vec![
                vec![0, 1, 0, 1],
                vec![0, 1, 1, 0],
                vec![1, 0, 0, 1],
                vec![1, 0, 1, 0],
            ]
        );
    }

    #[test]
    fn test_constraints_prune_basis() {
        let subspace = matrix(&[&[1, 1, -1, -1]]);
        let mut constraints = ValidityConstraints::new(4, 1);
        constraints.add_local([0, 2]);
        let basis = collect_basis(&subspace, &constraints);
        assert_eq!(
            basis,
            vec![vec![0, 1, 0, 1], vec![0, 1, 1, 0], vec![1, 0, 0, 1]]
        );
    }

    #[test]
    fn test_infeasible_subspace() {
        let subspace = matrix(&[&[1, 1]]);
        let basis = collect_basis(&subspace, &ValidityConstraints::none());
        assert!(basis.is_empty());
    }

    #[test]
    fn test_two_hyperplanes() {
        let subspace = matrix(&[&[1, -1, 0], &[0, 1, -1]]);
        let basis = collect_basis(&subspace, &ValidityConstraints::none());
        assert_eq!(basis, vec![vec![1, 1, 1]]);
    }

    #[test]
    fn test_cancellation_stops_output() {
        let subspace = matrix(&[&[1, -1, 0]]);
        let tracker = ProgressTracker::new();
        tracker.cancel();
        let mut count = 0usize;
        HilbertDual::enumerate(
            |_vec| count += 1,
            &subspace,
            &ValidityConstraints::none(),
            Some(&tracker),
            0,
        )
        .expect("cancelled run still returns Ok");
        assert_eq!(count, 0);
    }
}
