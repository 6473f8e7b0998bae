//! A modified double description method for extreme ray enumeration.
//!
//! Given a matrix of hyperplanes through the origin, this module computes
//! the extremal rays of the intersection of the non-negative orthant with
//! the null space of that matrix. The algorithm starts from the coordinate
//! axes and intersects one hyperplane at a time: rays lying in the
//! hyperplane survive, and each *adjacent* pair of rays straddling it
//! contributes one combined ray. Adjacency is decided combinatorially (no
//! third ray lies on all facets common to the pair), answered by a
//! [`TrieSet`] over facet bitmasks.
//!
//! Validity constraints prune combined rays as soon as they appear:
//! although validity is not preserved under convex combination,
//! invalidity is, so a pruned ray can never contribute to a valid one.

use crate::maxadmissible::MaxAdmissible;
use crate::ordering::PosOrder;
use crate::validityconstraints::ValidityConstraints;
use gordan_core::bitmask::{Bitmask, Bitmask1, Bitmask2, BitmaskLike};
use gordan_core::error::{EnumerationError, EnumerationResult};
use gordan_core::progress::ProgressTracker;
use gordan_core::trieset::TrieSet;
use gordan_maths::{Integer, MatrixInt, Vector};
use tracing::debug;

/// A ray of an intermediate solution cone: its coordinates plus the
/// bitmask of original orthant facets it lies on (bit `i` set means
/// coordinate `i` is zero).
struct RaySpec<B> {
    vector: Vector<Integer>,
    facets: B,
}

impl<B: BitmaskLike> RaySpec<B> {
    /// The ray along the given non-negative coordinate axis.
    fn axis(axis: usize, dim: usize) -> Self {
        let mut facets = B::with_len(dim);
        facets.set_all(0..dim, true);
        facets.set(axis, false);
        RaySpec {
            vector: Vector::unit(dim, axis),
            facets,
        }
    }
}

/// Implements the double description method for extreme ray enumeration.
///
/// All routines of interest are associated functions; no value of this
/// type is ever constructed.
pub struct DoubleDescription;

impl DoubleDescription {
    /// Enumerates the extremal rays of the intersection of the
    /// non-negative orthant with the null space of `subspace`, streaming
    /// each ray into `action` exactly once, in no particular order.
    ///
    /// Each row of `subspace` is one hyperplane through the origin. If
    /// `constraints` is non-empty, only rays satisfying every constraint
    /// are produced. The first `initial_rows` hyperplanes are processed
    /// in their given order; the rest are sorted to keep intermediate
    /// solution sets small.
    ///
    /// Cancellation through the tracker is honoured between hyperplanes;
    /// a cancelled run returns `Ok` without further output.
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

        let mut list: Vec<RaySpec<B>> = (0..dim).map(|axis| RaySpec::axis(axis, dim)).collect();

        let order = PosOrder::new(subspace).sorted_rows(initial_rows);
        let total = order.len();
        for (done, &row) in order.iter().enumerate() {
            if let Some(tracker) = tracker {
                if !tracker.set_percent(100.0 * done as f64 / total.max(1) as f64) {
                    return Ok(());
                }
            }
            Self::intersect_hyperplane(&mut list, subspace.row(row), dim, &constraint_masks);
            if list.is_empty() {
                break;
            }
        }
        debug!(
            rays = list.len(),
            hyperplanes = total,
            "double description complete"
        );

        for ray in list {
            if tracker.is_some_and(ProgressTracker::is_cancelled) {
                return Ok(());
            }
            action(ray.vector);
        }
        if let Some(tracker) = tracker {
            tracker.set_percent(100.0);
        }
        Ok(())
    }

    /// Replaces the extreme rays of the current solution cone with those
    /// of its intersection with one further hyperplane.
    fn intersect_hyperplane<B: BitmaskLike>(
        list: &mut Vec<RaySpec<B>>,
        hyperplane: &[Integer],
        dim: usize,
        constraint_masks: &[B],
    ) {
        let dots: Vec<Integer> = list.iter().map(|ray| ray.vector.dot(hyperplane)).collect();

        let mut pos: Vec<usize> = Vec::new();
        let mut neg: Vec<usize> = Vec::new();
        for (i, dot) in dots.iter().enumerate() {
            match dot.signum() {
                1 => pos.push(i),
                -1 => neg.push(i),
                _ => {}
            }
        }
        if pos.is_empty() && neg.is_empty() {
            // The hyperplane contains the whole solution set.
            return;
        }

        // Facet sets of every current ray, for the adjacency test. Facet
        // sets of distinct extreme rays are themselves distinct, as the
        // superset query requires.
        let mut all_facets = TrieSet::new();
        for ray in list.iter() {
            all_facets.insert(&ray.facets);
        }

        let mut combined: Vec<RaySpec<B>> = Vec::new();
        for &p in &pos {
            for &n in &neg {
                let rp = &list[p];
                let rn = &list[n];
                let common = rp.facets.intersection(&rn.facets);

                // A combined ray is positive exactly where either parent
                // is, so its support is the complement of the common
                // facets; prune invalid combinations immediately.
                if !constraint_masks.is_empty()
                    && !MaxAdmissible::is_admissible(&common.complement(dim), constraint_masks)
                {
                    continue;
                }

                // Adjacency: no third ray may lie on every common facet.
                if all_facets.has_extra_superset(&common, &rp.facets, &rn.facets, dim) {
                    continue;
                }

                // The combination dp * rn - dn * rp lies in the
                // hyperplane, and both contributions are non-negative.
                let mut vector = Vector::zero(dim);
                for i in 0..dim {
                    let mut a = dots[p].clone();
                    a *= &rn.vector[i];
                    let mut b = dots[n].clone();
                    b *= &rp.vector[i];
                    a -= &b;
                    vector[i] = a;
                }
                vector.scale_down();
                combined.push(RaySpec {
                    vector,
                    facets: common,
                });
            }
        }

        let mut result: Vec<RaySpec<B>> = Vec::with_capacity(combined.len() + list.len());
        for (ray, dot) in std::mem::take(list).into_iter().zip(&dots) {
            if dot.is_zero() {
                result.push(ray);
            }
        }
        result.extend(combined);
        *list = result;
    }
}
