//! Hilbert basis enumeration by Contejean-Devie search.
//!
//! A direct breadth-first algorithm for the minimal solutions of a
//! homogeneous linear Diophantine system over the non-negative integers
//! (Contejean and Devie, "An efficient incremental algorithm for solving
//! systems of linear Diophantine equations", Inf. Comput. 113, 1994).
//! Candidates grow one unit vector at a time, and a step from `t` to
//! `t + e_i` is taken only when the residual `A t` and the column `A e_i`
//! point into opposite half-spaces, which drives the residual toward
//! zero.
//!
//! This is far slower than the dual algorithm on anything sizeable and
//! exists for small systems and for cross-checking; it is the simplest
//! of the three Hilbert basis routines to reason about.

use crate::maxadmissible::MaxAdmissible;
use crate::validityconstraints::ValidityConstraints;
use gordan_core::bitmask::{Bitmask, Bitmask1, Bitmask2, BitmaskLike};
use gordan_core::error::{EnumerationError, EnumerationResult};
use gordan_maths::{Integer, MatrixInt, Vector};
use rustc_hash::FxHashSet;
use tracing::debug;

/// A search node: the candidate vector, its residual under the equation
/// matrix, and the bitmask of non-zero coordinates.
struct Candidate<B> {
    vector: Vector<Integer>,
    residual: Vector<Integer>,
    mask: B,
}

/// Implements the Contejean-Devie algorithm for Hilbert basis
/// enumeration.
///
/// All routines of interest are associated functions; no value of this
/// type is ever constructed.
pub struct HilbertCD;

impl HilbertCD {
    /// Enumerates the Hilbert basis of the intersection of the
    /// non-negative orthant with the null space of `subspace`, streaming
    /// each basis element into `action` exactly once, in no particular
    /// order.
    ///
    /// If `constraints` is non-empty, only valid basis elements are
    /// produced.
    pub fn enumerate<A>(
        action: A,
        subspace: &MatrixInt,
        constraints: &ValidityConstraints,
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
            Self::enumerate_using_bitmask::<Bitmask1, A>(action, subspace, constraints)
        } else if dim <= 128 {
            Self::enumerate_using_bitmask::<Bitmask2, A>(action, subspace, constraints)
        } else {
            Self::enumerate_using_bitmask::<Bitmask, A>(action, subspace, constraints)
        }
    }

    fn enumerate_using_bitmask<B, A>(
        mut action: A,
        subspace: &MatrixInt,
        constraints: &ValidityConstraints,
    ) -> EnumerationResult<()>
    where
        B: BitmaskLike,
        A: FnMut(Vector<Integer>),
    {
        let dim = subspace.cols();
        let n_eqns = subspace.rows();
        let constraint_masks: Vec<B> = constraints.bitmasks(dim);

        // Residuals of the unit vectors, i.e. the columns of the matrix.
        let columns: Vec<Vector<Integer>> = (0..dim)
            .map(|i| {
                Vector::from(
                    (0..n_eqns)
                        .map(|r| subspace.entry(r, i).clone())
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let mut basis: Vec<Candidate<B>> = Vec::new();
        let mut frontier: Vec<Candidate<B>> = Vec::new();
        let mut seen: FxHashSet<Vector<Integer>> = FxHashSet::default();

        for i in 0..dim {
            let mut mask = B::with_len(dim);
            mask.set(i, true);
            let unit = Candidate {
                vector: Vector::unit(dim, i),
                residual: columns[i].clone(),
                mask,
            };
            if Self::admissible(&unit, &constraint_masks) {
                seen.insert(unit.vector.clone());
                frontier.push(unit);
            }
        }

        while !frontier.is_empty() {
            let mut next: Vec<Candidate<B>> = Vec::new();
            for cand in frontier.drain(..) {
                if cand.residual.is_zero() {
                    if !Self::dominated(&cand, &basis) {
                        basis.push(cand);
                    }
                    continue;
                }
                for (i, column) in columns.iter().enumerate() {
                    // Step only against the residual: the dot product of
                    // the residual with the new column must be negative.
                    if !Self::opposes(&cand.residual, column) {
                        continue;
                    }
                    let mut vector = cand.vector.clone();
                    vector[i] += &Integer::one();

                    if seen.contains(&vector) {
                        continue;
                    }
                    let mut mask = cand.mask.clone();
                    mask.set(i, true);
                    let mut residual = cand.residual.clone();
                    residual += column;
                    let next_cand = Candidate {
                        vector,
                        residual,
                        mask,
                    };
                    if !Self::admissible(&next_cand, &constraint_masks)
                        || Self::dominated(&next_cand, &basis)
                    {
                        continue;
                    }
                    seen.insert(next_cand.vector.clone());
                    next.push(next_cand);
                }
            }
            frontier = next;
        }
        debug!(basis = basis.len(), "breadth-first search complete");

        for cand in basis {
            action(cand.vector);
        }
        Ok(())
    }

    /// The Contejean-Devie step condition: the residual and the column
    /// have negative dot product.
    fn opposes(residual: &Vector<Integer>, column: &Vector<Integer>) -> bool {
        residual.dot(column.as_slice()).is_negative()
    }

    fn admissible<B: BitmaskLike>(cand: &Candidate<B>, constraint_masks: &[B]) -> bool {
        constraint_masks.is_empty()
            || MaxAdmissible::is_admissible(&cand.mask, constraint_masks)
    }

    /// Determines whether some basis element is componentwise at most the
    /// candidate (so the candidate cannot be minimal).
    fn dominated<B: BitmaskLike>(cand: &Candidate<B>, basis: &[Candidate<B>]) -> bool {
        basis.iter().any(|b| {
            cand.mask.contains(&b.mask)
                && b.vector
                    .iter()
                    .zip(cand.vector.iter())
                    .all(|(small, large)| small <= large)
        })
    }
}
