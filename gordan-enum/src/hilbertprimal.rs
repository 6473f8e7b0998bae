//! The primal Hilbert basis driver.
//!
//! Given the extreme rays of a cone (the intersection of the non-negative
//! orthant with a linear subspace) and a set of validity constraints, this
//! driver enumerates the Hilbert basis of the *admissible* part of the
//! cone: it partitions the admissible region into maximal admissible
//! faces, hands the rays of each face to a Normaliz-style cone solver,
//! merges the per-face bases with duplicates suppressed, and streams each
//! basis element to the caller exactly once.
//!
//! Progress moves through fixed milestones: 10 percent once the driver is
//! set up, 30 once the maximal faces are known, 90 once every face is
//! solved, and 100 when the last element has been delivered. Cancellation
//! is honoured at these milestones and between faces; a cancelled run
//! stops calling the action and returns `Ok`.

use crate::maxadmissible::MaxAdmissible;
use crate::normaliz::{ConeSolver, DualConeSolver};
use crate::validityconstraints::ValidityConstraints;
use gordan_core::bitmask::{Bitmask, Bitmask1, Bitmask2, BitmaskLike};
use gordan_core::error::{EnumerationError, EnumerationResult};
use gordan_core::progress::ProgressTracker;
use gordan_maths::{CoordInt, Integer, Vector};
use num_bigint::BigInt;
use rustc_hash::FxHashSet;
use tracing::debug;

/// Implements the primal algorithm for Hilbert basis enumeration.
///
/// All routines of interest are associated functions; no value of this
/// type is ever constructed.
pub struct HilbertPrimal;

impl HilbertPrimal {
    /// Enumerates the Hilbert basis of the admissible region using the
    /// built-in cone solver.
    ///
    /// See [`enumerate_with`](Self::enumerate_with) for the full contract.
    pub fn enumerate<'a, R, A, I>(
        action: A,
        rays: I,
        constraints: &ValidityConstraints,
        tracker: Option<&ProgressTracker>,
    ) -> EnumerationResult<()>
    where
        R: CoordInt,
        A: FnMut(Vector<R>),
        I: IntoIterator<Item = &'a Vector<Integer>>,
    {
        Self::enumerate_with(action, rays, constraints, &DualConeSolver, tracker)
    }

    /// Enumerates the Hilbert basis of the admissible region.
    ///
    /// `rays` must be the extreme rays of the cone, each already
    /// satisfying `constraints` if any are given; they are only read. Each
    /// basis element is delivered to `action` by value exactly once, in no
    /// guaranteed order, with coordinates converted into the caller's
    /// representation `R`.
    ///
    /// # Errors
    ///
    /// [`EnumerationError::InvalidInput`] if the rays are zero-dimensional
    /// or of inconsistent dimensions. [`EnumerationError::UnsolvedCase`]
    /// if the cone solver fails on some face, returns vectors of the
    /// wrong dimension, or a basis coordinate does not fit `R`.
    pub fn enumerate_with<'a, R, A, I, S>(
        action: A,
        rays: I,
        constraints: &ValidityConstraints,
        solver: &S,
        tracker: Option<&ProgressTracker>,
    ) -> EnumerationResult<()>
    where
        R: CoordInt,
        A: FnMut(Vector<R>),
        I: IntoIterator<Item = &'a Vector<Integer>>,
        S: ConeSolver + ?Sized,
    {
        let rays: Vec<&Vector<Integer>> = rays.into_iter().collect();
        let Some(first) = rays.first() else {
            // An empty cone has an empty basis.
            if let Some(tracker) = tracker {
                tracker.set_percent(100.0);
            }
            return Ok(());
        };

        let dim = first.len();
        if dim == 0 {
            return Err(EnumerationError::InvalidInput(
                "extreme rays are zero-dimensional".into(),
            ));
        }
        if rays.iter().any(|ray| ray.len() != dim) {
            return Err(EnumerationError::InvalidInput(
                "extreme rays have inconsistent dimensions".into(),
            ));
        }

        if dim <= 64 {
            Self::enumerate_using_bitmask::<Bitmask1, R, A, S>(
                action,
                &rays,
                dim,
                constraints,
                solver,
                tracker,
            )
        } else if dim <= 128 {
            Self::enumerate_using_bitmask::<Bitmask2, R, A, S>(
                action,
                &rays,
                dim,
                constraints,
                solver,
                tracker,
            )
        } else {
            Self::enumerate_using_bitmask::<Bitmask, R, A, S>(
                action,
                &rays,
                dim,
                constraints,
                solver,
                tracker,
            )
        }
    }

    fn enumerate_using_bitmask<B, R, A, S>(
        mut action: A,
        rays: &[&Vector<Integer>],
        dim: usize,
        constraints: &ValidityConstraints,
        solver: &S,
        tracker: Option<&ProgressTracker>,
    ) -> EnumerationResult<()>
    where
        B: BitmaskLike,
        R: CoordInt,
        A: FnMut(Vector<R>),
        S: ConeSolver + ?Sized,
    {
        if let Some(tracker) = tracker {
            if !tracker.set_percent(10.0) {
                return Ok(());
            }
        }

        let faces: Vec<B> =
            MaxAdmissible::enumerate(rays.iter().copied(), constraints, dim);
        debug!(faces = faces.len(), dim, "maximal admissible faces found");

        if let Some(tracker) = tracker {
            if !tracker.set_percent(30.0) {
                return Ok(());
            }
        }

        // The Hilbert bases of the individual faces overlap; the dedup set
        // is keyed on the exact coordinate sequence.
        let mut basis: FxHashSet<Vec<BigInt>> = FxHashSet::default();
        let total = faces.len();
        for (done, face) in faces.iter().enumerate() {
            if let Some(tracker) = tracker {
                let percent = 30.0 + 60.0 * done as f64 / total as f64;
                if !tracker.set_percent(percent) {
                    return Ok(());
                }
            }

            // A ray lies in the face when every coordinate on which it is
            // positive is permitted by the face.
            let face_rays: Vec<Vec<BigInt>> = rays
                .iter()
                .filter(|ray| face.contains(&MaxAdmissible::support(ray, dim)))
                .map(|ray| ray.iter().map(Integer::to_bigint).collect())
                .collect();

            let face_basis = solver
                .hilbert_basis(&face_rays)
                .map_err(|err| EnumerationError::UnsolvedCase(err.to_string()))?;

            for vec in face_basis {
                if vec.len() != dim {
                    // Never trust unusual solver output silently.
                    return Err(EnumerationError::UnsolvedCase(
                        "cone solver returned a vector of the wrong dimension".into(),
                    ));
                }
                basis.insert(vec);
            }
        }
        debug!(elements = basis.len(), "per-face bases merged");

        if let Some(tracker) = tracker {
            if !tracker.set_percent(90.0) {
                return Ok(());
            }
        }

        for vec in basis {
            let coords: Option<Vec<R>> = vec.iter().map(R::from_bigint).collect();
            let Some(coords) = coords else {
                return Err(EnumerationError::UnsolvedCase(
                    "basis coordinate does not fit the requested integer type".into(),
                ));
            };
            action(Vector::from(coords));
        }

        if let Some(tracker) = tracker {
            tracker.set_percent(100.0);
        }
        Ok(())
    }
}
