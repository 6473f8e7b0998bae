//! The cone solver boundary.
//!
//! The primal driver delegates each maximal admissible face to a
//! Normaliz-style solver: a pure function taking the extreme rays of a
//! cone (as multiprecision integer vectors) and returning the Hilbert
//! basis of the cone they generate, with respect to the full integer
//! lattice. The driver treats the solver as a trusted black box and
//! converts every failure into an unsolved case.
//!
//! [`DualConeSolver`] is the built-in implementation, with two routes:
//!
//! - The faces handed over by the driver are faces of an
//!   orthant-and-subspace cone, and such a face equals the intersection
//!   of the orthant with the linear span of its own extreme rays. When
//!   the input passes that test (verified, never assumed), the solver
//!   computes an exact kernel basis of the ray span and runs the dual
//!   algorithm on those equations directly.
//! - For arbitrary ray sets the generated cone can be strictly smaller
//!   than orthant-intersect-span. The solver then enumerates the facets
//!   of the generated cone through its polar (a double description run
//!   on a slack-variable lift) and runs the dual algorithm on the facet
//!   system, again with slack variables turning inequalities into
//!   orthant coordinates. The slack lift is an additive bijection, so
//!   the Hilbert basis projects back exactly.

use crate::doubledescription::DoubleDescription;
use crate::hilbertdual::HilbertDual;
use crate::validityconstraints::ValidityConstraints;
use gordan_maths::matrixops::{kernel_basis, row_space_basis};
use gordan_maths::{Integer, Matrix, MatrixInt, Vector};
use num_bigint::BigInt;
use num_traits::Signed;
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::trace;

/// Error type for cone solver implementations.
#[derive(Error, Debug)]
pub enum SolverError {
    /// The solver received input it cannot handle.
    #[error("cone solver rejected its input: {0}")]
    BadInput(String),
    /// The solver failed to compute a Hilbert basis.
    #[error("cone solver failed: {0}")]
    Failed(String),
}

/// A Normaliz-style Hilbert basis solver for a single cone.
///
/// Implementations must behave as pure functions of their input: the
/// driver may call them once per face in any order.
pub trait ConeSolver {
    /// Computes the Hilbert basis of the cone generated by the given
    /// rays, with respect to the full integer lattice. Every input
    /// coordinate is non-negative; every output vector must have the same
    /// dimension as the inputs.
    fn hilbert_basis(&self, rays: &[Vec<BigInt>]) -> Result<Vec<Vec<BigInt>>, SolverError>;
}

/// The built-in cone solver, backed by the dual algorithm.
#[derive(Debug, Default, Clone, Copy)]
pub struct DualConeSolver;

impl ConeSolver for DualConeSolver {
    fn hilbert_basis(&self, rays: &[Vec<BigInt>]) -> Result<Vec<Vec<BigInt>>, SolverError> {
        let Some(first) = rays.first() else {
            return Ok(Vec::new());
        };
        let dim = first.len();
        if dim == 0 {
            return Err(SolverError::BadInput("zero-dimensional rays".into()));
        }
        for ray in rays {
            if ray.len() != dim {
                return Err(SolverError::BadInput(
                    "rays of inconsistent dimension".into(),
                ));
            }
            if ray.iter().any(Signed::is_negative) {
                return Err(SolverError::BadInput(
                    "ray with negative coordinate".into(),
                ));
            }
        }

        let ray_matrix = Matrix::from_rows(
            rays.iter()
                .map(|ray| ray.iter().cloned().map(Integer::from_bigint).collect())
                .collect(),
        );

        // Equations cutting out the linear span of the rays.
        let equations = kernel_basis(&ray_matrix);
        let span_system = rows_or_empty(equations, dim);

        if Self::spans_whole_face(&ray_matrix, &span_system)? {
            trace!(rays = rays.len(), dim, "solving facial cone via its span");
            return run_dual(&span_system, dim);
        }

        trace!(rays = rays.len(), dim, "solving general cone via its facets");
        Self::general_cone_basis(&ray_matrix, &span_system, dim)
    }
}

impl DualConeSolver {
    /// Determines whether the generated cone fills the whole intersection
    /// of the orthant with the ray span: true exactly when every extreme
    /// ray of that intersection is parallel to an input ray.
    fn spans_whole_face(
        ray_matrix: &MatrixInt,
        span_system: &MatrixInt,
    ) -> Result<bool, SolverError> {
        let mut primitive_inputs: FxHashSet<Vec<BigInt>> = FxHashSet::default();
        for r in 0..ray_matrix.rows() {
            let mut primitive = Vector::from(ray_matrix.row(r).to_vec());
            primitive.scale_down();
            primitive_inputs.insert(primitive.iter().map(Integer::to_bigint).collect());
        }

        let mut facial = true;
        DoubleDescription::enumerate(
            |extreme: Vector<Integer>| {
                let key: Vec<BigInt> = extreme.iter().map(Integer::to_bigint).collect();
                if !primitive_inputs.contains(&key) {
                    facial = false;
                }
            },
            span_system,
            &ValidityConstraints::none(),
            None,
            0,
        )
        .map_err(|err| SolverError::Failed(err.to_string()))?;
        Ok(facial)
    }

    /// Hilbert basis of an arbitrary generated cone: enumerate its facet
    /// normals through the polar, then solve the inequality system with
    /// slack variables.
    fn general_cone_basis(
        ray_matrix: &MatrixInt,
        span_system: &MatrixInt,
        dim: usize,
    ) -> Result<Vec<Vec<BigInt>>, SolverError> {
        let span = row_space_basis(ray_matrix);
        let rank = span.len();
        let n_rays = ray_matrix.rows();

        // The polar of the cone, inside its span: { t : G t >= 0 } where
        // G[i][j] is the dot product of ray i with span basis vector j.
        // Lifted with t = u - v and slacks s, this is the orthant cone
        // { (u, v, s) >= 0 : G u - G v - s = 0 }.
        let mut lifted = Matrix::zero(n_rays, 2 * rank + n_rays);
        for i in 0..n_rays {
            for (j, basis_vec) in span.iter().enumerate() {
                let g = basis_vec.dot(ray_matrix.row(i));
                *lifted.entry_mut(i, rank + j) = -g.clone();
                *lifted.entry_mut(i, j) = g;
            }
            *lifted.entry_mut(i, 2 * rank + i) = Integer::from(-1);
        }

        // Every extreme ray of the lift projects to a valid inequality,
        // and every facet normal appears among the projections; redundant
        // inequalities are harmless downstream.
        let mut normals: Vec<Vector<Integer>> = Vec::new();
        let mut seen: FxHashSet<Vec<BigInt>> = FxHashSet::default();
        DoubleDescription::enumerate(
            |w: Vector<Integer>| {
                let mut normal = Vector::zero(dim);
                for (j, basis_vec) in span.iter().enumerate() {
                    let mut coeff = w[j].clone();
                    coeff -= &w[rank + j];
                    if coeff.is_zero() {
                        continue;
                    }
                    let mut scaled: Vector<Integer> = basis_vec.clone();
                    scaled *= &coeff;
                    normal += &scaled;
                }
                if normal.is_zero() {
                    return;
                }
                normal.scale_down();
                let key: Vec<BigInt> = normal.iter().map(Integer::to_bigint).collect();
                if seen.insert(key) {
                    normals.push(normal);
                }
            },
            &lifted,
            &ValidityConstraints::none(),
            None,
            0,
        )
        .map_err(|err| SolverError::Failed(err.to_string()))?;

        // The cone is { x : span equations hold, normals . x >= 0 }.
        // Slack variables turn the inequalities into equations over the
        // orthant; (x, s) <-> x is an additive bijection, so the Hilbert
        // basis carries over coordinate for coordinate.
        let n_facets = normals.len();
        let n_eqns = span_system.rows();
        let mut system = Matrix::zero(n_eqns + n_facets, dim + n_facets);
        for r in 0..n_eqns {
            for c in 0..dim {
                *system.entry_mut(r, c) = span_system.entry(r, c).clone();
            }
        }
        for (f, normal) in normals.iter().enumerate() {
            for c in 0..dim {
                *system.entry_mut(n_eqns + f, c) = normal[c].clone();
            }
            *system.entry_mut(n_eqns + f, dim + f) = Integer::from(-1);
        }

        let mut basis: Vec<Vec<BigInt>> = Vec::new();
        HilbertDual::enumerate(
            |vec: Vector<Integer>| {
                basis.push(vec.iter().take(dim).map(Integer::to_bigint).collect());
            },
            &system,
            &ValidityConstraints::none(),
            None,
            0,
        )
        .map_err(|err| SolverError::Failed(err.to_string()))?;

        Ok(basis)
    }
}

/// Builds a hyperplane matrix from basis rows, keeping the column count
/// when there are no rows at all.
fn rows_or_empty(rows: Vec<Vector<Integer>>, dim: usize) -> MatrixInt {
    if rows.is_empty() {
        Matrix::zero(0, dim)
    } else {
        Matrix::from_rows(rows.into_iter().map(Vector::into_vec).collect())
    }
}

/// Runs the dual algorithm over a pure equation system and collects the
/// resulting basis.
fn run_dual(system: &MatrixInt, dim: usize) -> Result<Vec<Vec<BigInt>>, SolverError> {
    let mut basis: Vec<Vec<BigInt>> = Vec::new();
    HilbertDual::enumerate(
        |vec: Vector<Integer>| {
            basis.push(vec.iter().take(dim).map(Integer::to_bigint).collect());
        },
        system,
        &ValidityConstraints::none(),
        None,
        0,
    )
    .map_err(|err| SolverError::Failed(err.to_string()))?;
    Ok(basis)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rays(raw: &[&[i64]]) -> Vec<Vec<BigInt>> {
        raw.iter()
            .map(|ray| ray.iter().map(|&v| BigInt::from(v)).collect())
            .collect()
    }

    fn solve_sorted(raw: &[&[i64]]) -> Vec<Vec<i64>> {
        let mut basis: Vec<Vec<i64>> = DualConeSolver
            .hilbert_basis(&rays(raw))
            .expect("solver succeeds")
            .into_iter()
            .map(|v| {
                v.into_iter()
                    .map(|c| c.try_into().expect("small test values"))
                    .collect()
            })
            .collect();
        basis.sort();
        basis
    }

    #[test]
    fn test_empty_input() {
        assert!(DualConeSolver.hilbert_basis(&[]).expect("ok").is_empty());
    }

    #[test]
    fn test_unit_rays_are_their_own_basis() {
        let basis = solve_sorted(&[&[1, 0, 0], &[0, 1, 0], &[0, 0, 1]]);
        assert_eq!(
            basis,
            vec![vec![0, 0, 1], vec![0, 1, 0], vec![1, 0, 0]]
        );
    }

    #[test]
    fn test_unimodular_pair() {
        let basis = solve_sorted(&[&[1, 1, 0], &[0, 1, 1]]);
        assert_eq!(basis, vec![vec![0, 1, 1], vec![1, 1, 0]]);
    }

    #[test]
    fn test_interior_generator_found() {
        // cone((2,0,1), (0,2,1)) needs the interior point (1,1,1).
        let basis = solve_sorted(&[&[2, 0, 1], &[0, 2, 1]]);
        assert_eq!(
            basis,
            vec![vec![0, 2, 1], vec![1, 1, 1], vec![2, 0, 1]]
        );
    }

    #[test]
    fn test_single_ray() {
        let basis = solve_sorted(&[&[2, 4]]);
        // The primitive vector along the ray generates everything.
        assert_eq!(basis, vec![vec![1, 2]]);
    }

    #[test]
    fn test_non_facial_cone_uses_facets() {
        // These rays span all of three-dimensional space, but generate a
        // strictly smaller cone than the orthant: the facet route must
        // kick in, and the interior point (1,1,1) is part of the basis.
        let basis = solve_sorted(&[&[1, 1, 0], &[0, 1, 1], &[1, 0, 1]]);
        assert_eq!(
            basis,
            vec![
                vec![0, 1, 1],
                vec![1, 0, 1],
                vec![1, 1, 0],
                vec![1, 1, 1],
            ]
        );
    }

    #[test]
    fn test_negative_input_rejected() {
        let result = DualConeSolver.hilbert_basis(&rays(&[&[1, -1]]));
        assert!(matches!(result, Err(SolverError::BadInput(_))));
    }

    #[test]
    fn test_inconsistent_dimensions_rejected() {
        let result = DualConeSolver.hilbert_basis(&rays(&[&[1, 0], &[1, 0, 0]]));
        assert!(matches!(result, Err(SolverError::BadInput(_))));
    }
}
