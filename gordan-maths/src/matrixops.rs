//! Exact linear algebra on integer matrices.
//!
//! The only operation the enumeration engine needs here is a kernel-basis
//! computation: given an integer matrix `M`, find integer vectors spanning
//! `{ x : M x = 0 }`. Elimination runs over exact rationals; each basis
//! vector is then cleared of denominators and reduced to primitive form.

use crate::integer::Integer;
use crate::matrix::MatrixInt;
use crate::vector::Vector;
use num_bigint::BigInt;
use num_integer::Integer as _;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Reduces an exact rational copy of the matrix to reduced row echelon
/// form, returning the working rows and the pivot columns.
fn row_reduce(matrix: &MatrixInt) -> (Vec<Vec<BigRational>>, Vec<usize>) {
    let rows = matrix.rows();
    let cols = matrix.cols();

    let mut work: Vec<Vec<BigRational>> = (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| BigRational::from_integer(matrix.entry(r, c).to_bigint()))
                .collect()
        })
        .collect();

    let mut pivot_cols: Vec<usize> = Vec::new();
    let mut rank = 0;
    for col in 0..cols {
        let Some(pivot_row) = (rank..rows).find(|&r| !work[r][col].is_zero()) else {
            continue;
        };
        work.swap(rank, pivot_row);

        let pivot = work[rank][col].clone();
        for entry in &mut work[rank] {
            *entry /= pivot.clone();
        }

        for r in 0..rows {
            if r == rank || work[r][col].is_zero() {
                continue;
            }
            let factor = work[r][col].clone();
            for c in 0..cols {
                let delta = &factor * &work[rank][c];
                work[r][c] -= delta;
            }
        }

        pivot_cols.push(col);
        rank += 1;
        if rank == rows {
            break;
        }
    }

    (work, pivot_cols)
}

/// Computes a basis of primitive integer vectors for the kernel
/// `{ x : M x = 0 }` of the given matrix.
///
/// Returns one vector per free column of the reduced system; the result is
/// empty exactly when the matrix has full column rank.
pub fn kernel_basis(matrix: &MatrixInt) -> Vec<Vector<Integer>> {
    let cols = matrix.cols();
    let (work, pivot_cols) = row_reduce(matrix);
    let rank = pivot_cols.len();

    // One kernel vector per free column: x[free] = 1, pivots balance.
    let mut basis = Vec::with_capacity(cols - rank);
    let mut is_pivot = vec![false; cols];
    for &c in &pivot_cols {
        is_pivot[c] = true;
    }

    for free in (0..cols).filter(|&c| !is_pivot[c]) {
        let mut rational: Vec<BigRational> = vec![BigRational::zero(); cols];
        rational[free] = BigRational::one();
        for (i, &pc) in pivot_cols.iter().enumerate() {
            rational[pc] = -work[i][free].clone();
        }
        basis.push(clear_denominators(&rational));
    }

    basis
}

/// Computes a basis of primitive integer vectors for the row space of the
/// given matrix: one vector per pivot of the reduced system.
pub fn row_space_basis(matrix: &MatrixInt) -> Vec<Vector<Integer>> {
    let (work, pivot_cols) = row_reduce(matrix);
    work[..pivot_cols.len()]
        .iter()
        .map(|row| clear_denominators(row))
        .collect()
}

/// Scales a rational vector to a primitive integer vector along the same
/// line.
fn clear_denominators(rational: &[BigRational]) -> Vector<Integer> {
    let mut lcm = BigInt::one();
    for entry in rational {
        if !entry.is_zero() {
            lcm = lcm.lcm(entry.denom());
        }
    }

    let mut scaled: Vec<BigInt> = rational
        .iter()
        .map(|entry| entry.numer() * (&lcm / entry.denom()))
        .collect();

    let mut gcd = BigInt::zero();
    for entry in &scaled {
        gcd = gcd.gcd(entry);
    }
    if !gcd.is_zero() && !gcd.is_one() {
        for entry in &mut scaled {
            *entry /= &gcd;
        }
    }

    Vector::from(
        scaled
            .into_iter()
            .map(Integer::from_bigint)
            .collect::<Vec<_>>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix;

    fn matrix(rows: &[&[i64]]) -> MatrixInt {
        Matrix::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|&v| Integer::from(v)).collect())
                .collect(),
        )
    }

    fn assert_in_kernel(m: &MatrixInt, v: &Vector<Integer>) {
        for r in 0..m.rows() {
            assert!(v.dot(m.row(r)).is_zero(), "kernel vector fails row {r}");
        }
    }

    #[test]
    fn test_full_rank_has_empty_kernel() {
        let m = matrix(&[&[1, 0], &[0, 1]]);
        assert!(kernel_basis(&m).is_empty());
    }

    #[test]
    fn test_single_equation() {
        // x + y + z = 0 has a two-dimensional kernel.
        let m = matrix(&[&[1, 1, 1]]);
        let basis = kernel_basis(&m);
        assert_eq!(basis.len(), 2);
        for v in &basis {
            assert_in_kernel(&m, v);
            assert!(!v.is_zero());
        }
    }

    #[test]
    fn test_denominators_cleared() {
        // 2x = 3y forces a rational pivot entry; the basis vector must
        // still come out integral and primitive.
        let m = matrix(&[&[2, -3]]);
        let basis = kernel_basis(&m);
        assert_eq!(basis.len(), 1);
        assert_in_kernel(&m, &basis[0]);
        let gcd = basis[0][0].gcd(&basis[0][1]);
        assert_eq!(gcd, Integer::from(1));
    }

    #[test]
    fn test_redundant_rows() {
        let m = matrix(&[&[1, -1, 0], &[2, -2, 0], &[0, 0, 0]]);
        let basis = kernel_basis(&m);
        assert_eq!(basis.len(), 2);
        for v in &basis {
            assert_in_kernel(&m, v);
        }
    }

    #[test]
    fn test_row_space_basis() {
        let m = matrix(&[&[2, 4, 0], &[1, 2, 0], &[0, 0, 3]]);
        let basis = row_space_basis(&m);
        assert_eq!(basis.len(), 2);
        assert_eq!(basis[0].as_slice(), &[Integer::from(1), Integer::from(2), Integer::from(0)]);
        assert_eq!(basis[1].as_slice(), &[Integer::from(0), Integer::from(0), Integer::from(1)]);
    }

    #[test]
    fn test_kernel_of_ray_span() {
        // Rays (1,0,1) and (0,1,1) span a plane; its kernel under the
        // transpose view is the single normal direction (1,1,-1).
        let m = matrix(&[&[1, 0, 1], &[0, 1, 1]]);
        let basis = kernel_basis(&m);
        assert_eq!(basis.len(), 1);
        assert_in_kernel(&m, &basis[0]);
    }
}
