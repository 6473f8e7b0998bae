//! Gordan Enum - Hilbert Basis and Extreme Ray Enumeration
//!
//! This crate enumerates the minimal integer generating set (the Hilbert
//! basis) of a rational polyhedral cone, given as the intersection of the
//! non-negative orthant with a linear subspace, optionally restricted by
//! combinatorial validity constraints of the form "at most one of these
//! coordinates may be non-zero".
//!
//! The pieces fit together as follows:
//! - [`DoubleDescription`] enumerates the extreme rays of the full cone
//! - [`MaxAdmissible`] partitions the admissible region into maximal
//!   admissible faces, pruning through a [`TypeTrie`]
//! - [`HilbertPrimal`] drives the whole pipeline: one cone-solver call
//!   per face, merged with duplicates suppressed
//! - [`HilbertDual`] computes Hilbert bases directly by hyperplane
//!   intersection, and backs the built-in [`DualConeSolver`]
//! - [`HilbertCD`] is a slow but simple breadth-first alternative, kept
//!   for small systems and cross-checking
//!
//! # Examples
//!
//! ```
//! use gordan_enum::{HilbertPrimal, ValidityConstraints};
//! use gordan_maths::{Integer, Vector};
//!
//! // The extreme rays of a cone in dimension 3. The three rays are not
//! // enough to generate every integer point of their cone: the point
//! // (1,1,1) is irreducible too, so the Hilbert basis has four elements.
//! let rays = [
//!     Vector::from(vec![Integer::from(1), Integer::from(1), Integer::from(0)]),
//!     Vector::from(vec![Integer::from(0), Integer::from(1), Integer::from(1)]),
//!     Vector::from(vec![Integer::from(1), Integer::from(0), Integer::from(1)]),
//! ];
//!
//! let mut basis: Vec<Vector<Integer>> = Vec::new();
//! HilbertPrimal::enumerate(
//!     |vec| basis.push(vec),
//!     rays.iter(),
//!     &ValidityConstraints::none(),
//!     None,
//! )
//! .unwrap();
//! assert_eq!(basis.len(), 4);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod doubledescription;
pub mod hilbertcd;
pub mod hilbertdual;
pub mod hilbertprimal;
pub mod maxadmissible;
pub mod normaliz;
pub mod ordering;
pub mod typetrie;
pub mod validityconstraints;

pub use doubledescription::DoubleDescription;
pub use hilbertcd::HilbertCD;
pub use hilbertdual::HilbertDual;
pub use hilbertprimal::HilbertPrimal;
pub use maxadmissible::MaxAdmissible;
pub use normaliz::{ConeSolver, DualConeSolver, SolverError};
pub use ordering::PosOrder;
pub use typetrie::TypeTrie;
pub use validityconstraints::ValidityConstraints;
