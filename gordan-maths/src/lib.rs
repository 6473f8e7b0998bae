//! Gordan Maths - Exact Arithmetic for Cone Enumeration
//!
//! This crate provides the numeric foundation for the gordan Hilbert basis
//! engine:
//! - [`Integer`]: a signed integer with a fast single-word path that
//!   promotes itself to a heap-allocated multiprecision value on overflow,
//!   never wrapping silently
//! - [`Vector`]: a fixed-length, heap-allocated coordinate vector
//! - [`Matrix`]: a dense row-major matrix, used for hyperplane systems
//! - [`matrixops`]: exact kernel-basis computation over the rationals with
//!   integer denominators cleared
//!
//! # Examples
//!
//! ```
//! use gordan_maths::Integer;
//!
//! let mut x = Integer::from(i64::MAX);
//! x += &Integer::from(1);
//! // The value no longer fits a machine word, so it moved to the
//! // multiprecision path; nothing wrapped.
//! assert!(!x.is_native());
//! x -= &Integer::from(1);
//! assert!(x.is_native());
//! assert_eq!(x, Integer::from(i64::MAX));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod integer;
pub mod matrix;
pub mod matrixops;
pub mod vector;

pub use integer::{CoordInt, Integer};
pub use matrix::{Matrix, MatrixInt};
pub use vector::Vector;
