//! Gordan Core - Bitmasks, Set Tries, Progress Tracking and Errors
//!
//! This crate provides the foundational utilities for the gordan Hilbert
//! basis engine:
//! - A family of fixed-width bitmasks ([`Bitmask1`], [`Bitmask2`],
//!   [`Bitmask`]) behind the common [`BitmaskLike`] trait
//! - A binary trie over bitmasks ([`TrieSet`]) supporting the subset and
//!   superset queries used by vertex enumeration
//! - A thread-safe [`ProgressTracker`] with cooperative cancellation
//! - The engine-wide error taxonomy ([`EnumerationError`])
//!
//! # Examples
//!
//! ```
//! use gordan_core::bitmask::{Bitmask1, BitmaskLike};
//!
//! let mut mask = Bitmask1::with_len(9);
//! mask.set(0, true);
//! mask.set(3, true);
//! mask.set(8, true);
//! assert_eq!(mask.count(), 3);
//! assert_eq!(mask.last_bit(), Some(8));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod bitmask;
pub mod error;
pub mod progress;
pub mod trieset;

pub use bitmask::{Bitmask, Bitmask1, Bitmask2, BitmaskLike};
pub use error::{EnumerationError, EnumerationResult};
pub use progress::{ProgressTracker, ProgressTrackerOpen};
pub use trieset::TrieSet;
