//! Enumeration of maximal admissible faces.
//!
//! A face of the non-negative orthant is identified with the bitmask of
//! coordinates allowed to be non-zero in its relative interior. A face is
//! *admissible* if it meets every validity constraint in at most one
//! position, and it is realised by the cone if it is a union of supports
//! of extreme rays. This module enumerates the admissible realised faces
//! that are maximal under set inclusion; the Hilbert basis driver then
//! solves one sub-cone per maximal face.

use crate::typetrie::TypeTrie;
use crate::validityconstraints::ValidityConstraints;
use gordan_core::bitmask::BitmaskLike;
use gordan_maths::{Integer, Vector};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Enumerates the inclusion-maximal admissible faces of a cone.
///
/// All routines of interest are associated functions; no value of this
/// type is ever constructed.
pub struct MaxAdmissible;

impl MaxAdmissible {
    /// Returns the support bitmask of a ray: the set of coordinates at
    /// which it is strictly positive.
    pub fn support<B: BitmaskLike>(ray: &Vector<Integer>, dim: usize) -> B {
        let mut mask = B::with_len(dim);
        for (i, coord) in ray.iter().enumerate() {
            if coord.is_positive() {
                mask.set(i, true);
            }
        }
        mask
    }

    /// Determines whether a face mask meets every constraint in at most
    /// one position.
    pub fn is_admissible<B: BitmaskLike>(face: &B, constraint_masks: &[B]) -> bool {
        constraint_masks
            .iter()
            .all(|c| face.intersection(c).at_most_one_bit())
    }

    /// Enumerates all maximal admissible faces spanned by the given rays,
    /// over coordinate vectors of dimension `dim`.
    ///
    /// With no rays the result is empty. With an empty constraint set the
    /// result is the single face covering the union of all supports.
    pub fn enumerate<'a, B, I>(rays: I, constraints: &ValidityConstraints, dim: usize) -> Vec<B>
    where
        B: BitmaskLike,
        I: IntoIterator<Item = &'a Vector<Integer>>,
    {
        let constraint_masks: Vec<B> = constraints.bitmasks(dim);

        // Distinct admissible ray supports, in first-seen order.
        let mut supports: Vec<B> = Vec::new();
        let mut seen: FxHashSet<B> = FxHashSet::default();
        for ray in rays {
            let mask = Self::support(ray, dim);
            if Self::is_admissible(&mask, &constraint_masks) && seen.insert(mask.clone()) {
                supports.push(mask);
            }
        }
        if supports.is_empty() {
            return Vec::new();
        }

        // Close the support set under admissible unions. Insertion order
        // is preserved so that later tie-breaking is deterministic.
        let mut discovered: Vec<B> = supports.clone();
        let mut queue: VecDeque<usize> = (0..discovered.len()).collect();
        while let Some(at) = queue.pop_front() {
            let face = discovered[at].clone();
            for support in &supports {
                if face.contains(support) {
                    continue;
                }
                let bigger = face.union(support);
                if seen.contains(&bigger) || !Self::is_admissible(&bigger, &constraint_masks) {
                    continue;
                }
                seen.insert(bigger.clone());
                queue.push_back(discovered.len());
                discovered.push(bigger);
            }
        }

        // Keep only faces that no other face strictly contains. Faces are
        // visited largest first; a face is dominated exactly when the
        // complement of some kept face is a subset of its own complement,
        // which is the trie's domination query over 0/1 type vectors.
        let mut order: Vec<usize> = (0..discovered.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(discovered[i].count()));

        let mut kept_at: Vec<usize> = Vec::new();
        let mut trie: TypeTrie<2> = TypeTrie::new();
        for &i in &order {
            let complement = mask_types(&discovered[i].complement(dim), dim);
            if !trie.dominates(&complement) {
                trie.insert(&complement);
                kept_at.push(i);
            }
        }

        // Report maximal faces in discovery order.
        kept_at.sort_unstable();
        kept_at.into_iter().map(|i| discovered[i].clone()).collect()
    }
}

/// Expands a bitmask into a 0/1 type vector of the given length.
fn mask_types<B: BitmaskLike>(mask: &B, dim: usize) -> Vec<u8> {
    (0..dim).map(|i| u8::from(mask.get(i))).collect()
}
