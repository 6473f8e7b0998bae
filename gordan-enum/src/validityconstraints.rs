//! Combinatorial validity constraints for cone enumeration.
//!
//! Each individual constraint names a subset of coordinate positions and
//! requires that a ray be strictly positive on at most one of them.
//! Constraint sets are described against a block structure: coordinates
//! are grouped into consecutive blocks of equal size, a *local* constraint
//! is repeated once per block (with positions relative to the block
//! start), and a *global* constraint collects the same relative positions
//! from every block into a single subset. Coordinates beyond the blocks
//! may exist but cannot be constrained.

use gordan_core::bitmask::BitmaskLike;
use smallvec::SmallVec;

/// A set of "at most one non-zero among these coordinates" constraints.
#[derive(Clone, Debug, Default)]
pub struct ValidityConstraints {
    /// The number of coordinates in each block.
    block_size: usize,
    /// The total number of blocks.
    n_blocks: usize,
    /// Local constraint patterns, relative to the start of each block.
    local: Vec<SmallVec<[usize; 4]>>,
    /// Global constraint patterns, relative to the start of each block.
    global: Vec<SmallVec<[usize; 4]>>,
}

impl ValidityConstraints {
    /// Creates an empty constraint set for vectors with the given block
    /// structure.
    pub fn new(block_size: usize, n_blocks: usize) -> Self {
        ValidityConstraints {
            block_size,
            n_blocks,
            local: Vec::new(),
            global: Vec::new(),
        }
    }

    /// The empty sentinel: no constraints at all.
    pub fn none() -> Self {
        ValidityConstraints::default()
    }

    /// Determines whether this set contains no constraints.
    pub fn is_empty(&self) -> bool {
        self.local.is_empty() && self.global.is_empty()
    }

    /// Adds a family of local constraints, one per block. Each block is
    /// constrained on the given positions relative to its own start.
    pub fn add_local<I: IntoIterator<Item = usize>>(&mut self, pattern: I) {
        self.local.push(pattern.into_iter().collect());
    }

    /// Adds a single global constraint collecting the given relative
    /// positions from every block.
    pub fn add_global<I: IntoIterator<Item = usize>>(&mut self, pattern: I) {
        self.global.push(pattern.into_iter().collect());
    }

    /// Expands the constraint set into one bitmask per individual
    /// constraint, over coordinate vectors of the given length.
    ///
    /// Every local pattern contributes one mask per block; every global
    /// pattern contributes a single mask.
    pub fn bitmasks<B: BitmaskLike>(&self, len: usize) -> Vec<B> {
        debug_assert!(len >= self.block_size * self.n_blocks);
        let mut ans = Vec::with_capacity(self.local.len() * self.n_blocks + self.global.len());

        for pattern in &self.local {
            let mut base = 0;
            for _ in 0..self.n_blocks {
                let mut mask = B::with_len(len);
                mask.set_all(pattern.iter().map(|&i| base + i), true);
                ans.push(mask);
                base += self.block_size;
            }
        }

        for pattern in &self.global {
            let mut mask = B::with_len(len);
            let mut base = 0;
            for _ in 0..self.n_blocks {
                mask.set_all(pattern.iter().map(|&i| base + i), true);
                base += self.block_size;
            }
            ans.push(mask);
        }

        ans
    }

    /// Expands the constraint set over vectors of the minimal length,
    /// `block_size * n_blocks`.
    pub fn all_bitmasks<B: BitmaskLike>(&self) -> Vec<B> {
        self.bitmasks(self.block_size * self.n_blocks)
    }
}

impl PartialEq for ValidityConstraints {
    /// Structural equality up to reordering of constraints and of the
    /// positions inside each constraint. Constraint sets are tiny, so the
    /// quadratic comparison does not matter.
    fn eq(&self, other: &Self) -> bool {
        fn same_patterns(a: &[SmallVec<[usize; 4]>], b: &[SmallVec<[usize; 4]>]) -> bool {
            let normalise = |patterns: &[SmallVec<[usize; 4]>]| {
                let mut sorted: Vec<Vec<usize>> = patterns
                    .iter()
                    .map(|p| {
                        let mut p: Vec<usize> = p.to_vec();
                        p.sort_unstable();
                        p
                    })
                    .collect();
                sorted.sort();
                sorted
            };
            normalise(a) == normalise(b)
        }

        self.block_size == other.block_size
            && self.n_blocks == other.n_blocks
            && same_patterns(&self.local, &other.local)
            && same_patterns(&self.global, &other.global)
    }
}

impl Eq for ValidityConstraints {}

#[cfg(test)]
mod tests {
    use super::*;
    use gordan_core::bitmask::Bitmask1;

    fn bits<B: BitmaskLike>(mask: &B, len: usize) -> Vec<usize> {
        (0..len).filter(|&i| mask.get(i)).collect()
    }

    #[test]
    fn test_none_is_empty() {
        assert!(ValidityConstraints::none().is_empty());
        assert!(ValidityConstraints::none()
            .all_bitmasks::<Bitmask1>()
            .is_empty());
    }

    #[test]
    fn test_local_expands_per_block() {
        // Three blocks of size 3, constraining position 2 of each block
        // together with position 0.
        let mut constraints = ValidityConstraints::new(3, 3);
        constraints.add_local([0, 2]);

        let masks: Vec<Bitmask1> = constraints.all_bitmasks();
        assert_eq!(masks.len(), 3);
        assert_eq!(bits(&masks[0], 9), vec![0, 2]);
        assert_eq!(bits(&masks[1], 9), vec![3, 5]);
        assert_eq!(bits(&masks[2], 9), vec![6, 8]);
    }

    #[test]
    fn test_global_collects_all_blocks() {
        let mut constraints = ValidityConstraints::new(2, 3);
        constraints.add_global([1]);

        let masks: Vec<Bitmask1> = constraints.all_bitmasks();
        assert_eq!(masks.len(), 1);
        assert_eq!(bits(&masks[0], 6), vec![1, 3, 5]);
    }

    #[test]
    fn test_longer_vectors_leave_tail_unconstrained() {
        // One extra scaling coordinate beyond the blocks.
        let mut constraints = ValidityConstraints::new(2, 2);
        constraints.add_local([0]);
        let masks: Vec<Bitmask1> = constraints.bitmasks(5);
        assert_eq!(masks.len(), 2);
        for mask in &masks {
            assert!(!mask.get(4));
        }
    }

    #[test]
    fn test_equality_ignores_order() {
        let mut a = ValidityConstraints::new(3, 2);
        a.add_local([0, 2]);
        a.add_local([1]);

        let mut b = ValidityConstraints::new(3, 2);
        b.add_local([1]);
        b.add_local([2, 0]);

        assert_eq!(a, b);

        let mut c = ValidityConstraints::new(3, 2);
        c.add_global([0, 2]);
        c.add_local([1]);
        assert_ne!(a, c);
    }
}
