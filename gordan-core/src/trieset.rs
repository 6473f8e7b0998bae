//! A trie over bitmasks, supporting subset and superset queries.
//!
//! [`TrieSet`] stores a (multi)set of bitmasks as paths in a binary tree:
//! level `i` branches on bit `i`, and a mask is recorded at the first node
//! whose prefix describes all of its set bits. The structure exists for two
//! queries that a flat list answers only in linear time:
//!
//! - [`has_subset`](TrieSet::has_subset): does the collection hold any
//!   subset of a given mask?
//! - [`has_extra_superset`](TrieSet::has_extra_superset): does the
//!   collection hold any superset of a given mask other than two explicitly
//!   excluded entries? This is precisely the adjacency question asked by
//!   the double-description method.
//!
//! Both queries are worst-case exponential in the universe size, but the
//! shape of the stored set keeps typical enumeration workloads far below
//! that bound.

use crate::bitmask::BitmaskLike;

#[derive(Default)]
struct Node {
    /// Children for bit values 0 and 1 at this level.
    child: [Option<Box<Node>>; 2],
    /// The number of masks stored at or beneath this node.
    descendants: u64,
}

/// A collection of bitmasks arranged for fast subset/superset queries.
///
/// The same mask may be inserted more than once; multiplicity is recorded
/// and respected by [`has_extra_superset`](TrieSet::has_extra_superset).
#[derive(Default)]
pub struct TrieSet {
    root: Node,
}

impl TrieSet {
    /// Creates an empty collection.
    pub fn new() -> Self {
        TrieSet::default()
    }

    /// Returns the number of masks stored, counted with multiplicity.
    pub fn len(&self) -> usize {
        self.root.descendants as usize
    }

    /// Determines whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.root.descendants == 0
    }

    /// Inserts the given mask. Running time is linear in the position of
    /// the highest set bit.
    pub fn insert<B: BitmaskLike>(&mut self, entry: &B) {
        self.root.descendants += 1;

        let last = match entry.last_bit() {
            Some(last) => last,
            None => return,
        };

        let mut node = &mut self.root;
        for pos in 0..=last {
            let branch = usize::from(entry.get(pos));
            node = node.child[branch].get_or_insert_with(Box::default);
            node.descendants += 1;
        }
    }

    /// Determines whether the collection holds any (non-strict) subset of
    /// `superset`, over a universe of the given size.
    pub fn has_subset<B: BitmaskLike>(&self, superset: &B, universe: usize) -> bool {
        // An explicit stack of candidate nodes, one per level; recursion
        // depth would otherwise be bounded only by the universe size.
        let mut stack: Vec<Option<&Node>> = vec![None; universe + 2];
        stack[0] = Some(&self.root);
        let mut level: isize = 0;

        while level >= 0 {
            let lvl = level as usize;
            let Some(node) = stack[lvl] else {
                // Out of siblings at this level; backtrack.
                level -= 1;
                if level > 0 {
                    let above = level as usize;
                    let parent = stack[above - 1].expect("parent survives backtracking");
                    let at_right = parent.child[1]
                        .as_deref()
                        .is_some_and(|c| std::ptr::eq(c, stack[above].expect("node")));
                    stack[above] = if at_right {
                        parent.child[0].as_deref()
                    } else {
                        None
                    };
                } else if level == 0 {
                    stack[0] = None;
                }
                continue;
            };

            if lvl >= universe {
                // Everything below this node lies within the superset.
                return true;
            }

            // Descend: the 0-branch is always admissible; the 1-branch only
            // where the superset itself has a set bit.
            if !superset.get(lvl) || node.child[1].is_none() {
                stack[lvl + 1] = node.child[0].as_deref();
            } else {
                stack[lvl + 1] = node.child[1].as_deref();
            }
            level += 1;
        }

        false
    }

    /// Determines whether the collection holds any (non-strict) superset of
    /// `subset` other than the entries `exc1` and `exc2`.
    ///
    /// Both excluded masks must currently be stored exactly once each; the
    /// query discounts them by multiplicity rather than by identity.
    pub fn has_extra_superset<B: BitmaskLike>(
        &self,
        subset: &B,
        exc1: &B,
        exc2: &B,
        universe: usize,
    ) -> bool {
        let last = subset.last_bit().map_or(-1, |b| b as isize);

        let mut stack: Vec<Option<&Node>> = vec![None; universe + 2];
        stack[0] = Some(&self.root);
        let mut level: isize = 0;
        // The deepest level up to which the current path still matches each
        // excluded mask.
        let mut prefix_of_exc1: isize = 0;
        let mut prefix_of_exc2: isize = 0;

        while level >= 0 {
            let lvl = level as usize;
            let Some(node) = stack[lvl] else {
                if prefix_of_exc1 == level {
                    prefix_of_exc1 -= 1;
                }
                if prefix_of_exc2 == level {
                    prefix_of_exc2 -= 1;
                }
                level -= 1;
                if level > 0 {
                    let above = level as usize;
                    let parent = stack[above - 1].expect("parent survives backtracking");
                    let at_left = parent.child[0]
                        .as_deref()
                        .is_some_and(|c| std::ptr::eq(c, stack[above].expect("node")));
                    if at_left {
                        stack[above] = parent.child[1].as_deref();
                        // We just moved from the 0-branch to the 1-branch.
                        if prefix_of_exc1 == level {
                            prefix_of_exc1 -= 1;
                        } else if prefix_of_exc1 == level - 1 && exc1.get(above - 1) {
                            prefix_of_exc1 += 1;
                        }
                        if prefix_of_exc2 == level {
                            prefix_of_exc2 -= 1;
                        } else if prefix_of_exc2 == level - 1 && exc2.get(above - 1) {
                            prefix_of_exc2 += 1;
                        }
                    } else {
                        stack[above] = None;
                    }
                } else if level == 0 {
                    stack[0] = None;
                }
                continue;
            };

            if level > last {
                // Everything below this node is a superset of `subset`.
                // Discount the excluded masks if they live down here.
                let excluded = u64::from(prefix_of_exc1 == level) + u64::from(prefix_of_exc2 == level);
                if node.descendants > excluded {
                    return true;
                }
                stack[lvl] = None;
                continue;
            }

            // Descend: where `subset` has a set bit we must take the
            // 1-branch; elsewhere prefer 0 and fall back to 1.
            if subset.get(lvl) || node.child[0].is_none() {
                stack[lvl + 1] = node.child[1].as_deref();
                if prefix_of_exc1 == level && exc1.get(lvl) {
                    prefix_of_exc1 += 1;
                }
                if prefix_of_exc2 == level && exc2.get(lvl) {
                    prefix_of_exc2 += 1;
                }
            } else {
                stack[lvl + 1] = node.child[0].as_deref();
                if prefix_of_exc1 == level && !exc1.get(lvl) {
                    prefix_of_exc1 += 1;
                }
                if prefix_of_exc2 == level && !exc2.get(lvl) {
                    prefix_of_exc2 += 1;
                }
            }
            level += 1;
        }

        false
    }
}
