//! Property-based tests for the bitmask family
//!
//! This suite checks the algebraic laws that the enumeration code relies
//! on: associativity and commutativity of union/intersection, De Morgan
//! duality within the declared width, and the single-bit round trip.

use gordan_core::bitmask::{Bitmask, Bitmask1, Bitmask2, BitmaskLike};
use proptest::prelude::*;

const LEN: usize = 75;

fn from_indices<B: BitmaskLike>(indices: &[usize]) -> B {
    let mut mask = B::with_len(LEN);
    mask.set_all(indices.iter().map(|i| i % LEN), true);
    mask
}

fn index_set() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..LEN, 0..20)
}

macro_rules! bitmask_laws {
    ($modname:ident, $ty:ty) => {
        mod $modname {
            use super::*;

            proptest! {
                #[test]
                fn union_commutes(a in index_set(), b in index_set()) {
                    let a: $ty = from_indices(&a);
                    let b: $ty = from_indices(&b);
                    prop_assert_eq!(a.union(&b), b.union(&a));
                }

                #[test]
                fn intersection_commutes(a in index_set(), b in index_set()) {
                    let a: $ty = from_indices(&a);
                    let b: $ty = from_indices(&b);
                    prop_assert_eq!(a.intersection(&b), b.intersection(&a));
                }

                #[test]
                fn union_associates(
                    a in index_set(), b in index_set(), c in index_set()
                ) {
                    let a: $ty = from_indices(&a);
                    let b: $ty = from_indices(&b);
                    let c: $ty = from_indices(&c);
                    prop_assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
                }

                #[test]
                fn intersection_associates(
                    a in index_set(), b in index_set(), c in index_set()
                ) {
                    let a: $ty = from_indices(&a);
                    let b: $ty = from_indices(&b);
                    let c: $ty = from_indices(&c);
                    prop_assert_eq!(
                        a.intersection(&b).intersection(&c),
                        a.intersection(&b.intersection(&c))
                    );
                }

                #[test]
                fn de_morgan(a in index_set(), b in index_set()) {
                    let a: $ty = from_indices(&a);
                    let b: $ty = from_indices(&b);
                    prop_assert_eq!(
                        a.union(&b).complement(LEN),
                        a.complement(LEN).intersection(&b.complement(LEN))
                    );
                    prop_assert_eq!(
                        a.intersection(&b).complement(LEN),
                        a.complement(LEN).union(&b.complement(LEN))
                    );
                }

                #[test]
                fn set_get_roundtrip(i in 0..LEN) {
                    let mut mask = <$ty>::with_len(LEN);
                    mask.set(i, true);
                    prop_assert!(mask.get(i));
                    mask.set(i, false);
                    prop_assert!(!mask.get(i));
                }

                #[test]
                fn count_matches_get(a in index_set()) {
                    let mask: $ty = from_indices(&a);
                    let expected = (0..LEN).filter(|&i| mask.get(i)).count();
                    prop_assert_eq!(mask.count(), expected);
                }

                #[test]
                fn subtract_is_intersection_with_complement(
                    a in index_set(), b in index_set()
                ) {
                    let a: $ty = from_indices(&a);
                    let b: $ty = from_indices(&b);
                    let mut diff = a.clone();
                    diff.subtract(&b);
                    prop_assert_eq!(diff, a.intersection(&b.complement(LEN)));
                }
            }
        }
    };
}

bitmask_laws!(bitmask2_laws, Bitmask2);
bitmask_laws!(bitmask_heap_laws, Bitmask);

// Bitmask1 cannot hold 75 bits; give it its own narrower universe.
mod bitmask1_laws {
    use super::*;

    proptest! {
        #[test]
        fn de_morgan_narrow(a in prop::collection::vec(0..60usize, 0..16),
                            b in prop::collection::vec(0..60usize, 0..16)) {
            let mut x = Bitmask1::with_len(60);
            x.set_all(a, true);
            let mut y = Bitmask1::with_len(60);
            y.set_all(b, true);
            prop_assert_eq!(
                x.union(&y).complement(60),
                x.complement(60).intersection(&y.complement(60))
            );
        }
    }
}
