//! Property-based tests for the hybrid integer
//!
//! Every arithmetic operation is checked against num-bigint as the
//! reference implementation, with operands biased toward the edges of the
//! native range so that promotion and reduction paths are exercised.

use gordan_maths::Integer;
use num_bigint::BigInt;
use proptest::prelude::*;

/// Values clustered around the interesting boundaries of the native path.
fn edge_value() -> impl Strategy<Value = i64> {
    prop_oneof![
        any::<i64>(),
        -1000i64..1000i64,
        (i64::MAX - 1000)..=i64::MAX,
        i64::MIN..(i64::MIN + 1000),
    ]
}

proptest! {
    #[test]
    fn addition_matches_bigint(a in edge_value(), b in edge_value()) {
        let mut x = Integer::from(a);
        x += &Integer::from(b);
        prop_assert_eq!(x.to_bigint(), BigInt::from(a) + b);
    }

    #[test]
    fn subtraction_matches_bigint(a in edge_value(), b in edge_value()) {
        let mut x = Integer::from(a);
        x -= &Integer::from(b);
        prop_assert_eq!(x.to_bigint(), BigInt::from(a) - b);
    }

    #[test]
    fn multiplication_matches_bigint(a in edge_value(), b in edge_value()) {
        let mut x = Integer::from(a);
        x *= &Integer::from(b);
        prop_assert_eq!(x.to_bigint(), BigInt::from(a) * b);
    }

    #[test]
    fn division_matches_bigint(a in edge_value(), b in edge_value()) {
        prop_assume!(b != 0);
        let mut x = Integer::from(a);
        x /= &Integer::from(b);
        prop_assert_eq!(x.to_bigint(), BigInt::from(a) / b);
    }

    #[test]
    fn representation_is_canonical(a in edge_value(), b in edge_value()) {
        // Whatever arithmetic happens, the representation reflects only
        // the final value.
        let mut x = Integer::from(a);
        x *= &Integer::from(b);
        x.try_reduce();
        let fits = BigInt::from(a) * b >= BigInt::from(i64::MIN)
            && BigInt::from(a) * b <= BigInt::from(i64::MAX);
        prop_assert_eq!(x.is_native(), fits);
    }

    #[test]
    fn bigint_roundtrip(a in edge_value(), b in edge_value()) {
        let mut x = Integer::from(a);
        x *= &Integer::from(b);
        let roundtripped = Integer::from_bigint(x.to_bigint());
        prop_assert_eq!(x, roundtripped);
    }

    #[test]
    fn ordering_matches_bigint(a in edge_value(), b in edge_value(), c in edge_value()) {
        // Mix representations by scaling one side out of range.
        let mut x = Integer::from(a);
        x *= &Integer::from(b);
        let y = Integer::from(c);
        prop_assert_eq!(x.cmp(&y), (BigInt::from(a) * b).cmp(&BigInt::from(c)));
    }

    #[test]
    fn gcd_is_positive_divisor(a in edge_value(), b in edge_value()) {
        let g = Integer::from(a).gcd(&Integer::from(b));
        if a == 0 && b == 0 {
            prop_assert_eq!(g, Integer::from(0));
        } else {
            prop_assert!(g.is_positive());
            let gb = g.to_bigint();
            prop_assert_eq!(BigInt::from(a) % &gb, BigInt::from(0));
            prop_assert_eq!(BigInt::from(b) % &gb, BigInt::from(0));
        }
    }
}
