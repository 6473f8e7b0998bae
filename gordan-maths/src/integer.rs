//! A signed integer with a fast native path and an exact multiprecision
//! fallback.
//!
//! [`Integer`] stores its value in a single machine word whenever the value
//! fits one, and in a heap-allocated [`BigInt`] otherwise. The
//! representation is canonical: the multiprecision path is used if and only
//! if the value does not fit the native path. Arithmetic on the native path
//! uses checked operations; on overflow the value is promoted, never
//! wrapped.

use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::{Signed, ToPrimitive};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[derive(Clone, Debug)]
enum Repr {
    Native(i64),
    Large(Box<BigInt>),
}

/// An arbitrary-precision signed integer.
///
/// Values that fit a machine word stay on the stack; larger values move to
/// the heap. Every operation maintains the canonical-form invariant, so
/// [`is_native`](Integer::is_native) is a statement about the value, not
/// about the history of operations that produced it.
#[derive(Clone, Debug)]
pub struct Integer {
    repr: Repr,
}

impl Integer {
    /// The integer zero.
    pub fn zero() -> Self {
        Integer {
            repr: Repr::Native(0),
        }
    }

    /// The integer one.
    pub fn one() -> Self {
        Integer {
            repr: Repr::Native(1),
        }
    }

    /// Creates an integer from a multiprecision value, reducing it to the
    /// native path if it fits.
    pub fn from_bigint(value: BigInt) -> Self {
        match value.to_i64() {
            Some(native) => Integer {
                repr: Repr::Native(native),
            },
            None => Integer {
                repr: Repr::Large(Box::new(value)),
            },
        }
    }

    /// Returns this value as a multiprecision integer, for hand-off to an
    /// external solver.
    pub fn to_bigint(&self) -> BigInt {
        match &self.repr {
            Repr::Native(n) => BigInt::from(*n),
            Repr::Large(big) => (**big).clone(),
        }
    }

    /// Determines whether this value currently lives on the native path.
    ///
    /// Because the representation is canonical this is equivalent to
    /// asking whether the value fits a machine word.
    pub fn is_native(&self) -> bool {
        matches!(self.repr, Repr::Native(_))
    }

    /// Restores canonical form: if the value sits on the multiprecision
    /// path but fits a machine word, it is moved back. Idempotent; all
    /// public operations already leave values canonical.
    pub fn try_reduce(&mut self) {
        if let Repr::Large(big) = &self.repr {
            if let Some(native) = big.to_i64() {
                self.repr = Repr::Native(native);
            }
        }
    }

    /// Returns the sign of this integer: -1, 0 or 1.
    pub fn signum(&self) -> i32 {
        match &self.repr {
            Repr::Native(n) => match n.cmp(&0) {
                Ordering::Less => -1,
                Ordering::Equal => 0,
                Ordering::Greater => 1,
            },
            // A canonical large value is never zero.
            Repr::Large(big) => {
                if big.is_negative() {
                    -1
                } else {
                    1
                }
            }
        }
    }

    /// Determines whether this integer is zero.
    pub fn is_zero(&self) -> bool {
        matches!(self.repr, Repr::Native(0))
    }

    /// Determines whether this integer is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.signum() > 0
    }

    /// Determines whether this integer is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.signum() < 0
    }

    /// Determines whether this integer is even.
    pub fn is_even(&self) -> bool {
        match &self.repr {
            Repr::Native(n) => n % 2 == 0,
            Repr::Large(big) => big.is_even(),
        }
    }

    /// Returns the absolute value.
    pub fn abs(&self) -> Self {
        match &self.repr {
            Repr::Native(n) => match n.checked_abs() {
                Some(native) => Integer::from(native),
                // abs(i64::MIN) overflows the native path.
                None => Integer::from_bigint(-BigInt::from(*n)),
            },
            Repr::Large(big) => Integer::from_bigint(big.abs()),
        }
    }

    /// Returns the greatest common divisor of this and the given integer.
    /// The result is non-negative; `gcd(0, 0) == 0`.
    pub fn gcd(&self, other: &Integer) -> Integer {
        match (&self.repr, &other.repr) {
            (Repr::Native(a), Repr::Native(b)) => {
                let mut x = a.unsigned_abs();
                let mut y = b.unsigned_abs();
                while y != 0 {
                    let r = x % y;
                    x = y;
                    y = r;
                }
                Integer::from(x)
            }
            _ => Integer::from_bigint(self.to_bigint().gcd(&other.to_bigint())),
        }
    }
}

impl Default for Integer {
    fn default() -> Self {
        Integer::zero()
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer {
            repr: Repr::Native(value),
        }
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Integer::from(i64::from(value))
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(native) => Integer::from(native),
            Err(_) => Integer {
                repr: Repr::Large(Box::new(BigInt::from(value))),
            },
        }
    }
}

impl From<usize> for Integer {
    fn from(value: usize) -> Self {
        Integer::from(value as u64)
    }
}

impl PartialEq for Integer {
    fn eq(&self, other: &Self) -> bool {
        // Canonical form: equal values share a representation.
        match (&self.repr, &other.repr) {
            (Repr::Native(a), Repr::Native(b)) => a == b,
            (Repr::Large(a), Repr::Large(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Integer {}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.repr, &other.repr) {
            (Repr::Native(a), Repr::Native(b)) => a.cmp(b),
            (Repr::Large(a), Repr::Large(b)) => a.cmp(b),
            // A canonical large value lies strictly outside the i64 range,
            // so its sign decides the comparison.
            (Repr::Native(_), Repr::Large(b)) => {
                if b.is_negative() {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (Repr::Large(a), Repr::Native(_)) => {
                if a.is_negative() {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
        }
    }
}

impl std::hash::Hash for Integer {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // Equal values share a representation, so hashing per variant is
        // consistent with Eq.
        match &self.repr {
            Repr::Native(n) => {
                state.write_u8(0);
                n.hash(state);
            }
            Repr::Large(big) => {
                state.write_u8(1);
                big.hash(state);
            }
        }
    }
}

impl AddAssign<&Integer> for Integer {
    fn add_assign(&mut self, other: &Integer) {
        match (&mut self.repr, &other.repr) {
            (Repr::Native(a), Repr::Native(b)) => match a.checked_add(*b) {
                Some(sum) => *a = sum,
                None => self.repr = Repr::Large(Box::new(BigInt::from(*a) + *b)),
            },
            _ => *self = Integer::from_bigint(self.to_bigint() + other.to_bigint()),
        }
    }
}

impl SubAssign<&Integer> for Integer {
    fn sub_assign(&mut self, other: &Integer) {
        match (&mut self.repr, &other.repr) {
            (Repr::Native(a), Repr::Native(b)) => match a.checked_sub(*b) {
                Some(diff) => *a = diff,
                None => self.repr = Repr::Large(Box::new(BigInt::from(*a) - *b)),
            },
            _ => *self = Integer::from_bigint(self.to_bigint() - other.to_bigint()),
        }
    }
}

impl MulAssign<&Integer> for Integer {
    fn mul_assign(&mut self, other: &Integer) {
        match (&mut self.repr, &other.repr) {
            (Repr::Native(a), Repr::Native(b)) => match a.checked_mul(*b) {
                Some(prod) => *a = prod,
                None => self.repr = Repr::Large(Box::new(BigInt::from(*a) * *b)),
            },
            _ => *self = Integer::from_bigint(self.to_bigint() * other.to_bigint()),
        }
    }
}

impl DivAssign<&Integer> for Integer {
    /// Truncating integer division. The engine only ever divides by exact
    /// divisors (such as a gcd of coordinates), so no rounding mode beyond
    /// truncation is exposed.
    fn div_assign(&mut self, other: &Integer) {
        match (&mut self.repr, &other.repr) {
            (Repr::Native(a), Repr::Native(b)) => match a.checked_div(*b) {
                Some(quot) => *a = quot,
                // i64::MIN / -1 overflows the native path.
                None => self.repr = Repr::Large(Box::new(BigInt::from(*a) / *b)),
            },
            _ => *self = Integer::from_bigint(self.to_bigint() / other.to_bigint()),
        }
    }
}

impl Neg for Integer {
    type Output = Integer;

    fn neg(self) -> Integer {
        match self.repr {
            Repr::Native(n) => match n.checked_neg() {
                Some(neg) => Integer::from(neg),
                None => Integer::from_bigint(-BigInt::from(n)),
            },
            Repr::Large(big) => Integer::from_bigint(-*big),
        }
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Integer {
        -self.clone()
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $assign:ident) => {
        impl $trait<&Integer> for &Integer {
            type Output = Integer;

            fn $method(self, other: &Integer) -> Integer {
                let mut ans = self.clone();
                ans.$assign(other);
                ans
            }
        }

        impl $trait<Integer> for Integer {
            type Output = Integer;

            fn $method(mut self, other: Integer) -> Integer {
                self.$assign(&other);
                self
            }
        }
    };
}

forward_binop!(Add, add, add_assign);
forward_binop!(Sub, sub, sub_assign);
forward_binop!(Mul, mul, mul_assign);
forward_binop!(Div, div, div_assign);

impl num_traits::Zero for Integer {
    fn zero() -> Self {
        Integer::zero()
    }

    fn is_zero(&self) -> bool {
        Integer::is_zero(self)
    }
}

impl num_traits::One for Integer {
    fn one() -> Self {
        Integer::one()
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Native(n) => write!(f, "{n}"),
            Repr::Large(big) => write!(f, "{big}"),
        }
    }
}

/// Conversion from a multiprecision value into a caller-chosen coordinate
/// representation.
///
/// The Hilbert basis driver converts every basis coordinate through this
/// trait on the way out. For bounded types the conversion can fail, and
/// the driver reports the failure as an unsolved case rather than
/// truncating.
pub trait CoordInt: Sized {
    /// Converts a multiprecision value, or returns `None` if the value
    /// does not fit this representation.
    fn from_bigint(value: &BigInt) -> Option<Self>;
}

impl CoordInt for Integer {
    fn from_bigint(value: &BigInt) -> Option<Self> {
        Some(Integer::from_bigint(value.clone()))
    }
}

impl CoordInt for BigInt {
    fn from_bigint(value: &BigInt) -> Option<Self> {
        Some(value.clone())
    }
}

impl CoordInt for i64 {
    fn from_bigint(value: &BigInt) -> Option<Self> {
        value.to_i64()
    }
}
