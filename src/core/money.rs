use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// An amount of money in minor currency units (e.g. cents).
///
/// All monetary arithmetic in this crate is integer-only. Storing cents
/// instead of fractional major units keeps sums exact; the single place a
/// division occurs is [`rounded_equal_share`], which rounds straight back
/// to an integer.
///
/// Signed: balances can be negative (a member who owes the group).
///
/// # Examples
///
/// ```
/// use split_engine::core::money::Money;
///
/// let paid = Money::new(1_000);
/// let share = Money::new(333);
/// assert_eq!((paid - share).minor_units(), 667);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn new(minor_units: i64) -> Self {
        Self(minor_units)
    }

    /// The raw amount in minor units.
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub const fn abs(self) -> Money {
        Money(self.0.abs())
    }

    pub const fn signum(self) -> i64 {
        self.0.signum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Money {
    fn from(minor_units: i64) -> Self {
        Self(minor_units)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        Money(iter.map(|m| m.0).sum())
    }
}

/// Each member's equal share of a group total, rounded half-away-from-zero.
///
/// Every member's share is this same value, computed once from the group-wide
/// total. When the total does not divide evenly, the sum of all shares can
/// differ from the total by up to `member_count - 1` minor units; that residue
/// is absorbed downstream by the settlement dead zone, not corrected here.
///
/// # Panics
///
/// Panics if `member_count` is zero.
///
/// # Examples
///
/// ```
/// use split_engine::core::money::{rounded_equal_share, Money};
///
/// assert_eq!(rounded_equal_share(Money::new(1_000), 3), Money::new(333));
/// assert_eq!(rounded_equal_share(Money::new(1_000), 2), Money::new(500));
/// // Exact half rounds away from zero.
/// assert_eq!(rounded_equal_share(Money::new(5), 2), Money::new(3));
/// ```
pub fn rounded_equal_share(total: Money, member_count: usize) -> Money {
    assert!(
        member_count > 0,
        "equal share requires a non-empty group, got member_count = 0"
    );
    let n = member_count as i64;
    let t = total.minor_units();
    let half = n / 2;
    if t >= 0 {
        Money::new((t + half) / n)
    } else {
        Money::new(-((-t + half) / n))
    }
}
