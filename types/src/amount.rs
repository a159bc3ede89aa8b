//! Token amount type.
//!
//! Amounts are non-negative integers in the token's smallest unit (u128).
//! Every balance, allowance and vote tally is an `Amount`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A quantity of tokens in raw units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Whether this amount is strictly more than half of `total`.
    ///
    /// Computed as `self > total / 2` so it cannot overflow; for integers this
    /// is equivalent to `2 * self > total`.
    pub fn exceeds_half_of(&self, total: Amount) -> bool {
        self.0 > total.0 / 2
    }
}

impl From<u128> for Amount {
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}

impl From<u64> for Amount {
    fn from(raw: u64) -> Self {
        Self(raw as u128)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_is_checked() {
        assert_eq!(Amount::new(u128::MAX).checked_add(Amount::new(1)), None);
        assert_eq!(Amount::new(3).checked_sub(Amount::new(4)), None);
        assert_eq!(Amount::new(4).checked_sub(Amount::new(3)), Some(Amount::new(1)));
    }

    #[test]
    fn majority_is_strict() {
        let total = Amount::new(100_000_000);
        assert!(!Amount::new(50_000_000).exceeds_half_of(total));
        assert!(Amount::new(50_000_001).exceeds_half_of(total));
    }

    #[test]
    fn majority_with_odd_total() {
        let total = Amount::new(7);
        assert!(!Amount::new(3).exceeds_half_of(total));
        assert!(Amount::new(4).exceeds_half_of(total));
    }

    #[test]
    fn majority_near_u128_max_does_not_overflow() {
        let total = Amount::new(u128::MAX);
        assert!(Amount::new(u128::MAX / 2 + 1).exceeds_half_of(total));
        assert!(!Amount::new(u128::MAX / 2).exceeds_half_of(total));
    }
}
