//! Money amounts in Nepalese rupees.
//!
//! All prices in the system are NPR. Amounts use decimal arithmetic via
//! `rust_decimal`; floats are never used for money.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount of money in Nepalese rupees (NPR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero rupees.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create from a decimal rupee amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create from a whole rupee amount.
    #[must_use]
    pub fn from_rupees(rupees: i64) -> Self {
        Self(Decimal::from(rupees))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether this amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Multiply by a quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rs. {:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupees() {
        let m = Money::from_rupees(499);
        assert_eq!(m.amount(), Decimal::from(499));
        assert!(m.is_positive());
    }

    #[test]
    fn test_zero_is_not_positive() {
        assert!(!Money::ZERO.is_positive());
    }

    #[test]
    fn test_times() {
        assert_eq!(Money::from_rupees(499).times(2), Money::from_rupees(998));
        assert_eq!(Money::from_rupees(499).times(0), Money::ZERO);
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_rupees(100), Money::from_rupees(250)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_rupees(350));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_rupees(500).to_string(), "Rs. 500.00");
    }

    #[test]
    fn test_serde_transparent() {
        let m = Money::from_rupees(1299);
        let json = serde_json::to_string(&m).expect("serialize");
        let back: Money = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, m);
    }
}
