//! # Money Module
//!
//! Provides the `Money` type for monetary values flowing through the core.
//!
//! ## Precision
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MONEY IN TALLY                                                         │
//! │                                                                         │
//! │  Stored documents carry plain JSON numbers (buyingPrice: 80,            │
//! │  sellingPrice: 120, totalAmount: 162). The core keeps the full f64      │
//! │  value through every calculation and never rounds:                      │
//! │                                                                         │
//! │    line total ──► cart subtotal ──► cart total ──► Sale.totalAmount     │
//! │                                                                         │
//! │  Rounding to two decimals happens only when a value is DISPLAYED        │
//! │  (`Display` impl, audit text, CSV export).                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let price = Money::new(120.0);
//! let line = price.multiply_quantity(2);
//! assert_eq!(line.amount(), 240.0);
//! assert_eq!(line.to_string(), "$240.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A currency amount in major units (dollars).
///
/// ## Design Decisions
/// - **f64**: matches the persisted document format exactly, so an
///   export/import round trip reproduces every figure bit for bit
/// - **transparent serde**: serializes as a bare JSON number
/// - **signed**: intermediate values (e.g. net profit) may be negative
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(f64);

impl Money {
    /// Creates a Money value from an amount in major units.
    #[inline]
    pub const fn new(amount: f64) -> Self {
        Money(amount)
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0.0)
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn amount(&self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let unit_price = Money::new(15.0);
    /// assert_eq!(unit_price.multiply_quantity(3).amount(), 45.0);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty as f64)
    }

    /// Returns the larger of two amounts.
    ///
    /// Used to floor discounted amounts at zero: `amount.max(Money::zero())`.
    #[inline]
    pub fn max(self, other: Money) -> Self {
        Money(self.0.max(other.0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders the amount with two decimals, e.g. `$162.00` or `-$5.50`.
///
/// ## Note
/// Presentation only. The stored value keeps full precision.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0.0 { "-" } else { "" };
        write!(f, "{}${:.2}", sign, self.0.abs())
    }
}

impl From<f64> for Money {
    fn from(amount: f64) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::new(10.99).to_string(), "$10.99");
        assert_eq!(Money::new(5.0).to_string(), "$5.00");
        assert_eq!(Money::new(-5.5).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(10.0);
        let b = Money::new(2.5);

        assert_eq!((a + b).amount(), 12.5);
        assert_eq!((a - b).amount(), 7.5);
        assert_eq!((a * 3).amount(), 30.0);

        let mut c = a;
        c += b;
        c -= Money::new(0.5);
        assert_eq!(c.amount(), 12.0);
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::new(1.0), Money::new(2.0), Money::new(3.5)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.amount(), 6.5);
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::new(1.0).is_positive());
        assert!(Money::new(-1.0).is_negative());
        assert_eq!(Money::new(-3.0).max(Money::zero()), Money::zero());
    }

    /// Persisted documents must keep the bare number, not a wrapper object.
    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&Money::new(162.5)).unwrap();
        assert_eq!(json, "162.5");
        let back: Money = serde_json::from_str("80").unwrap();
        assert_eq!(back.amount(), 80.0);
    }
}
