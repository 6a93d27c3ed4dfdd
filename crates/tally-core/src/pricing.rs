//! # Pricing
//!
//! The single discount primitive shared by cart lines, cart totals, sale
//! commit and receipts.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apply_discount(base, discount)                                         │
//! │                                                                         │
//! │    None                → base                                           │
//! │    FIXED(v)            → max(0, base - v)                               │
//! │    PERCENTAGE(p)       → max(0, base × (1 - p/100))                     │
//! │                                                                         │
//! │  Percentages above 100 would produce a negative amount; the result is   │
//! │  floored at zero so a sale total can never go below nothing.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::money::Money;
use crate::types::Discount;

/// Applies an optional discount to a base amount.
///
/// ## Example
/// ```rust
/// use tally_core::money::Money;
/// use tally_core::pricing::apply_discount;
/// use tally_core::types::Discount;
///
/// let base = Money::new(200.0);
/// let fixed = Discount::Fixed(Money::new(20.0));
/// assert_eq!(apply_discount(base, Some(&fixed)).amount(), 180.0);
///
/// let pct = Discount::Percentage(10.0);
/// assert_eq!(apply_discount(Money::new(180.0), Some(&pct)).amount(), 162.0);
/// ```
pub fn apply_discount(base: Money, discount: Option<&Discount>) -> Money {
    match discount {
        None => base,
        Some(Discount::Fixed(value)) => (base - *value).max(Money::zero()),
        Some(Discount::Percentage(pct)) => {
            Money::new(base.amount() * (1.0 - pct / 100.0)).max(Money::zero())
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_no_discount_is_identity() {
        assert_eq!(apply_discount(Money::new(42.5), None).amount(), 42.5);
    }

    #[test]
    fn test_fixed_floors_at_zero() {
        let d = Discount::Fixed(Money::new(50.0));
        assert_eq!(apply_discount(Money::new(30.0), Some(&d)), Money::zero());
    }

    #[test]
    fn test_percentage_over_hundred_floors_at_zero() {
        let d = Discount::Percentage(150.0);
        assert_eq!(apply_discount(Money::new(80.0), Some(&d)), Money::zero());
    }

    proptest! {
        #[test]
        fn fixed_discount_is_clamped_subtraction(
            base in 0.0f64..1_000_000.0,
            value in 0.0f64..1_000_000.0,
        ) {
            let d = Discount::Fixed(Money::new(value));
            let result = apply_discount(Money::new(base), Some(&d));
            prop_assert_eq!(result.amount(), (base - value).max(0.0));
        }

        #[test]
        fn percentage_discount_matches_formula(
            base in 0.0f64..1_000_000.0,
            pct in 0.0f64..=100.0,
        ) {
            let d = Discount::Percentage(pct);
            let result = apply_discount(Money::new(base), Some(&d));
            prop_assert_eq!(result.amount(), base * (1.0 - pct / 100.0));
        }

        #[test]
        fn percentage_discount_is_non_increasing_in_pct(
            base in 0.0f64..1_000_000.0,
            a in 0.0f64..=100.0,
            b in 0.0f64..=100.0,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let at_lo = apply_discount(Money::new(base), Some(&Discount::Percentage(lo)));
            let at_hi = apply_discount(Money::new(base), Some(&Discount::Percentage(hi)));
            prop_assert!(at_hi <= at_lo);
        }

        #[test]
        fn discount_never_increases_or_goes_negative(
            base in 0.0f64..1_000_000.0,
            value in 0.0f64..1_000.0,
            is_pct in any::<bool>(),
        ) {
            let d = if is_pct {
                Discount::Percentage(value)
            } else {
                Discount::Fixed(Money::new(value))
            };
            let result = apply_discount(Money::new(base), Some(&d));
            prop_assert!(result.amount() >= 0.0);
            prop_assert!(result.amount() <= base);
        }
    }
}
