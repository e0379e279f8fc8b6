//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Layered pricing in floating point:                                     │
//! │    1000 × (1 − 0.15) × (1 − 0.10) = 764.9999999999999  ❌               │
//! │                                                                         │
//! │  Bulk repricing 5,000 products by +7.5% accumulates the same drift      │
//! │  across every row of the preview.                                       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer paisa + basis points                             │
//! │    100000 paisa × 8500 bps / 10000 = 85000 paisa (exact)               │
//! │    Rounding happens once per step, half-up, at 2 decimal places         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bazaar_core::money::Money;
//! use bazaar_core::types::Percent;
//!
//! let price = Money::from_major(1000); // Rs. 1000.00
//! let seasonal = price.multiply_by_percent(Percent::from_bps(2000)); // 20%
//! assert_eq!(seasonal, Money::from_major(200));
//! assert_eq!(price.subtract_floored(seasonal), Money::from_major(800));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::error::{PricingError, PricingResult};
use crate::types::Percent;

/// Minor units per major unit (paisa per rupee).
const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paisa).
///
/// ## Design Decisions
/// - **i64 (signed)**: price changes in a bulk preview can be negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serializes as a bare integer**: the UI formats for display
///
/// ## Where Money Flows
/// ```text
/// Product.base_price ──► TierResult.final_price ──► Quote.final_total
///          │
///          └──► PreviewRow.new_price ──► ProductPatch.price
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paisa.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(50).cents(), 5000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_PER_MAJOR)
    }

    /// Converts a decimal amount (as typed into a form) into Money.
    ///
    /// Rounds half-up to 2 decimal places. This is the only place a float
    /// enters the pricing pipeline.
    ///
    /// ## Errors
    /// `InvalidAmount` for NaN, infinite, or out-of-range input.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// assert_eq!(Money::try_from_major(19.999).unwrap().cents(), 2000);
    /// assert!(Money::try_from_major(f64::NAN).is_err());
    /// ```
    pub fn try_from_major(amount: f64) -> PricingResult<Self> {
        if !amount.is_finite() {
            return Err(PricingError::invalid_amount(
                "amount",
                format!("{amount} is not a finite number"),
            ));
        }

        let scaled = (amount * MINOR_PER_MAJOR as f64).round();
        if scaled.abs() >= i64::MAX as f64 {
            return Err(PricingError::invalid_amount(
                "amount",
                format!("{amount} is out of range"),
            ));
        }

        Ok(Money(scaled as i64))
    }

    /// Returns the value in paisa.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the paisa portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns `percent` of this amount, rounded half-up to the paisa.
    ///
    /// ## Rounding
    /// Half-up here means half away from zero, so a negative amount rounds
    /// symmetrically with its positive counterpart:
    /// ```text
    /// 12.345 → 12.35      −12.345 → −12.35
    /// ```
    ///
    /// ## Implementation
    /// `(|amount × bps| + 5000) / 10000` in i128, sign restored afterwards.
    /// Results that do not fit in i64 saturate.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    /// use bazaar_core::types::Percent;
    ///
    /// let price = Money::from_cents(999);
    /// // 9.99 × 12.5% = 1.24875 → 1.25
    /// assert_eq!(price.multiply_by_percent(Percent::from_bps(1250)).cents(), 125);
    /// ```
    pub fn multiply_by_percent(&self, percent: Percent) -> Money {
        let product = self.0 as i128 * percent.bps() as i128;
        let magnitude = (product.abs() + 5_000) / 10_000;
        let signed = if product < 0 { -magnitude } else { magnitude };
        Money(saturate(signed))
    }

    /// Applies a percentage discount and returns the discounted amount,
    /// floored at zero.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    /// use bazaar_core::types::Percent;
    ///
    /// let subtotal = Money::from_major(100);
    /// let discounted = subtotal.apply_percentage_discount(Percent::from_bps(1000));
    /// assert_eq!(discounted, Money::from_major(90));
    /// ```
    pub fn apply_percentage_discount(&self, percent: Percent) -> Money {
        self.subtract_floored(self.multiply_by_percent(percent))
    }

    /// Adjusts this amount by a signed percentage: `amount × (1 + delta/100)`.
    ///
    /// Used by bulk repricing, where `delta` may be negative.
    pub fn adjust_by_percent(&self, delta: Percent) -> Money {
        Money(self.0.saturating_add(self.multiply_by_percent(delta).0))
    }

    /// Subtracts `other`, never going below zero.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let price = Money::from_major(40);
    /// assert_eq!(price.subtract_floored(Money::from_major(50)), Money::zero());
    /// ```
    pub fn subtract_floored(&self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0).max(0))
    }

    /// Clamps into `[min, max]`.
    ///
    /// Unlike `Ord::clamp` this never panics: when `min > max` the floor wins.
    pub fn clamp(self, min: Money, max: Money) -> Money {
        if self < min {
            min
        } else if self > max && max >= min {
            max
        } else {
            self
        }
    }

    /// Multiplies money by a quantity (saturating).
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows rupees, e.g. `Rs. 10.99`.
///
/// ## Note
/// This is for logs and messages. The UI shell does its own localized formatting.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}Rs. {}.{:02}",
            sign,
            self.major().abs(),
            self.minor_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_and_parts() {
        let money = Money::from_cents(1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
        assert_eq!(Money::from_major(7).cents(), 700);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "Rs. 10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "Rs. 5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-Rs. 5.50");
        assert_eq!(format!("{}", Money::zero()), "Rs. 0.00");
    }

    #[test]
    fn test_try_from_major_rounds_half_up() {
        assert_eq!(Money::try_from_major(1000.0).unwrap().cents(), 100000);
        assert_eq!(Money::try_from_major(0.125).unwrap().cents(), 13);
        assert_eq!(Money::try_from_major(-2.5).unwrap().cents(), -250);
    }

    #[test]
    fn test_try_from_major_rejects_non_finite() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e300] {
            let err = Money::try_from_major(bad).unwrap_err();
            assert!(matches!(err, PricingError::InvalidAmount { .. }));
        }
    }

    #[test]
    fn test_multiply_by_percent_rounding() {
        // 10.05 × 50% = 5.025 → 5.03
        let amount = Money::from_cents(1005);
        assert_eq!(amount.multiply_by_percent(Percent::from_bps(5000)).cents(), 503);

        // Negative amounts round away from zero too
        let negative = Money::from_cents(-1005);
        assert_eq!(
            negative.multiply_by_percent(Percent::from_bps(5000)).cents(),
            -503
        );
    }

    #[test]
    fn test_percentage_math_is_exact_across_layers() {
        // 1000 − 15% − 10% = 765.00 exactly
        let price = Money::from_major(1000)
            .apply_percentage_discount(Percent::from_bps(1500))
            .apply_percentage_discount(Percent::from_bps(1000));
        assert_eq!(price, Money::from_major(765));
    }

    #[test]
    fn test_adjust_by_percent() {
        let price = Money::from_major(200);
        assert_eq!(price.adjust_by_percent(Percent::from_bps(1000)), Money::from_major(220));
        assert_eq!(price.adjust_by_percent(Percent::from_bps(-2500)), Money::from_major(150));
    }

    #[test]
    fn test_subtract_floored() {
        let a = Money::from_major(10);
        assert_eq!(a.subtract_floored(Money::from_major(3)), Money::from_major(7));
        assert_eq!(a.subtract_floored(Money::from_major(30)), Money::zero());
    }

    #[test]
    fn test_clamp() {
        let min = Money::from_major(1);
        let max = Money::from_major(100_000);
        assert_eq!(Money::zero().clamp(min, max), min);
        assert_eq!(Money::from_major(200_000).clamp(min, max), max);
        assert_eq!(Money::from_major(50).clamp(min, max), Money::from_major(50));
        // Inverted bounds never panic; the floor wins
        assert_eq!(Money::from_major(50).clamp(max, min), max);
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_multiply_quantity_saturates() {
        assert_eq!(Money::from_cents(299).multiply_quantity(3).cents(), 897);
        assert_eq!(Money::from_cents(i64::MAX).multiply_quantity(2).cents(), i64::MAX);
    }
}
