//! # Money Module
//!
//! Provides the `Money` type used for every price, rule contribution and
//! order total.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SUMMING RULE CONTRIBUTIONS                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    5.00 + 7.50 + 0.10 + 0.20 = 12.799999999999999  ❌                   │
//! │                                                                         │
//! │  In integer cents:                                                      │
//! │    500 + 750 + 10 + 20 = 1280  ✅                                       │
//! │                                                                         │
//! │  Rules are summed in any order; the total must not depend on it.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let line = price * 3i64;             // $32.97
//! assert_eq!(line.cents(), 3297);
//! ```
//!
//! The `priceperunit` storage column is a decimal, so [`Money::from_decimal`]
//! and [`Money::as_decimal`] exist for the persistence boundary only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// Item prices are bounded by `Item::new` (see [`crate::MAX_UNIT_PRICE_CENTS`]),
/// so line totals stay far inside the `i64` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a stored decimal amount (e.g. `10.0`) into cents.
    ///
    /// Rounds half away from zero to the nearest cent, so values that went
    /// through a binary float column (`0.1 + 0.2`) come back exact.
    /// Returns `None` for NaN, infinities and amounts beyond the `i64` range.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(10.0).map(|m| m.cents()), Some(1000));
    /// assert_eq!(Money::from_decimal(0.1 + 0.2).map(|m| m.cents()), Some(30));
    /// assert_eq!(Money::from_decimal(f64::NAN), None);
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        let cents = (amount * 100.0).round();

        if cents.is_finite() && cents.abs() < i64::MAX as f64 {
            Some(Money(cents as i64))
        } else {
            None
        }
    }

    /// Returns the amount as a decimal number of major units.
    ///
    /// Only meant for writing the `priceperunit` column.
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Human-readable form, e.g. `$22.50` or `-$5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
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

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
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
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(2250)), "$22.50");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_decimal_boundary() {
        assert_eq!(Money::from_decimal(10.0), Some(Money::from_cents(1000)));
        assert_eq!(Money::from_decimal(3.0), Some(Money::from_cents(300)));
        assert_eq!(Money::from_decimal(12.75), Some(Money::from_cents(1275)));
        assert_eq!(Money::from_decimal(0.1 + 0.2), Some(Money::from_cents(30)));
        assert_eq!(Money::from_cents(1000).as_decimal(), 10.0);
        assert_eq!(Money::from_cents(250).as_decimal(), 2.5);
    }

    #[test]
    fn test_decimal_rejects_non_finite() {
        assert_eq!(Money::from_decimal(f64::NAN), None);
        assert_eq!(Money::from_decimal(f64::INFINITY), None);
        assert_eq!(Money::from_decimal(f64::NEG_INFINITY), None);
        assert_eq!(Money::from_decimal(1e300), None);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a * 3u32).cents(), 3000);
        assert_eq!((a * 2i64).cents(), 2000);
    }

    #[test]
    fn test_sum_is_exact() {
        let parts = [500, 750, 10, 20].map(Money::from_cents);
        let total: Money = parts.iter().copied().sum();
        assert_eq!(total.cents(), 1280);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }
}
