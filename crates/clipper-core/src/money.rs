//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The legacy shop database stored prices as REAL:                        │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    Commission on 155.00 at 30% drifted by fractions of a halala.        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    15500 cents × 3000 bps / 10000 = 4650 cents, exactly                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use clipper_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(4_000); // 40.00
//!
//! // Arithmetic operations
//! let total = price + Money::from_cents(500); // 45.00
//!
//! // NEVER do this:
//! // let bad = Money::from_float(40.0); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::types::CommissionRate;
use crate::LOYALTY_CENTS_PER_POINT;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (halalas/cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every monetary value in the system flows through this type: service list
/// prices, quoted appointment prices, costs, commissions, session totals,
/// customer spend aggregates, and the dashboard revenue/profit figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use clipper_core::money::Money;
    ///
    /// let price = Money::from_cents(4_050); // 40.50
    /// assert_eq!(price.cents(), 4_050);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts, only the major unit should be negative:
    /// `from_major_minor(-5, 50)` = -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
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

    /// Calculates the commission owed on this amount at the given rate.
    ///
    /// ## Implementation
    /// Integer math with half-up rounding: `(amount * bps + 5000) / 10000`.
    /// i128 intermediate prevents overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use clipper_core::money::Money;
    /// use clipper_core::types::CommissionRate;
    ///
    /// let price = Money::from_cents(10_000);        // 100.00
    /// let rate = CommissionRate::from_bps(800);     // 8%
    /// assert_eq!(price.commission(rate).cents(), 800);
    /// ```
    pub fn commission(&self, rate: CommissionRate) -> Money {
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Loyalty points earned by spending this amount.
    ///
    /// One point per ten currency units, floored: 155.00 earns 15 points.
    /// Accrues only on session creation or appointment completion - never on
    /// booking creation or cancellation (the engines enforce the "when").
    ///
    /// ## Example
    /// ```rust
    /// use clipper_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(15_500).loyalty_points(), 15);
    /// assert_eq!(Money::from_cents(999).loyalty_points(), 0);
    /// ```
    #[inline]
    pub const fn loyalty_points(&self) -> i64 {
        self.0 / LOYALTY_CENTS_PER_POINT
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. The form frontend handles currency
/// formatting and localization itself.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02} SR", sign, self.major().abs(), self.minor_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
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
        let money = Money::from_cents(4_050);
        assert_eq!(money.cents(), 4_050);
        assert_eq!(money.major(), 40);
        assert_eq!(money.minor_part(), 50);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(40, 50);
        assert_eq!(money.cents(), 4_050);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(4_050)), "40.50 SR");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50 SR");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00 SR");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let mut c = a;
        c += b;
        assert_eq!(c.cents(), 1500);
        c -= b;
        assert_eq!(c.cents(), 1000);
    }

    #[test]
    fn test_commission_exact() {
        // 100.00 at 8% = 8.00 exactly
        let amount = Money::from_cents(10_000);
        let rate = CommissionRate::from_bps(800);
        assert_eq!(amount.commission(rate).cents(), 800);
    }

    #[test]
    fn test_commission_with_rounding() {
        // 10.05 at 30% = 3.015 → rounds half-up to 3.02
        let amount = Money::from_cents(1_005);
        let rate = CommissionRate::from_bps(3000);
        assert_eq!(amount.commission(rate).cents(), 302);
    }

    #[test]
    fn test_loyalty_points_floor() {
        // 155.00 → 15 points (floor of 15.5)
        assert_eq!(Money::from_cents(15_500).loyalty_points(), 15);
        assert_eq!(Money::from_cents(15_999).loyalty_points(), 15);
        assert_eq!(Money::from_cents(16_000).loyalty_points(), 16);
        assert_eq!(Money::from_cents(0).loyalty_points(), 0);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().cents(), 100);
    }
}
