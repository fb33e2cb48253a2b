//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Exact Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In JavaScript/floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  Carts here sell fractional quantities (0.5 kg at 7.99/kg), so     │
//! │  integer cents alone don't cover the arithmetic either: unit        │
//! │  prices come out of divisions (proportional discounts, per-unit     │
//! │  back-calculation) that must be carried exactly and rounded once.   │
//! │                                                                     │
//! │  OUR SOLUTION: rust_decimal                                         │
//! │    Full-precision decimal arithmetic, rounded to currency scale     │
//! │    (2 dp, half away from zero) only at the documented points.       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::CURRENCY_DP;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value carried at full decimal precision.
///
/// ## Design Decisions
/// - **Single-field tuple struct**: zero-cost wrapper over `Decimal`
/// - **Signed**: negative values are representable (garbage-in-garbage-out:
///   a negative price yields a negative total, summed faithfully)
/// - **Explicit rounding**: arithmetic never rounds on its own; callers snap
///   to currency scale via [`Money::round`] at the documented points
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero money value.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Wraps a raw decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Snaps the value to currency precision.
    ///
    /// Half-away-from-zero at [`CURRENCY_DP`] decimal places: `1.005` rounds
    /// to `1.01`, `-1.005` to `-1.01`. This is the only rounding mode in the
    /// engine; it is applied to unit prices and line totals, never to
    /// intermediate shares or percentages.
    #[inline]
    pub fn round(&self) -> Self {
        Money(
            self.0
                .round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Subtracts `other`, clamping at zero.
    ///
    /// The payment ledger derives change as `paid ⊖ total` and debt as
    /// `total ⊖ paid`; the clamp guarantees the two are never both positive.
    #[inline]
    pub fn sub_or_zero(&self, other: Money) -> Money {
        if self.0 > other.0 {
            Money(self.0 - other.0)
        } else {
            Money::ZERO
        }
    }

    /// Ratio of this value to `denominator` (e.g. a line's share of the
    /// subtotal). Full precision, no rounding.
    #[inline]
    pub fn ratio_of(&self, denominator: Money) -> Decimal {
        self.0 / denominator.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display at currency precision. Debug-oriented; the UI formats and
/// localizes amounts itself.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s).map(Money)
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

/// Scaling by a decimal factor (quantities, conversion factors, shares).
impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: Decimal) -> Self {
        Money(self.0 * factor)
    }
}

/// Division by a decimal divisor (per-unit back-calculation).
impl Div<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn div(self, divisor: Decimal) -> Self {
        Money(self.0 / divisor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
