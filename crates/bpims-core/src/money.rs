//! # Money Module
//!
//! Peso amounts for the tender screens (payment, discount, delivery fee).
//!
//! ## Why Integer Centavos?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The backend sends prices as plain numbers:                            │
//! │    0.1 + 0.2 = 0.30000000000000004                                     │
//! │                                                                         │
//! │  Keypad entry shifts digits in from the right:                          │
//! │    "1" → 0.01,  "12" → 0.12,  "125" → 1.25                             │
//! │                                                                         │
//! │  Both are exact on an i64 count of centavos, so every tender amount    │
//! │  is held that way and converted only at the API edge.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bpims_core::money::Money;
//!
//! let price = Money::from_centavos(1099); // ₱10.99
//! let total = price * 2 + Money::from_centavos(500);
//! assert_eq!(total.to_string(), "₱26.98");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Basis points in 100%.
pub const FULL_BPS: u32 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A peso amount in centavos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    #[inline]
    pub const fn from_centavos(centavos: i64) -> Self {
        Money(centavos)
    }

    /// Whole pesos.
    #[inline]
    pub const fn from_pesos(pesos: i64) -> Self {
        Money(pesos * 100)
    }

    /// Converts a backend number, rounding to the nearest centavo.
    /// Non-finite input becomes zero.
    pub fn from_f64(pesos: f64) -> Self {
        if !pesos.is_finite() {
            return Money::ZERO;
        }
        Money((pesos * 100.0).round() as i64)
    }

    #[inline]
    pub const fn centavos(&self) -> i64 {
        self.0
    }

    /// Whole-peso part, truncated toward zero.
    #[inline]
    pub const fn pesos(&self) -> i64 {
        self.0 / 100
    }

    /// Centavo part (always 0-99).
    #[inline]
    pub const fn centavos_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Formats as the tender screens show it: `"1234.50"`, no symbol.
    pub fn to_fixed(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.pesos().abs(), self.centavos_part())
    }

    /// `bps` percent of this amount, rounded half up.
    ///
    /// ## Example
    /// ```rust
    /// use bpims_core::money::Money;
    ///
    /// let subtotal = Money::from_centavos(1000);  // ₱10.00
    /// assert_eq!(subtotal.percent(825).centavos(), 83); // 8.25% → ₱0.83
    /// ```
    pub fn percent(&self, bps: u32) -> Money {
        let centavos = (self.0 as i128 * bps as i128 + 5000) / FULL_BPS as i128;
        Money(centavos as i64)
    }

    /// What share of `whole` this amount is, in basis points, rounded half
    /// up. A zero `whole` gives 0.
    ///
    /// ## Example
    /// ```rust
    /// use bpims_core::money::Money;
    ///
    /// let subtotal = Money::from_pesos(200);
    /// assert_eq!(Money::from_pesos(50).share_of(subtotal), 2500); // 25%
    /// assert_eq!(Money::from_pesos(50).share_of(Money::ZERO), 0);
    /// ```
    pub fn share_of(&self, whole: Money) -> u32 {
        if whole.0 <= 0 || self.0 <= 0 {
            return 0;
        }
        let bps = (self.0 as i128 * FULL_BPS as i128 + whole.0 as i128 / 2) / whole.0 as i128;
        bps.min(u32::MAX as i128) as u32
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_mul(self, factor: i64) -> Option<Money> {
        self.0.checked_mul(factor).map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₱{}.{:02}", sign, self.pesos().abs(), self.centavos_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::ZERO
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
    fn mul(self, factor: i64) -> Self {
        Money(self.0 * factor)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts() {
        let money = Money::from_centavos(1099);
        assert_eq!(money.pesos(), 10);
        assert_eq!(money.centavos_part(), 99);
        assert_eq!(Money::from_pesos(7).centavos(), 700);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_centavos(1099).to_string(), "₱10.99");
        assert_eq!(Money::from_centavos(-550).to_string(), "-₱5.50");
        assert_eq!(Money::ZERO.to_string(), "₱0.00");
        assert_eq!(Money::from_centavos(123450).to_fixed(), "1234.50");
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Money::from_f64(149.5).centavos(), 14950);
        assert_eq!(Money::from_f64(0.1 + 0.2).centavos(), 30);
        assert_eq!(Money::from_f64(f64::NAN), Money::ZERO);
    }

    #[test]
    fn test_percent_and_share() {
        let subtotal = Money::from_pesos(100);
        assert_eq!(subtotal.percent(1000), Money::from_pesos(10));
        assert_eq!(subtotal.percent(FULL_BPS), subtotal);
        assert_eq!(Money::from_pesos(10).share_of(subtotal), 1000);
        assert_eq!(Money::from_centavos(1).share_of(Money::from_pesos(3)), 33);
        assert_eq!(Money::from_pesos(1).share_of(Money::from_pesos(3)), 3333);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_centavos(1000);
        let b = Money::from_centavos(500);
        assert_eq!((a + b).centavos(), 1500);
        assert_eq!((b - a).centavos(), -500);
        assert_eq!((a * 3).centavos(), 3000);
        assert_eq!(Money::from_centavos(i64::MAX).checked_add(a), None);
    }
}
