//! # Quantity Module
//!
//! Provides the `Quantity` type and the `EntryMode` that decides how it is
//! typed and displayed.
//!
//! ## Why Integer Hundredths?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM (again)                                     │
//! │                                                                         │
//! │  Keypad entry shifts digits left on every press:                        │
//! │    0.05 → 0.50 → 5.00 → 50.00                                          │
//! │  With floats, "× 10 + digit, ÷ 100" drifts after a few presses.        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Hundredths                                       │
//! │    5 → 50 → 500 → 5000   (exact, always)                               │
//! │    Display divides by 100 only when rendering.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bpims_core::quantity::{EntryMode, Quantity};
//!
//! let kilos = Quantity::from_hundredths(320);
//! assert_eq!(kilos.format(EntryMode::Decimal), "3.20");
//!
//! let pieces = Quantity::from_units(3);
//! assert_eq!(pieces.format(EntryMode::Unit), "3");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use ts_rs::TS;

/// Hundredths per whole unit.
pub const SCALE: i64 = 100;

// =============================================================================
// Entry Mode
// =============================================================================

/// How a quantity is typed and displayed.
///
/// Fixed per inventory item via its `sellByUnit` flag; never changes during
/// an edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EntryMode {
    /// Whole-number count (pieces, boxes).
    Unit,
    /// Fixed-point decimal with 2 places (kilograms, meters).
    Decimal,
}

impl EntryMode {
    /// Maps the item's `sellByUnit` flag to an entry mode.
    #[inline]
    pub const fn from_sell_by_unit(sell_by_unit: bool) -> Self {
        if sell_by_unit {
            EntryMode::Unit
        } else {
            EntryMode::Decimal
        }
    }

    /// Renders a quantity in this mode.
    pub fn render(self, value: &Quantity) -> String {
        value.format(self)
    }

    /// The zero display for this mode ("0" or "0.00").
    pub fn zero_display(self) -> &'static str {
        match self {
            EntryMode::Unit => "0",
            EntryMode::Decimal => "0.00",
        }
    }
}

// =============================================================================
// Quantity Type
// =============================================================================

/// A stock quantity in hundredths of a unit.
///
/// ## Design Decisions
/// - **i64 hundredths**: exact keypad arithmetic in both modes
/// - **Unit mode**: values are multiples of 100
/// - **Wire format**: a plain JSON number (`12.5`), as the API expects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(i64);

impl Quantity {
    /// Zero quantity.
    pub const ZERO: Quantity = Quantity(0);

    /// Creates a quantity from hundredths.
    #[inline]
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Quantity(hundredths)
    }

    /// Creates a quantity from whole units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Quantity(units * SCALE)
    }

    /// Creates a quantity from an external figure, rounding to the nearest
    /// hundredth. Non-finite figures become zero.
    ///
    /// ## Example
    /// ```rust
    /// use bpims_core::quantity::Quantity;
    ///
    /// assert_eq!(Quantity::from_f64(3.456).hundredths(), 346);
    /// assert_eq!(Quantity::from_f64(f64::NAN), Quantity::ZERO);
    /// ```
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Quantity::ZERO;
        }
        Quantity((value * SCALE as f64).round() as i64)
    }

    /// Returns the raw value in hundredths.
    #[inline]
    pub const fn hundredths(&self) -> i64 {
        self.0
    }

    /// Returns the value rounded to whole units (half away from zero).
    ///
    /// ## Example
    /// ```rust
    /// use bpims_core::quantity::Quantity;
    ///
    /// assert_eq!(Quantity::from_hundredths(346).whole_units(), 3);
    /// assert_eq!(Quantity::from_hundredths(350).whole_units(), 4);
    /// ```
    pub const fn whole_units(&self) -> i64 {
        let half = SCALE / 2;
        if self.0 >= 0 {
            (self.0 + half) / SCALE
        } else {
            (self.0 - half) / SCALE
        }
    }

    /// Returns the value as a float (for the API and display only).
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Formats the quantity for display in the given mode.
    ///
    /// - Unit: integer string, rounded (`3.46` → `"3"`)
    /// - Decimal: exactly two decimals (`3.2` → `"3.20"`)
    pub fn format(&self, mode: EntryMode) -> String {
        match mode {
            EntryMode::Unit => self.whole_units().to_string(),
            EntryMode::Decimal => {
                let sign = if self.0 < 0 { "-" } else { "" };
                let abs = self.0.unsigned_abs();
                format!("{}{}.{:02}", sign, abs / 100, abs % 100)
            }
        }
    }

    /// Parses a keypad buffer or a stored figure.
    ///
    /// Accepts plain decimal text (`""`, `"12"`, `"0.05"`, `"3.456"`).
    /// Empty or unparseable text is zero, matching how the screens coerce
    /// bad input. A sign is never typed on the keypad, so `"-5"` is zero too.
    /// Extra decimal places round to the nearest hundredth.
    pub fn parse(text: &str) -> Self {
        parse_hundredths(text.trim()).map(Quantity).unwrap_or(Quantity::ZERO)
    }
}

fn parse_hundredths(text: &str) -> Option<i64> {
    if text.is_empty() {
        return Some(0);
    }

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => (text, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    let mut value: i64 = 0;
    for b in int_part.bytes() {
        value = value.checked_mul(10)?.checked_add(i64::from(b - b'0'))?;
    }
    value = value.checked_mul(SCALE)?;

    let frac = frac_part.as_bytes();
    let digit_at = |i: usize| frac.get(i).map_or(0, |b| i64::from(b - b'0'));
    value = value.checked_add(digit_at(0) * 10 + digit_at(1))?;
    if digit_at(2) >= 5 {
        value = value.checked_add(1)?;
    }

    Some(value)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the decimal rendering (`12.50`).
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(EntryMode::Decimal))
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Ok(Quantity::from_f64(value))
    }
}

/// Formats an external figure per mode.
///
/// ## Example
/// ```rust
/// use bpims_core::quantity::{format_quantity, EntryMode};
///
/// assert_eq!(format_quantity(3.0, EntryMode::Unit), "3");
/// assert_eq!(format_quantity(3.2, EntryMode::Decimal), "3.20");
/// assert_eq!(format_quantity(3.456, EntryMode::Unit), "3");
/// ```
pub fn format_quantity(value: f64, mode: EntryMode) -> String {
    Quantity::from_f64(value).format(mode)
}

// =============================================================================
// Unit Tests
// =============================================================================
