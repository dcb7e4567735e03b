//! # Entry Module
//!
//! The masked decimal/integer accumulator behind every numeric keypad.
//!
//! ## Keystroke Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Keystroke                                        │
//! │                                                                         │
//! │  current value ──► candidate                                           │
//! │                     Unit:    units × 10 + digit                        │
//! │                     Decimal: hundredths × 10 + digit                   │
//! │                         │                                               │
//! │                         ├── more digits than allowed? → DigitLimit     │
//! │                         │                                (silent)      │
//! │                         ├── candidate > ceiling?      → CeilingExceeded│
//! │                         │                                (warning)     │
//! │                         └── OK → candidate becomes the value           │
//! │                                                                         │
//! │  Backspace: Unit units ÷ 10, Decimal hundredths ÷ 10 (floor)           │
//! │  A rejected keystroke never changes the value.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bpims_core::entry::{append_digit, backspace, Ceiling};
//! use bpims_core::quantity::{EntryMode, Quantity};
//! use bpims_core::types::StockScope;
//!
//! let ceiling = Ceiling::new(Quantity::from_units(12), StockScope::Branch);
//!
//! let out = append_digit("", '1', EntryMode::Unit, Some(&ceiling));
//! assert_eq!(out.buffer, "1");
//!
//! let out = append_digit(&out.buffer, '5', EntryMode::Unit, Some(&ceiling));
//! assert!(!out.accepted);
//! assert_eq!(out.buffer, "1");
//!
//! assert_eq!(backspace("1.23", EntryMode::Decimal), "0.12");
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::EntryRejection;
use crate::quantity::{EntryMode, Quantity, SCALE};
use crate::types::StockScope;

/// Hard upper bound on significant digits held by any buffer.
///
/// 15 digits stay exact in the API's double-precision numbers and leave
/// headroom in i64 hundredths.
pub const MAX_ENTRY_DIGITS: usize = 15;

// =============================================================================
// Ceiling
// =============================================================================

/// The largest quantity an entry may reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Ceiling {
    #[ts(type = "number")]
    pub limit: Quantity,
    pub scope: StockScope,
}

impl Ceiling {
    #[inline]
    pub const fn new(limit: Quantity, scope: StockScope) -> Self {
        Ceiling { limit, scope }
    }

    /// Checks if a candidate stays within the ceiling.
    #[inline]
    pub fn admits(&self, candidate: Quantity) -> bool {
        candidate <= self.limit
    }
}

// =============================================================================
// Entry Limits
// =============================================================================

/// Per-screen limits on how much can be typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryLimits {
    /// Maximum significant digits (capped at [`MAX_ENTRY_DIGITS`]).
    pub max_digits: usize,
}

impl EntryLimits {
    /// Limits with a custom digit cap, clamped to `1..=MAX_ENTRY_DIGITS`.
    pub fn with_max_digits(max_digits: usize) -> Self {
        EntryLimits {
            max_digits: max_digits.clamp(1, MAX_ENTRY_DIGITS),
        }
    }
}

impl Default for EntryLimits {
    fn default() -> Self {
        EntryLimits {
            max_digits: MAX_ENTRY_DIGITS,
        }
    }
}

// =============================================================================
// Keystroke Outcome
// =============================================================================

/// Result of applying one digit to a textual buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct KeystrokeOutcome {
    /// The buffer to display (unchanged when rejected).
    pub buffer: String,
    /// Whether the keystroke was applied.
    pub accepted: bool,
    /// Warning to show under the keypad, if any.
    pub message: Option<String>,
}

// =============================================================================
// Typed Accumulator
// =============================================================================

/// Applies one digit (0-9) to a quantity.
///
/// ## Returns
/// - `Ok(candidate)` when the keystroke is accepted
/// - `Err(EntryRejection)` when it is not; the caller keeps `value`
pub fn accumulate(
    value: Quantity,
    digit: u8,
    mode: EntryMode,
    ceiling: Option<&Ceiling>,
    limits: EntryLimits,
) -> Result<Quantity, EntryRejection> {
    debug_assert!(digit <= 9, "keypad digits are 0-9");
    let digit = i64::from(digit.min(9));
    let max = limits.max_digits.min(MAX_ENTRY_DIGITS);

    // Unit mode shifts whole units; a fractional seed is rounded first.
    // A negative seed counts as zero.
    let raw = match mode {
        EntryMode::Unit => value.whole_units(),
        EntryMode::Decimal => value.hundredths(),
    }
    .max(0);

    let shifted = raw
        .checked_mul(10)
        .and_then(|v| v.checked_add(digit))
        .filter(|v| significant_digits(*v) <= max)
        .ok_or(EntryRejection::DigitLimit { max })?;

    let candidate = match mode {
        EntryMode::Unit => Quantity::from_hundredths(
            shifted
                .checked_mul(SCALE)
                .ok_or(EntryRejection::DigitLimit { max })?,
        ),
        EntryMode::Decimal => Quantity::from_hundredths(shifted),
    };

    match ceiling {
        Some(c) if !c.admits(candidate) => Err(EntryRejection::CeilingExceeded {
            limit: c.limit,
            scope: c.scope,
            mode,
        }),
        _ => Ok(candidate),
    }
}

/// Drops the last typed digit.
pub fn retract(value: Quantity, mode: EntryMode) -> Quantity {
    match mode {
        EntryMode::Unit => Quantity::from_units(value.whole_units().max(0) / 10),
        EntryMode::Decimal => Quantity::from_hundredths(value.hundredths().max(0) / 10),
    }
}

fn significant_digits(value: i64) -> usize {
    let mut v = value.unsigned_abs();
    let mut count = 0;
    while v > 0 {
        v /= 10;
        count += 1;
    }
    count
}

// =============================================================================
// Textual Accumulator
// =============================================================================

/// Applies a keypad digit to a textual buffer.
///
/// An empty buffer counts as zero. A character other than '0'-'9' leaves the
/// buffer unchanged (`accepted = false`, no message); the keypad never sends
/// one.
///
/// ## Example
/// ```rust
/// use bpims_core::entry::{append_digit, Ceiling};
/// use bpims_core::quantity::{EntryMode, Quantity};
/// use bpims_core::types::StockScope;
///
/// let ceiling = Ceiling::new(Quantity::from_units(50), StockScope::Branch);
/// let out = append_digit("5.00", '0', EntryMode::Decimal, Some(&ceiling));
/// assert_eq!(out.buffer, "50.00");
/// assert!(out.accepted);
/// ```
pub fn append_digit(
    buffer: &str,
    digit: char,
    mode: EntryMode,
    ceiling: Option<&Ceiling>,
) -> KeystrokeOutcome {
    append_digit_with_limits(buffer, digit, mode, ceiling, EntryLimits::default())
}

/// [`append_digit`] with an explicit digit cap.
pub fn append_digit_with_limits(
    buffer: &str,
    digit: char,
    mode: EntryMode,
    ceiling: Option<&Ceiling>,
    limits: EntryLimits,
) -> KeystrokeOutcome {
    let Some(d) = digit.to_digit(10) else {
        return KeystrokeOutcome {
            buffer: buffer.to_string(),
            accepted: false,
            message: None,
        };
    };

    let current = Quantity::parse(buffer);
    match accumulate(current, d as u8, mode, ceiling, limits) {
        Ok(next) => KeystrokeOutcome {
            buffer: next.format(mode),
            accepted: true,
            message: None,
        },
        Err(rejection) => KeystrokeOutcome {
            buffer: buffer.to_string(),
            accepted: false,
            message: rejection.warning(),
        },
    }
}

/// Removes the last digit from a textual buffer.
///
/// ## Example
/// ```rust
/// use bpims_core::entry::backspace;
/// use bpims_core::quantity::EntryMode;
///
/// assert_eq!(backspace("15", EntryMode::Unit), "1");
/// assert_eq!(backspace("1", EntryMode::Unit), "0");
/// assert_eq!(backspace("0.01", EntryMode::Decimal), "0.00");
/// ```
pub fn backspace(buffer: &str, mode: EntryMode) -> String {
    retract(Quantity::parse(buffer), mode).format(mode)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(units_hundredths: i64) -> Ceiling {
        Ceiling::new(Quantity::from_hundredths(units_hundredths), StockScope::Branch)
    }

    #[test]
    fn test_signed_buffer_starts_from_zero() {
        let out = append_digit("-5", '1', EntryMode::Unit, None);
        assert!(out.accepted);
        assert_eq!(out.buffer, "1");

        let out = append_digit("-0.50", '7', EntryMode::Decimal, None);
        assert_eq!(out.buffer, "0.07");

        let seeded = accumulate(
            Quantity::from_units(-5),
            1,
            EntryMode::Unit,
            None,
            EntryLimits::default(),
        );
        assert_eq!(seeded, Ok(Quantity::from_units(1)));
        assert_eq!(retract(Quantity::from_units(-5), EntryMode::Unit), Quantity::ZERO);
    }

    #[test]
    fn test_decimal_scenario_with_ceiling() {
        let ceiling = branch(5000);
        let mode = EntryMode::Decimal;

        let mut buffer = "0.00".to_string();
        for (key, expected) in [('5', "0.05"), ('0', "0.50"), ('0', "5.00"), ('0', "50.00")] {
            let out = append_digit(&buffer, key, mode, Some(&ceiling));
            assert!(out.accepted);
            assert_eq!(out.message, None);
            assert_eq!(out.buffer, expected);
            buffer = out.buffer;
        }

        let out = append_digit(&buffer, '0', mode, Some(&ceiling));
        assert!(!out.accepted);
        assert_eq!(out.buffer, "50.00");
        assert_eq!(
            out.message.as_deref(),
            Some("Quantity exceeds available stock. Available stock: 50.00")
        );
    }

    #[test]
    fn test_unit_scenario_with_ceiling() {
        let ceiling = branch(1200);
        let mode = EntryMode::Unit;

        let out = append_digit("", '1', mode, Some(&ceiling));
        assert!(out.accepted);
        assert_eq!(out.buffer, "1");

        let out = append_digit(&out.buffer, '5', mode, Some(&ceiling));
        assert!(!out.accepted);
        assert_eq!(out.buffer, "1");
        assert_eq!(
            out.message.as_deref(),
            Some("Quantity exceeds available stock. Available stock: 12")
        );
    }

    #[test]
    fn test_decimal_backspace_scenario() {
        let mode = EntryMode::Decimal;
        let mut buffer = "0.00".to_string();
        for key in ['1', '2', '3'] {
            buffer = append_digit(&buffer, key, mode, None).buffer;
        }
        assert_eq!(buffer, "1.23");

        buffer = backspace(&buffer, mode);
        assert_eq!(buffer, "0.12");
        buffer = backspace(&buffer, mode);
        assert_eq!(buffer, "0.01");
        buffer = backspace(&buffer, mode);
        assert_eq!(buffer, "0.00");
        assert_eq!(backspace(&buffer, mode), "0.00");
    }

    #[test]
    fn test_unit_leading_zeros_collapse() {
        let mode = EntryMode::Unit;
        let out = append_digit("0", '0', mode, None);
        assert_eq!(out.buffer, "0");
        let out = append_digit(&out.buffer, '1', mode, None);
        assert_eq!(out.buffer, "1");
        // Stale leading zeros from elsewhere parse numerically.
        let out = append_digit("01", '2', mode, None);
        assert_eq!(out.buffer, "12");
    }

    #[test]
    fn test_unit_ceiling_compares_numerically() {
        // 12.5 in stock: 12 fits, 13 does not.
        let ceiling = branch(1250);
        assert!(append_digit("1", '2', EntryMode::Unit, Some(&ceiling)).accepted);
        assert!(!append_digit("1", '3', EntryMode::Unit, Some(&ceiling)).accepted);
    }

    #[test]
    fn test_zero_ceiling_admits_only_zero() {
        let ceiling = branch(0);
        let out = append_digit("", '0', EntryMode::Unit, Some(&ceiling));
        assert!(out.accepted);
        let out = append_digit("", '1', EntryMode::Unit, Some(&ceiling));
        assert!(!out.accepted);
        assert_eq!(out.buffer, "");
    }

    #[test]
    fn test_warehouse_wording() {
        let ceiling = Ceiling::new(Quantity::from_units(3), StockScope::Warehouse);
        let out = append_digit("", '4', EntryMode::Unit, Some(&ceiling));
        assert_eq!(
            out.message.as_deref(),
            Some("Quantity exceeds available warehouse stock. Available stock: 3")
        );
    }

    #[test]
    fn test_non_digit_is_ignored() {
        let out = append_digit("1.20", 'x', EntryMode::Decimal, None);
        assert!(!out.accepted);
        assert_eq!(out.buffer, "1.20");
        assert_eq!(out.message, None);
    }

    #[test]
    fn test_digit_limit_is_silent() {
        let limits = EntryLimits::with_max_digits(4);
        let mode = EntryMode::Decimal;
        let out = append_digit_with_limits("99.99", '1', mode, None, limits);
        assert!(!out.accepted);
        assert_eq!(out.buffer, "99.99");
        assert_eq!(out.message, None);

        let out = append_digit_with_limits("9.99", '1', mode, None, limits);
        assert!(out.accepted);
        assert_eq!(out.buffer, "99.91");
    }

    #[test]
    fn test_default_limit_prevents_overflow() {
        let mut value = Quantity::ZERO;
        for _ in 0..40 {
            if let Ok(next) = accumulate(value, 9, EntryMode::Unit, None, EntryLimits::default()) {
                value = next;
            }
        }
        assert_eq!(value.whole_units(), 999_999_999_999_999);
    }

    #[test]
    fn test_unit_fractional_seed_rounds_before_shift() {
        let seeded = Quantity::from_hundredths(346);
        let next = accumulate(seeded, 1, EntryMode::Unit, None, EntryLimits::default()).unwrap();
        assert_eq!(next, Quantity::from_units(31));
    }

    #[test]
    fn test_limits_are_clamped() {
        assert_eq!(EntryLimits::with_max_digits(0).max_digits, 1);
        assert_eq!(EntryLimits::with_max_digits(99).max_digits, MAX_ENTRY_DIGITS);
    }
}
