//! # Keypad Module
//!
//! The on-screen numeric keypad shared by all entry screens.
//!
//! ```text
//! ┌───────┬───────┬───────┐
//! │   1   │   2   │   3   │
//! ├───────┼───────┼───────┤
//! │   4   │   5   │   6   │
//! ├───────┼───────┼───────┤
//! │   7   │   8   │   9   │
//! ├───────┼───────┼───────┤
//! │       │   0   │   <   │   (blank key does nothing)
//! └───────┴───────┴───────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Key labels in display order, row by row.
pub const KEYPAD_LAYOUT: [[&str; 3]; 4] = [
    ["1", "2", "3"],
    ["4", "5", "6"],
    ["7", "8", "9"],
    ["", "0", "<"],
];

/// Label of the backspace key.
pub const BACKSPACE_LABEL: &str = "<";

/// A key press from the numeric keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "digit", rename_all = "snake_case")]
pub enum KeypadKey {
    /// A digit 0-9.
    Digit(u8),
    /// Remove the last digit.
    Backspace,
}

impl KeypadKey {
    /// Creates a digit key, if `d` is 0-9.
    pub fn digit(d: u8) -> Option<Self> {
        (d <= 9).then_some(KeypadKey::Digit(d))
    }

    /// Maps a key label to a key press.
    ///
    /// Returns `None` for the blank key and for anything not on the keypad.
    pub fn from_label(label: &str) -> Option<Self> {
        if label == BACKSPACE_LABEL {
            return Some(KeypadKey::Backspace);
        }
        let mut chars = label.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_digit(10).map(|d| KeypadKey::Digit(d as u8)),
            _ => None,
        }
    }

    /// Like [`KeypadKey::from_label`], but an unknown label is an error.
    /// The blank key still maps to `Ok(None)`.
    pub fn parse_label(label: &str) -> CoreResult<Option<Self>> {
        if label.is_empty() {
            return Ok(None);
        }
        Self::from_label(label)
            .map(Some)
            .ok_or_else(|| CoreError::InvalidKey(label.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_layout_label_is_handled() {
        for label in KEYPAD_LAYOUT.iter().flatten() {
            let parsed = KeypadKey::parse_label(label).unwrap();
            assert_eq!(parsed.is_none(), label.is_empty());
        }
    }

    #[test]
    fn test_from_label() {
        assert_eq!(KeypadKey::from_label("7"), Some(KeypadKey::Digit(7)));
        assert_eq!(KeypadKey::from_label("<"), Some(KeypadKey::Backspace));
        assert_eq!(KeypadKey::from_label(""), None);
        assert_eq!(KeypadKey::from_label("12"), None);
        assert_eq!(KeypadKey::from_label("a"), None);
    }

    #[test]
    fn test_parse_label_rejects_unknown() {
        assert!(matches!(
            KeypadKey::parse_label("."),
            Err(CoreError::InvalidKey(label)) if label == "."
        ));
    }

    #[test]
    fn test_digit_constructor() {
        assert_eq!(KeypadKey::digit(0), Some(KeypadKey::Digit(0)));
        assert_eq!(KeypadKey::digit(10), None);
    }
}
