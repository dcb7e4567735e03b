//! # Error Types
//!
//! Domain-specific error types for bpims-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bpims-core errors (this file)                                         │
//! │  ├── EntryRejection   - A keystroke the accumulator refused            │
//! │  ├── CoreError        - Edit-session misuse, wrapped validation        │
//! │  └── ValidationError  - Form rule failures before submit               │
//! │                                                                         │
//! │  bpims-client errors (separate crate)                                  │
//! │  └── ClientError      - Config, service and core failures              │
//! │                                                                         │
//! │  EntryRejection is NOT a failure: the buffer stays unchanged and the   │
//! │  screen shows the warning. It never propagates as an Err upwards.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::quantity::{EntryMode, Quantity};
use crate::types::StockScope;

// =============================================================================
// Entry Rejection
// =============================================================================

/// A keystroke the accumulator refused to apply.
///
/// ## User Workflow
/// ```text
/// Available stock: 12 (sell by unit)
///      │
///      ▼
/// Buffer "1", user presses '5'
///      │
///      ▼
/// Candidate 15 > 12 → CeilingExceeded
///      │
///      ▼
/// Buffer stays "1"
/// UI shows: "Quantity exceeds available stock. Available stock: 12"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryRejection {
    /// The candidate value would exceed the available stock.
    #[error(
        "Quantity exceeds available {}. Available stock: {}",
        .scope.noun(),
        .mode.render(.limit)
    )]
    CeilingExceeded {
        limit: Quantity,
        scope: StockScope,
        mode: EntryMode,
    },

    /// The buffer already holds the maximum number of digits.
    #[error("Entry is limited to {max} digits")]
    DigitLimit { max: usize },
}

impl EntryRejection {
    /// The warning to surface under the keypad, if any.
    ///
    /// Only a ceiling violation is shown to the user; the digit limit is
    /// silent (the keypad simply stops accepting digits).
    pub fn warning(&self) -> Option<String> {
        match self {
            EntryRejection::CeilingExceeded { .. } => Some(self.to_string()),
            EntryRejection::DigitLimit { .. } => None,
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Core errors.
///
/// These represent misuse of an edit session (driving the controller out of
/// order) or a form that fails its rules at submit time.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A keystroke, Done or Back arrived while no field was being edited.
    #[error("No field is being edited")]
    NotEditing,

    /// A second field was opened while another is still being edited.
    ///
    /// ## When This Occurs
    /// - The UI failed to close the keypad before opening another field
    /// - A double tap re-opened the field that is already open
    #[error("Field {field} is already being edited")]
    AlreadyEditing { field: String },

    /// A key label that is not on the numeric keypad.
    #[error("Invalid keypad key: {0:?}")]
    InvalidKey(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Form validation errors.
///
/// The first failing rule wins; screens disable their submit button while
/// any rule fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// A quantity or id that must have been entered is still zero.
    #[error("{field} must not be zero")]
    MustBeNonZero { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_message_branch_unit() {
        let err = EntryRejection::CeilingExceeded {
            limit: Quantity::from_units(12),
            scope: StockScope::Branch,
            mode: EntryMode::Unit,
        };
        assert_eq!(
            err.to_string(),
            "Quantity exceeds available stock. Available stock: 12"
        );
    }

    #[test]
    fn test_ceiling_message_warehouse_decimal() {
        let err = EntryRejection::CeilingExceeded {
            limit: Quantity::from_hundredths(5000),
            scope: StockScope::Warehouse,
            mode: EntryMode::Decimal,
        };
        assert_eq!(
            err.to_string(),
            "Quantity exceeds available warehouse stock. Available stock: 50.00"
        );
    }

    #[test]
    fn test_digit_limit_is_silent() {
        let err = EntryRejection::DigitLimit { max: 4 };
        assert_eq!(err.warning(), None);
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "reason".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Validation error: reason is required");
    }
}
