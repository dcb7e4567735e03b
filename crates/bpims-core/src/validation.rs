//! # Validation Module
//!
//! Rule checks shared by the stock forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Keypad (entry module)                                        │
//! │  └── Stock ceiling and digit cap, per keystroke                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Form (THIS MODULE)                                           │
//! │  └── Required fields, non-zero quantities, chosen branch/supplier      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: BPIMS API                                                    │
//! │  └── Authoritative stock movement checks                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::entry::MAX_ENTRY_DIGITS;
use crate::error::ValidationError;
use crate::quantity::Quantity;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Text Validators
// =============================================================================

/// Validates that a text field is not blank.
///
/// ## Example
/// ```rust
/// use bpims_core::validation::validate_required;
///
/// assert!(validate_required("reason", "Damaged in transit").is_ok());
/// assert!(validate_required("reason", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that a quantity was entered (non-zero).
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Stock Transfer                                                         │
/// │                                                                         │
/// │  Quantity: 0.00   ← never opened the keypad                            │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_nonzero_quantity("quantity", 0) → MustBeNonZero              │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  SAVE button stays disabled                                            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_nonzero_quantity(field: &str, value: Quantity) -> ValidationResult<()> {
    if value.is_zero() {
        return Err(ValidationError::MustBeNonZero {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates that a picker selection (branch, supplier) was made.
pub fn validate_selected_id(field: &str, id: i64) -> ValidationResult<()> {
    if id == 0 {
        return Err(ValidationError::MustBeNonZero {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a configured keypad digit cap.
pub fn validate_max_digits(field: &str, max_digits: usize) -> ValidationResult<()> {
    if max_digits == 0 || max_digits > MAX_ENTRY_DIGITS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: MAX_ENTRY_DIGITS as i64,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("deliveredBy", "Juan").is_ok());
        assert_eq!(
            validate_required("deliveredBy", ""),
            Err(ValidationError::Required {
                field: "deliveredBy".to_string()
            })
        );
    }

    #[test]
    fn test_validate_nonzero_quantity() {
        assert!(validate_nonzero_quantity("qty", Quantity::from_hundredths(1)).is_ok());
        assert!(validate_nonzero_quantity("qty", Quantity::ZERO).is_err());
    }

    #[test]
    fn test_validate_selected_id() {
        assert!(validate_selected_id("branchToId", 3).is_ok());
        assert!(validate_selected_id("branchToId", 0).is_err());
    }

    #[test]
    fn test_validate_max_digits() {
        assert!(validate_max_digits("maxDigits", 4).is_ok());
        assert!(validate_max_digits("maxDigits", 15).is_ok());
        assert!(validate_max_digits("maxDigits", 0).is_err());
        assert!(validate_max_digits("maxDigits", 16).is_err());
    }
}
