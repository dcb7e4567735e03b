//! # Client Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Entry / Form  │  │     Service             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Core(CoreError)│  │  ItemNotFound           │ │
//! │  │  ConfigLoad     │  │  (Validation)   │  │  ServiceUnavailable     │ │
//! │  │  ConfigSave     │  │                 │  │  InsufficientStock      │ │
//! │  │                 │  │                 │  │  Serialization          │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bpims_core::{CoreError, Quantity, ValidationError};
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Entry Errors
    // =========================================================================
    /// Keypad session misuse or form rule failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Service Errors
    // =========================================================================
    #[error("Item not found: {0}")]
    ItemNotFound(i64),

    /// The backend refused a movement larger than the stock on hand.
    #[error("Insufficient stock for item {item_id}: available {available}")]
    InsufficientStock { item_id: i64, available: Quantity },

    #[error("Stock service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Serialization failed: {0}")]
    SerializationFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Core(CoreError::Validation(err))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::SerializationFailed(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

impl ClientError {
    /// Returns true for failures worth retrying later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::ServiceUnavailable(_))
    }

    /// Returns true if a form rule blocked the action.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Core(CoreError::Validation(_)))
    }
}
