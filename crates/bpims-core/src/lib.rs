//! # bpims-core: Keypad Entry Logic for BPIMS
//!
//! The input model behind every numeric keypad screen of the Balay Panday
//! inventory client, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        BPIMS Client Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Screens (host)                               │   │
//! │  │   Stock Input ──► Transfer ──► Return ──► Payment / Discount    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ keypad events                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bpims-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  entry    │  │controller │  │   forms   │  │  tender   │  │   │
//! │  │   │ append /  │  │ Idle ⇄    │  │ transfer  │  │ payment   │  │   │
//! │  │   │ backspace │  │ Editing   │  │ returns   │  │ discount  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               bpims-client (config, service, screen)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`quantity`] - Fixed-point `Quantity` and the Unit/Decimal entry modes
//! - [`entry`] - The masked digit accumulator and stock ceilings
//! - [`keypad`] - Keypad keys and layout
//! - [`controller`] - Edit-session state machine
//! - [`forms`] - Stock input, transfer and return forms
//! - [`money`] / [`tender`] - Payment, discount and delivery-fee entry
//! - [`types`] - Stock DTOs from the BPIMS API
//! - [`validation`] / [`error`] - Rule checks and error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bpims_core::entry::{append_digit, Ceiling};
//! use bpims_core::quantity::{EntryMode, Quantity};
//! use bpims_core::types::StockScope;
//!
//! let ceiling = Ceiling::new(Quantity::from_units(50), StockScope::Branch);
//! let outcome = append_digit("5.00", '0', EntryMode::Decimal, Some(&ceiling));
//! assert_eq!(outcome.buffer, "50.00");
//! assert!(outcome.accepted);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod controller;
pub mod entry;
pub mod error;
pub mod forms;
pub mod keypad;
pub mod money;
pub mod quantity;
pub mod tender;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use controller::{Commit, EntryState, KeyFeedback, QuantityEntryController};
pub use entry::{append_digit, backspace, Ceiling, EntryLimits, KeystrokeOutcome};
pub use error::{CoreError, CoreResult, EntryRejection, ValidationError};
pub use forms::{EntryField, QuantityForm};
pub use keypad::KeypadKey;
pub use money::Money;
pub use quantity::{format_quantity, EntryMode, Quantity};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Digit cap of the sales item grid quantity (up to 99.99).
pub const ITEM_MAX_DIGITS: usize = 4;
