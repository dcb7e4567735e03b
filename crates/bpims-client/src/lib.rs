//! # bpims-client: Host Layer for BPIMS Keypad Screens
//!
//! Runs the `bpims-core` input model against real collaborators.
//!
//! ## Modules
//!
//! - [`config`] - `ClientConfig` (TOML file + `BPIMS_*` environment)
//! - [`service`] - `StockService` trait and the in-memory implementation
//! - [`screen`] - `StockEntryScreen` and `CartQuantityScreen`
//! - [`error`] - `ClientError`
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. ClientConfig::load_or_default(None)                                 │
//! │  2. init_tracing(&config)                                               │
//! │  3. StockEntryScreen::load_transfer(&service, item_id, branch, &config) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod screen;
pub mod service;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use screen::{CartQuantityScreen, ItemQuantityScreen, StockEntryScreen, SubmitForm};
pub use service::{InMemoryStockService, StockService, Submission};

use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bpims_core=trace` - Trace the keypad sessions only
/// - Default: the config's `logging.filter` (`info,bpims=debug`)
///
/// Calling it twice is harmless; the second subscriber is ignored.
pub fn init_tracing(config: &ClientConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok();

    if installed {
        info!(api = %config.api.base_url, "BPIMS client logging initialized");
    }
}
