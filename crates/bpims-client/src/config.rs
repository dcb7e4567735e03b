//! # Client Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BPIMS_API_URL=http://192.168.1.4:5000                              │
//! │     BPIMS_ITEM_MAX_DIGITS=4                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/bpims/client.toml (Linux)                                │
//! │     ~/Library/Application Support/ph.balaypanday.bpims/client.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! [api]
//! base_url = "http://192.168.1.4:5000"
//! socket_url = "ws://192.168.1.4:5000"
//!
//! [entry]
//! max_digits = 15
//! item_max_digits = 4
//!
//! [logging]
//! filter = "info,bpims=debug"
//! ```

use std::path::PathBuf;

use bpims_core::entry::EntryLimits;
use bpims_core::validation::validate_max_digits;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,bpims=debug";

// =============================================================================
// Sections
// =============================================================================

/// Where the BPIMS backend lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Live stock updates (critical items, branch stock).
    #[serde(default = "default_socket_url")]
    pub socket_url: String,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_socket_url() -> String {
    "ws://localhost:5000".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            socket_url: default_socket_url(),
        }
    }
}

/// Keypad digit caps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySettings {
    /// Cap for the stock and cart quantity screens. Tender screens keep the
    /// fixed `MAX_ENTRY_DIGITS` cap.
    #[serde(default = "default_max_digits")]
    pub max_digits: usize,

    /// Cap for the quantity typed on the sales item grid.
    #[serde(default = "default_item_max_digits")]
    pub item_max_digits: usize,
}

fn default_max_digits() -> usize {
    bpims_core::entry::MAX_ENTRY_DIGITS
}

fn default_item_max_digits() -> usize {
    bpims_core::ITEM_MAX_DIGITS
}

impl Default for EntrySettings {
    fn default() -> Self {
        EntrySettings {
            max_digits: default_max_digits(),
            item_max_digits: default_item_max_digits(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Client Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub entry: EntrySettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (client.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Client config saved");
        Ok(())
    }

    pub fn validate(&self) -> ClientResult<()> {
        let api = &self.api.base_url;
        if !api.starts_with("http://") && !api.starts_with("https://") {
            return Err(ClientError::InvalidConfig(format!(
                "API URL must start with http:// or https://, got: {}",
                api
            )));
        }

        let socket = &self.api.socket_url;
        if !socket.starts_with("ws://") && !socket.starts_with("wss://") {
            return Err(ClientError::InvalidConfig(format!(
                "Socket URL must start with ws:// or wss://, got: {}",
                socket
            )));
        }

        validate_max_digits("max_digits", self.entry.max_digits)
            .and_then(|_| validate_max_digits("item_max_digits", self.entry.item_max_digits))
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        if self.logging.filter.trim().is_empty() {
            return Err(ClientError::InvalidConfig("log filter must not be empty".into()));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `BPIMS_*` overrides from `lookup`. Unparseable numbers are
    /// ignored with a warning.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("BPIMS_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(url) = lookup("BPIMS_SOCKET_URL") {
            debug!(url = %url, "Overriding socket URL from environment");
            self.api.socket_url = url;
        }

        if let Some(digits) = lookup("BPIMS_MAX_DIGITS") {
            match digits.parse::<usize>() {
                Ok(n) => self.entry.max_digits = n,
                Err(_) => warn!(value = %digits, "Ignoring non-numeric BPIMS_MAX_DIGITS"),
            }
        }

        if let Some(digits) = lookup("BPIMS_ITEM_MAX_DIGITS") {
            match digits.parse::<usize>() {
                Ok(n) => self.entry.item_max_digits = n,
                Err(_) => warn!(value = %digits, "Ignoring non-numeric BPIMS_ITEM_MAX_DIGITS"),
            }
        }

        if let Some(filter) = lookup("BPIMS_LOG_FILTER") {
            self.logging.filter = filter;
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("ph", "balaypanday", "bpims")
            .map(|dirs| dirs.config_dir().join("client.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Digit cap for stock and cart quantity keypads.
    pub fn entry_limits(&self) -> EntryLimits {
        EntryLimits::with_max_digits(self.entry.max_digits)
    }

    /// Digit cap for the item grid quantity keypad.
    pub fn item_limits(&self) -> EntryLimits {
        EntryLimits::with_max_digits(self.entry.item_max_digits)
    }
}
