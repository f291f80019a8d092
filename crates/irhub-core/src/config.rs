//! Configuration defaults, environment variable names and the server config.
//!
//! Precedence when the server starts: TOML file, then environment variables,
//! then command-line flags.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default values.
pub mod defaults {
    pub const BIND: &str = "127.0.0.1:9375";
    pub const DB_PATH: &str = "data/irhub.redb";
    /// Bounded wait for the transmitter relay.
    pub const TRANSMITTER_TIMEOUT_SECS: u64 = 5;
    pub const HISTORY_LIMIT: usize = 50;
    pub const HISTORY_MAX_LIMIT: usize = 500;
    pub const DEVICE_TYPE: &str = "tv";
}

/// Environment variable names.
pub mod env_vars {
    pub const BIND: &str = "IRHUB_BIND";
    pub const DB_PATH: &str = "IRHUB_DB_PATH";
    pub const TRANSMITTER_TIMEOUT_SECS: &str = "IRHUB_TRANSMITTER_TIMEOUT_SECS";
    pub const HISTORY_LIMIT: &str = "IRHUB_HISTORY_LIMIT";
    pub const LOG_JSON: &str = "IRHUB_LOG_JSON";

    /// Whether JSON log output was requested.
    pub fn log_json() -> bool {
        std::env::var(LOG_JSON)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false)
    }
}

/// Setting keys the backend itself interprets.
pub mod settings_keys {
    /// URL of the IR transmitter relay.
    pub const IR_ENDPOINT: &str = "ir_endpoint";
}

/// Clamp a requested history page size into the supported range.
pub fn clamp_history_limit(limit: Option<usize>) -> usize {
    match limit {
        None | Some(0) => defaults::HISTORY_LIMIT,
        Some(n) => n.min(defaults::HISTORY_MAX_LIMIT),
    }
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    pub bind: String,
    /// Path of the redb database file.
    pub db_path: PathBuf,
    /// Timeout for a single transmitter request, in seconds.
    pub transmitter_timeout_secs: u64,
    /// Default number of history entries returned.
    pub history_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: defaults::BIND.to_string(),
            db_path: PathBuf::from(defaults::DB_PATH),
            transmitter_timeout_secs: defaults::TRANSMITTER_TIMEOUT_SECS,
            history_limit: defaults::HISTORY_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Parse a config from TOML text. Missing fields take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "Loaded server config");
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Unparseable numeric values are ignored and the current value kept.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(env_vars::BIND) {
            self.bind = bind;
        }
        if let Some(path) = lookup(env_vars::DB_PATH) {
            self.db_path = PathBuf::from(path);
        }
        if let Some(secs) = lookup(env_vars::TRANSMITTER_TIMEOUT_SECS).and_then(|s| s.parse().ok()) {
            self.transmitter_timeout_secs = secs;
        }
        if let Some(limit) = lookup(env_vars::HISTORY_LIMIT).and_then(|s| s.parse().ok()) {
            self.history_limit = limit;
        }
        self
    }

    /// Check the values are usable.
    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        if self.transmitter_timeout_secs == 0 {
            return Err(Error::config("transmitter_timeout_secs must be greater than 0"));
        }
        if self.history_limit == 0 || self.history_limit > defaults::HISTORY_MAX_LIMIT {
            return Err(Error::config(format!(
                "history_limit must be between 1 and {}",
                defaults::HISTORY_MAX_LIMIT
            )));
        }
        Ok(())
    }

    /// Parsed bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .map_err(|_| Error::config(format!("Invalid bind address: {}", self.bind)))
    }

    /// Transmitter timeout as a duration.
    pub fn transmitter_timeout(&self) -> Duration {
        Duration::from_secs(self.transmitter_timeout_secs)
    }
}
