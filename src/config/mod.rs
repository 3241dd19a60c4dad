//! Typed configuration from environment variables.
//!
//! Nothing is required; every variable has a default. Malformed values fail
//! fast instead of falling back.

use std::time::Duration;

use crate::error::{Error, Result};

/// Default pause between pops, in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct Config {
    pub drain_interval: Duration,
    pub otel_endpoint: Option<String>,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In local dev, call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self> {
        let interval_ms = match std::env::var("TIERQ_INTERVAL_MS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
                Error::Config(format!("TIERQ_INTERVAL_MS must be milliseconds, got {raw:?}: {e}"))
            })?,
            Err(_) => DEFAULT_INTERVAL_MS,
        };

        Ok(Self {
            drain_interval: Duration::from_millis(interval_ms),
            otel_endpoint: std::env::var("OTEL_ENDPOINT").ok().filter(|s| !s.is_empty()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
