//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::MAX_CAPACITY;
use crate::error::{AuditError, Result};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of message snapshots the cache holds before FIFO eviction
    pub cache_capacity: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Stats reporter interval in seconds (0 disables the reporter)
    pub stats_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Cached message snapshots (default: 1000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STATS_INTERVAL` - Stats log frequency in seconds (default: 60)
    ///
    /// Unset variables fall back to their defaults. A variable that is set
    /// but does not parse is rejected rather than silently replaced.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            cache_capacity: parse_var("CACHE_CAPACITY", defaults.cache_capacity)?,
            server_port: parse_var("SERVER_PORT", defaults.server_port)?,
            stats_interval: parse_var("STATS_INTERVAL", defaults.stats_interval)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the service cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(AuditError::InvalidConfig(
                "CACHE_CAPACITY must be greater than zero".to_string(),
            ));
        }
        if self.cache_capacity > MAX_CAPACITY {
            return Err(AuditError::InvalidConfig(format!(
                "CACHE_CAPACITY must not exceed {}",
                MAX_CAPACITY
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 1000,
            server_port: 3000,
            stats_interval: 60,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            AuditError::InvalidConfig(format!("{} has an invalid value: {:?}", name, raw))
        }),
        Err(_) => Ok(default),
    }
}
