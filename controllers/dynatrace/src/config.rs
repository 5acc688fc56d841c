//! Controller configuration
//!
//! Read once at startup from environment variables.

use crate::error::ControllerError;
use std::time::Duration;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Requeue delay after a successful reconcile (`POLL_INTERVAL_SECS`)
    pub poll_interval: Duration,
    /// Concurrent reconciles per kind (`MAX_CONCURRENT_RECONCILES`)
    pub max_concurrent_reconciles: u16,
    /// Quiet period after the last event before reconciling (`DEBOUNCE_SECS`)
    pub debounce: Duration,
    /// Port of the health and metrics server (`METRICS_PORT`)
    pub metrics_port: u16,
    /// `LOG_FORMAT`, `text` or `json`
    pub log_format: LogFormat,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(60),
            max_concurrent_reconciles: 3,
            debounce: Duration::from_secs(5),
            metrics_port: 8080,
            log_format: LogFormat::Text,
        }
    }
}

impl ControllerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ControllerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for unset keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ControllerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let poll_interval = match parse::<u64>(&lookup, "POLL_INTERVAL_SECS")? {
            Some(0) => {
                return Err(ControllerError::InvalidConfig(
                    "POLL_INTERVAL_SECS must be greater than zero".to_string(),
                ));
            }
            Some(secs) => Duration::from_secs(secs),
            None => defaults.poll_interval,
        };

        let max_concurrent_reconciles = match parse::<u16>(&lookup, "MAX_CONCURRENT_RECONCILES")? {
            Some(0) => {
                return Err(ControllerError::InvalidConfig(
                    "MAX_CONCURRENT_RECONCILES must be greater than zero".to_string(),
                ));
            }
            Some(n) => n,
            None => defaults.max_concurrent_reconciles,
        };

        let debounce = parse::<u64>(&lookup, "DEBOUNCE_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.debounce);

        let metrics_port = parse::<u16>(&lookup, "METRICS_PORT")?.unwrap_or(defaults.metrics_port);

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") => defaults.log_format,
            Some(v) if v.eq_ignore_ascii_case("text") => LogFormat::Text,
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(other) => {
                return Err(ControllerError::InvalidConfig(format!(
                    "LOG_FORMAT must be 'text' or 'json', got '{}'",
                    other
                )));
            }
        };

        Ok(Self {
            poll_interval,
            max_concurrent_reconciles,
            debounce,
            metrics_port,
            log_format,
        })
    }
}

fn parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ControllerError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            ControllerError::InvalidConfig(format!("{} has invalid value '{}'", key, raw))
        }),
    }
}
