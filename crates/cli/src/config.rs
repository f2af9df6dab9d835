//! Front-end configuration loaded from environment variables.

use std::path::PathBuf;

use stockroom_observability::LogFormat;
use thiserror::Error;

pub const SNAPSHOT_ENV: &str = "STOCKROOM_SNAPSHOT";
pub const LOG_FORMAT_ENV: &str = "STOCKROOM_LOG_FORMAT";
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Front-end configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `STOCKROOM_SNAPSHOT` — snapshot path offered by save/load (default: `"inventory.json"`)
/// - `STOCKROOM_LOG_FORMAT` — `pretty` or `json` (default: `pretty`)
/// - `RUST_LOG` — tracing filter directive (default: `"warn"`)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub snapshot_path: PathBuf,
    pub log_format: LogFormat,
    pub log_filter: String,
}

impl Config {
    /// Loads configuration from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let set = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let log_format = match set(LOG_FORMAT_ENV) {
            Some(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
                var: LOG_FORMAT_ENV,
                reason,
            })?,
            None => defaults.log_format,
        };

        Ok(Self {
            snapshot_path: set(SNAPSHOT_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.snapshot_path),
            log_format,
            log_filter: set(LOG_FILTER_ENV).unwrap_or(defaults.log_filter),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("inventory.json"),
            log_format: LogFormat::Pretty,
            log_filter: "warn".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.snapshot_path, PathBuf::from("inventory.json"));
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = Config::from_lookup(lookup_from(&[
            ("STOCKROOM_SNAPSHOT", "/var/lib/stockroom/shop.json"),
            ("STOCKROOM_LOG_FORMAT", "json"),
            ("RUST_LOG", "stockroom_inventory=debug"),
        ]))
        .unwrap();

        assert_eq!(
            config.snapshot_path,
            PathBuf::from("/var/lib/stockroom/shop.json")
        );
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_filter, "stockroom_inventory=debug");
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[("STOCKROOM_SNAPSHOT", "  ")])).unwrap();
        assert_eq!(config.snapshot_path, PathBuf::from("inventory.json"));
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("STOCKROOM_LOG_FORMAT", "xml")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "STOCKROOM_LOG_FORMAT",
                ..
            }
        ));
    }
}
