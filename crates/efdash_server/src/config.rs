//! Server configuration read from the process environment.

use efdash_core::default_log_level;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const BIND_ADDR_VAR: &str = "EFDASH_BIND_ADDR";
pub const DB_PATH_VAR: &str = "EFDASH_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "EFDASH_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "EFDASH_LOG_DIR";
pub const ENVIRONMENT_VAR: &str = "EFDASH_ENVIRONMENT";
pub const DETAILED_ERRORS_VAR: &str = "EFDASH_DETAILED_ERRORS";
pub const COUNTRIES_CACHE_TTL_VAR: &str = "EFDASH_COUNTRIES_CACHE_TTL_SECS";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5151";
const DEFAULT_DB_PATH: &str = "efdash.sqlite3";
const DEFAULT_ENVIRONMENT: &str = "Development";
const DEFAULT_COUNTRIES_CACHE_TTL_SECS: u64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    pub log_level: String,
    /// Rotating log files go here; stderr when unset.
    pub log_dir: Option<String>,
    pub environment: String,
    /// Whether 500 responses carry the underlying error text.
    pub detailed_errors: bool,
    /// Zero disables the distinct-countries cache.
    pub countries_cache_ttl: Duration,
}

impl ServerConfig {
    /// Loads the configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_addr_text = read(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr_text
            .parse::<SocketAddr>()
            .map_err(|err| invalid(BIND_ADDR_VAR, &bind_addr_text, err))?;

        let detailed_errors = match read(DETAILED_ERRORS_VAR) {
            None => true,
            Some(value) => parse_bool(&value)
                .ok_or_else(|| invalid(DETAILED_ERRORS_VAR, &value, "expected true or false"))?,
        };

        let countries_cache_ttl = match read(COUNTRIES_CACHE_TTL_VAR) {
            None => Duration::from_secs(DEFAULT_COUNTRIES_CACHE_TTL_SECS),
            Some(value) => value
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|err| invalid(COUNTRIES_CACHE_TTL_VAR, &value, err))?,
        };

        Ok(Self {
            bind_addr,
            db_path: read(DB_PATH_VAR)
                .map_or_else(|| PathBuf::from(DEFAULT_DB_PATH), PathBuf::from),
            log_level: read(LOG_LEVEL_VAR).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_VAR),
            environment: read(ENVIRONMENT_VAR).unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            detailed_errors,
            countries_cache_ttl,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn invalid(name: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ServerConfig, DETAILED_ERRORS_VAR};
    use std::collections::HashMap;
    use std::time::Duration;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:5151");
        assert_eq!(config.db_path.to_str(), Some("efdash.sqlite3"));
        assert_eq!(config.environment, "Development");
        assert_eq!(config.log_dir, None);
        assert!(config.detailed_errors);
        assert_eq!(config.countries_cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = config(&[
            ("EFDASH_BIND_ADDR", "0.0.0.0:8080"),
            ("EFDASH_DB_PATH", "/var/lib/efdash/data.sqlite3"),
            ("EFDASH_LOG_DIR", "/var/log/efdash"),
            ("EFDASH_DETAILED_ERRORS", "off"),
            ("EFDASH_COUNTRIES_CACHE_TTL_SECS", "0"),
            ("EFDASH_LOG_LEVEL", "  "),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/efdash"));
        assert!(!config.detailed_errors);
        assert_eq!(config.countries_cache_ttl, Duration::ZERO);
        assert_eq!(config.log_level, efdash_core::default_log_level());
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = config(&[(DETAILED_ERRORS_VAR, "maybe")]).unwrap_err();
        assert!(err.to_string().contains(DETAILED_ERRORS_VAR));

        let err = config(&[("EFDASH_BIND_ADDR", "not an address")]).unwrap_err();
        assert!(err.to_string().contains("EFDASH_BIND_ADDR"));
    }
}
