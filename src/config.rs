//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use tracing::warn;

/// Which store the cache client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Remote Redis server at `redis_url`
    Redis,
    /// In-process store, for local runs and tests
    Memory,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(BackendKind::Redis),
            "memory" => Ok(BackendKind::Memory),
            other => Err(format!("unknown cache backend '{}'", other)),
        }
    }
}

/// How `list_set` treats a list that already exists under the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListWriteMode {
    /// Push onto the tail; repeated writes accumulate
    #[default]
    Append,
    /// Clear the key first, then push
    Replace,
}

impl FromStr for ListWriteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "append" => Ok(ListWriteMode::Append),
            "replace" => Ok(ListWriteMode::Replace),
            other => Err(format!("unknown list write mode '{}'", other)),
        }
    }
}

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Store the client connects to
    pub backend: BackendKind,
    /// Connection URL for the Redis backend
    pub redis_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Overwrite policy for `list_set`
    pub list_write_mode: ListWriteMode,
    /// Expired-key sweep interval in seconds (memory backend only)
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// A variable that is set but does not parse is logged at `warn` and
    /// replaced by its default.
    ///
    /// # Environment Variables
    /// - `CACHE_BACKEND` - `redis` or `memory` (default: redis)
    /// - `REDIS_URL` - Redis connection URL (default: redis://127.0.0.1:6379/)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `LIST_WRITE_MODE` - `append` or `replace` (default: append)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: parse_var("CACHE_BACKEND").unwrap_or(defaults.backend),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            list_write_mode: parse_var("LIST_WRITE_MODE").unwrap_or(defaults.list_write_mode),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }
}

fn parse_var<T>(name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    parse_value(name, env::var(name).ok())
}

fn parse_value<T>(name: &str, raw: Option<String>) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = raw?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}; using the default", name, raw, e);
            None
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::Redis,
            redis_url: "redis://127.0.0.1:6379/".to_string(),
            server_port: 3000,
            list_write_mode: ListWriteMode::Append,
            cleanup_interval: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.backend, BackendKind::Redis);
        assert_eq!(config.redis_url, "redis://127.0.0.1:6379/");
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.list_write_mode, ListWriteMode::Append);
        assert_eq!(config.cleanup_interval, 1);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_BACKEND");
        env::remove_var("REDIS_URL");
        env::remove_var("SERVER_PORT");
        env::remove_var("LIST_WRITE_MODE");
        env::remove_var("CLEANUP_INTERVAL");

        let config = Config::from_env();
        assert_eq!(config.backend, BackendKind::Redis);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.list_write_mode, ListWriteMode::Append);
        assert_eq!(config.cleanup_interval, 1);
    }

    #[test]
    fn test_backend_kind_parse() {
        assert_eq!("memory".parse::<BackendKind>(), Ok(BackendKind::Memory));
        assert_eq!(" Redis ".parse::<BackendKind>(), Ok(BackendKind::Redis));
        assert!("sqlite".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_list_write_mode_parse() {
        assert_eq!("REPLACE".parse::<ListWriteMode>(), Ok(ListWriteMode::Replace));
        assert_eq!("append".parse::<ListWriteMode>(), Ok(ListWriteMode::Append));
        assert!("merge".parse::<ListWriteMode>().is_err());
    }

    #[test]
    fn test_unparsable_value_falls_back() {
        let mode: Option<ListWriteMode> =
            parse_value("LIST_WRITE_MODE", Some("replce".to_string()));
        assert_eq!(mode, None);

        let port: Option<u16> = parse_value("SERVER_PORT", Some("70000".to_string()));
        assert_eq!(port, None);

        let mode: Option<ListWriteMode> =
            parse_value("LIST_WRITE_MODE", Some("replace".to_string()));
        assert_eq!(mode, Some(ListWriteMode::Replace));

        let unset: Option<u64> = parse_value("CLEANUP_INTERVAL", None);
        assert_eq!(unset, None);
    }
}
