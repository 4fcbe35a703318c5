//! Configuration Module
//!
//! Loads cache and server settings from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_MAX_SIZE: usize = 50;
const DEFAULT_TTL_MS: u64 = 60 * 60 * 1000;
const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_SWEEP_INTERVAL_MS: u64 = 60 * 1000;

/// Cache and server configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of cached responses (0 disables storage)
    pub max_size: usize,
    /// TTL in milliseconds for entries stored without an explicit TTL
    pub default_ttl_ms: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Interval in milliseconds between expiry sweeps (0 disables the sweep)
    pub sweep_interval_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 50)
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 3600000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL_MS` - Expiry sweep interval, 0 = off (default: 60000)
    pub fn from_env() -> Self {
        Self {
            max_size: env_or("CACHE_MAX_SIZE", DEFAULT_MAX_SIZE),
            default_ttl_ms: env_or("CACHE_DEFAULT_TTL_MS", DEFAULT_TTL_MS),
            server_port: env_or("SERVER_PORT", DEFAULT_SERVER_PORT),
            sweep_interval_ms: env_or("SWEEP_INTERVAL_MS", DEFAULT_SWEEP_INTERVAL_MS),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.default_ttl_ms)
    }

    /// Sweep interval, or `None` when the periodic sweep is disabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_ms > 0).then(|| Duration::from_millis(self.sweep_interval_ms))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            default_ttl_ms: DEFAULT_TTL_MS,
            server_port: DEFAULT_SERVER_PORT,
            sweep_interval_ms: DEFAULT_SWEEP_INTERVAL_MS,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_size, 50);
        assert_eq!(config.default_ttl(), Duration::from_secs(3600));
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_sweep_disabled_at_zero() {
        let config = Config {
            sweep_interval_ms: 0,
            ..Config::default()
        };
        assert_eq!(config.sweep_interval(), None);
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        env::set_var("CATALOG_CACHE_TEST_GARBAGE", "not-a-number");
        assert_eq!(env_or("CATALOG_CACHE_TEST_GARBAGE", 7usize), 7);
        env::remove_var("CATALOG_CACHE_TEST_GARBAGE");
    }

    #[test]
    fn test_env_or_reads_value() {
        env::set_var("CATALOG_CACHE_TEST_VALUE", " 128 ");
        assert_eq!(env_or("CATALOG_CACHE_TEST_VALUE", 7usize), 128);
        env::remove_var("CATALOG_CACHE_TEST_VALUE");
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("CACHE_MAX_SIZE");
        env::remove_var("CACHE_DEFAULT_TTL_MS");
        env::remove_var("SERVER_PORT");
        env::remove_var("SWEEP_INTERVAL_MS");

        assert_eq!(Config::from_env(), Config::default());
    }
}
