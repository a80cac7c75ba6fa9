//! Configuration Module
//!
//! Handles loading and managing client configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default base URL of the user service
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:30100";

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the user service, without trailing slash
    pub base_url: String,
    /// Maximum number of users the cache can hold
    pub cache_max_entries: usize,
    /// Lifetime in seconds of a cached user snapshot
    pub cache_ttl: u64,
    /// Transport timeout for each request in milliseconds
    pub request_timeout_ms: u64,
    /// Path requested by the liveness pinger
    pub ping_path: String,
    /// Interval in seconds between periodic liveness pings
    pub ping_interval: u64,
    /// Interval in seconds between purges of expired cache entries
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `USER_SERVICE_URL` - Base URL (default: http://127.0.0.1:30100)
    /// - `USER_CACHE_MAX_ENTRIES` - Maximum cached users (default: 100)
    /// - `USER_CACHE_TTL` - Cache TTL in seconds (default: 15)
    /// - `REQUEST_TIMEOUT_MS` - Request timeout (default: 5000)
    /// - `PING_PATH` - Liveness endpoint (default: /ping)
    /// - `PING_INTERVAL` - Ping frequency in seconds (default: 10)
    /// - `CLEANUP_INTERVAL` - Purge frequency in seconds (default: 15)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("USER_SERVICE_URL")
                .map(|v| normalize_base_url(&v))
                .unwrap_or(defaults.base_url),
            cache_max_entries: parse_env("USER_CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.cache_max_entries),
            cache_ttl: parse_env("USER_CACHE_TTL").unwrap_or(defaults.cache_ttl),
            request_timeout_ms: parse_env("REQUEST_TIMEOUT_MS")
                .unwrap_or(defaults.request_timeout_ms),
            ping_path: env::var("PING_PATH").unwrap_or(defaults.ping_path),
            ping_interval: parse_env("PING_INTERVAL").unwrap_or(defaults.ping_interval),
            cleanup_interval: parse_env("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Reference deployment settings pointed at the given base URL.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            ..Self::default()
        }
    }

    /// Points the configuration at another base URL.
    pub fn set_base_url(&mut self, base_url: &str) {
        self.base_url = normalize_base_url(base_url);
    }

    pub fn cache_ttl_duration(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Full URL of the liveness endpoint.
    pub fn ping_url(&self) -> String {
        format!("{}{}", self.base_url, self.ping_path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_max_entries: 100,
            cache_ttl: 15,
            request_timeout_ms: 5000,
            ping_path: "/ping".to_string(),
            ping_interval: 10,
            cleanup_interval: 15,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
