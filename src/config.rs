//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Longest TTL accepted for any cached read: 30 days
pub const MAX_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Which cache backend the service talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// In-process map with a background TTL sweep
    Memory,
    /// Shared Redis instance
    Redis,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(BackendKind::Memory),
            "redis" => Ok(BackendKind::Redis),
            other => Err(format!("unknown cache backend '{}'", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Cache backend selection
    pub cache_backend: BackendKind,
    /// Redis connection endpoint
    pub redis_url: String,
    /// Prefix isolating this service's keys on a shared backend
    pub cache_namespace: String,
    /// TTL in seconds for customer entities, pages and shipping addresses
    pub cache_ttl: u64,
    /// TTL in seconds for the countries reference list
    pub countries_ttl: u64,
    /// Upper bound on a single Redis command, in milliseconds
    pub redis_timeout_ms: u64,
    /// Memory backend cleanup interval in seconds
    pub cleanup_interval: u64,
    /// Seed the store with reference countries and a sample customer
    pub seed_data: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_BACKEND` - `memory` or `redis` (default: memory)
    /// - `REDIS_URL` - Redis endpoint (default: redis://127.0.0.1:6379)
    /// - `CACHE_NAMESPACE` - Key namespace (default: Customers_)
    /// - `CACHE_TTL` - Entity and collection TTL in seconds (default: 300)
    /// - `COUNTRIES_TTL` - Countries TTL in seconds (default: 3600)
    /// - `REDIS_TIMEOUT_MS` - Redis command timeout (default: 500)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `SEED_DATA` - Seed reference data on startup (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_backend: parse_var("CACHE_BACKEND").unwrap_or(defaults.cache_backend),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            cache_namespace: env::var("CACHE_NAMESPACE").unwrap_or(defaults.cache_namespace),
            cache_ttl: clamp_ttl(parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl)),
            countries_ttl: clamp_ttl(parse_var("COUNTRIES_TTL").unwrap_or(defaults.countries_ttl)),
            redis_timeout_ms: parse_var("REDIS_TIMEOUT_MS").unwrap_or(defaults.redis_timeout_ms),
            cleanup_interval: parse_var("CLEANUP_INTERVAL")
                .unwrap_or(defaults.cleanup_interval)
                .max(1),
            seed_data: parse_var("SEED_DATA").unwrap_or(defaults.seed_data),
        }
    }
}

/// Bounds a TTL to `1..=MAX_TTL_SECS`.
pub(crate) fn clamp_ttl(secs: u64) -> u64 {
    secs.clamp(1, MAX_TTL_SECS)
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_backend: BackendKind::Memory,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            cache_namespace: "Customers_".to_string(),
            cache_ttl: 300,
            countries_ttl: 3600,
            redis_timeout_ms: 500,
            cleanup_interval: 1,
            seed_data: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_backend, BackendKind::Memory);
        assert_eq!(config.cache_namespace, "Customers_");
        assert_eq!(config.cache_ttl, 300);
        assert_eq!(config.countries_ttl, 3600);
        assert_eq!(config.cleanup_interval, 1);
        assert!(config.seed_data);
    }

    #[test]
    fn test_backend_kind_parse() {
        assert_eq!("redis".parse::<BackendKind>(), Ok(BackendKind::Redis));
        assert_eq!(" Memory ".parse::<BackendKind>(), Ok(BackendKind::Memory));
        assert!("memcached".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_clamp_ttl_bounds() {
        assert_eq!(clamp_ttl(0), 1);
        assert_eq!(clamp_ttl(300), 300);
        assert_eq!(clamp_ttl(u64::MAX), MAX_TTL_SECS);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        for name in [
            "SERVER_PORT",
            "CACHE_BACKEND",
            "REDIS_URL",
            "CACHE_NAMESPACE",
            "CACHE_TTL",
            "COUNTRIES_TTL",
            "REDIS_TIMEOUT_MS",
            "CLEANUP_INTERVAL",
            "SEED_DATA",
        ] {
            env::remove_var(name);
        }

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_backend, BackendKind::Memory);
        assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
        assert_eq!(config.redis_timeout_ms, 500);
    }
}
