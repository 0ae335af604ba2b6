use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::scan::ChannelUrls;

// =============================================================================
// Upstream listing pages
// =============================================================================

/// Source download index; stable releases are listed in its first column
pub const DEFAULT_STABLE_URL: &str = "https://www.python.org/downloads/source/";

/// Flat FTP directory listing containing every published release directory
pub const DEFAULT_PRERELEASE_URL: &str = "https://www.python.org/ftp/python/";

pub const STABLE_SELECTOR: &str = ".col-row.two-col .column:first-child a[href]";

pub const PRERELEASE_SELECTOR: &str = "a[href]";

pub const USER_AGENT: &str = concat!("pyversion-server/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Time-related constants
// =============================================================================

/// Timeout for fetching a listing page in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Logging
// =============================================================================

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// File name prefix of the daily rolling log written under `LOG_DIR`
pub const LOG_FILE_NAME: &str = "pyversion-server.log";

// =============================================================================
// Rate limiting
// =============================================================================

/// Sustained requests per minute admitted per path
pub const DEFAULT_RATE_PER_MINUTE: u32 = 20;

/// Requests admitted above the sustained rate in a single burst
pub const DEFAULT_RATE_BURST: u32 = 5;

/// Maximum number of distinct paths tracked by the rate governor
pub const DEFAULT_RATE_MAX_KEYS: usize = 65_536;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Port to listen on (`PORT`, required)
    pub port: u16,
    /// Listing page per channel (`STABLE_URL`, `PRERELEASE_URL`)
    pub urls: ChannelUrls,
    /// Listing page fetch timeout (`FETCH_TIMEOUT_SECS`)
    pub fetch_timeout: Duration,
    /// Sustained per-path rate (`RATE_LIMIT_PER_MINUTE`)
    pub rate_per_minute: u32,
    /// Per-path burst allowance (`RATE_LIMIT_BURST`)
    pub rate_burst: u32,
}

impl ServerConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT").ok_or(ConfigError::Missing("PORT"))?;
        let port = parse_var("PORT", &port, "a valid port number")?;

        let defaults = ChannelUrls::default();
        let urls = ChannelUrls {
            stable: lookup("STABLE_URL").unwrap_or(defaults.stable),
            prerelease: lookup("PRERELEASE_URL").unwrap_or(defaults.prerelease),
        };

        let fetch_timeout = match lookup("FETCH_TIMEOUT_SECS") {
            Some(value) => parse_var::<u64>("FETCH_TIMEOUT_SECS", &value, "a number of seconds")?,
            None => DEFAULT_FETCH_TIMEOUT_SECS,
        };

        let rate_per_minute = match lookup("RATE_LIMIT_PER_MINUTE") {
            Some(value) => parse_var("RATE_LIMIT_PER_MINUTE", &value, "a positive integer")?,
            None => DEFAULT_RATE_PER_MINUTE,
        };
        if rate_per_minute == 0 {
            return Err(ConfigError::Invalid {
                name: "RATE_LIMIT_PER_MINUTE",
                expected: "a positive integer",
                value: "0".to_string(),
            });
        }

        let rate_burst = match lookup("RATE_LIMIT_BURST") {
            Some(value) => parse_var("RATE_LIMIT_BURST", &value, "a non-negative integer")?,
            None => DEFAULT_RATE_BURST,
        };

        Ok(Self {
            port,
            urls,
            fetch_timeout: Duration::from_secs(fetch_timeout),
            rate_per_minute,
            rate_burst,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    value: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        expected,
        value: value.to_string(),
    })
}
