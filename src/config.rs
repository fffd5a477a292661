//! Engine and store configuration.
//!
//! Both configs carry working defaults so tests and embedded hosts can use
//! `Default`; deployments override via environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

const DEFAULT_POINT_URL: &str =
    "https://services.arcgis.com/HRPe58bUyBqyyiCt/arcgis/rest/services/RedlinePoints/FeatureServer/0";
const DEFAULT_LINE_URL: &str =
    "https://services.arcgis.com/HRPe58bUyBqyyiCt/arcgis/rest/services/RedlineLines/FeatureServer/0";
const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

/// Engine behavior flags.
#[derive(Debug, Clone, Copy)]
pub struct RedlineConfig {
    /// Global kill-switch for direct-manipulation editing. When off,
    /// `start_editing` is refused; everything else still works.
    pub editing_enabled: bool,
}

impl Default for RedlineConfig {
    fn default() -> Self {
        Self { editing_enabled: true }
    }
}

impl RedlineConfig {
    /// Load from environment variables, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self { editing_enabled: env_parse("REDLINE_EDITING_ENABLED", true) }
    }
}

/// Feature-service endpoints and HTTP tuning for the store client.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Endpoint for the point redline collection.
    pub point_url: String,
    /// Endpoint for the line redline collection.
    pub line_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            point_url: DEFAULT_POINT_URL.to_owned(),
            line_url: DEFAULT_LINE_URL.to_owned(),
            timeout: Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS),
        }
    }
}

impl StoreConfig {
    /// Load from environment variables, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            point_url: std::env::var("REDLINE_POINT_URL").unwrap_or_else(|_| DEFAULT_POINT_URL.to_owned()),
            line_url: std::env::var("REDLINE_LINE_URL").unwrap_or_else(|_| DEFAULT_LINE_URL.to_owned()),
            timeout: Duration::from_millis(env_parse("REDLINE_HTTP_TIMEOUT_MS", DEFAULT_HTTP_TIMEOUT_MS)),
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
