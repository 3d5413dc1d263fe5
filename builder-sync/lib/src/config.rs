//! Configuration for the stats source and the fixed file locations.
//!
//! The file locations are relative to the working directory; the CLI is
//! expected to run from the workspace root.

use std::time::Duration;

use tracing::warn;

/// Default stats service (relayscan.io).
pub const DEFAULT_STATS_URL: &str = "https://www.relayscan.io";

/// Per-request timeout for a single day's stats.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Days fetched when no explicit start/end is given.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;

/// Aggregated `key -> blocks` output written by the stats command.
pub const AGGREGATED_OUTPUT_PATH: &str = "builder_aggregated.json";

/// Canonical registry listing rewritten by the regenerate command.
pub const REGISTRY_LISTING_PATH: &str = "mev-builders/src/builders.rs";

/// Registry in JSON form, read by the consistency check.
pub const REGISTRY_JSON_PATH: &str = "mev-builders/data/builders.json";

/// Stats snapshot read by the consistency check.
pub const STATS_SNAPSHOT_PATH: &str = "mev-builders/data/builders_stats.json";

/// Overrides [`DEFAULT_STATS_URL`].
pub const ENV_STATS_URL: &str = "BUILDER_SYNC_STATS_URL";

/// Overrides [`DEFAULT_TIMEOUT`], in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "BUILDER_SYNC_TIMEOUT_SECS";

/// Configuration for fetching daily builder statistics.
///
/// ## Examples
///
/// ```
/// use builder_sync::StatsConfig;
/// use std::time::Duration;
///
/// let config = StatsConfig::new()
///     .base_url("http://localhost:8080")
///     .timeout(Duration::from_secs(2));
///
/// assert_eq!(config.base_url, "http://localhost:8080");
/// assert_eq!(config.lookback_days, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsConfig {
    /// Base URL of the stats service, without a trailing path.
    pub base_url: String,
    /// Timeout applied to each day's request.
    pub timeout: Duration,
    /// Days fetched when the caller gives no explicit range.
    pub lookback_days: u32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_STATS_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

impl StatsConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from defaults plus process environment overrides.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from defaults plus overrides supplied by `lookup`.
    ///
    /// Unparseable overrides are ignored with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_STATS_URL).filter(|url| !url.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!(value = %raw, "ignoring invalid {}", ENV_TIMEOUT_SECS),
            }
        }

        config
    }

    /// Set the stats service base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the default lookback window.
    pub fn lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }
}
