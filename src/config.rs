//! Runtime configuration for the NAV lookup
//!
//! Every component receives the values it needs from a [`Config`] instead of
//! reading globals, so tests can point the tool at a local server and a
//! temporary cache file.

use std::path::PathBuf;
use std::time::Duration as StdDuration;

use chrono::Duration;
use directories::BaseDirs;

/// Daily NAV listing published by AMFI
pub const DEFAULT_NAV_URL: &str = "https://www.amfiindia.com/spages/NAVAll.txt";

/// Name of the cache file placed in the home directory
pub const CACHE_FILE_NAME: &str = ".amfi.json";

/// Maximum cache age in seconds, a little under one day so a daily run
/// never drifts past a full day of staleness
pub const DEFAULT_STALENESS_SECS: i64 = 84_600;

/// Upper bound on the whole HTTP request
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings shared by the fetcher, cache store and orchestrator
#[derive(Debug, Clone)]
pub struct Config {
    /// Endpoint serving the semicolon-delimited NAV listing
    pub url: String,
    /// Location of the JSON cache file
    pub cache_path: PathBuf,
    /// Cache files older than this are refetched
    pub staleness: Duration,
    /// Timeout applied to the HTTP request
    pub timeout: StdDuration,
    /// Skip the cache lookup and always refetch
    pub force_refresh: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_NAV_URL.to_string(),
            cache_path: default_cache_path(),
            staleness: Duration::seconds(DEFAULT_STALENESS_SECS),
            timeout: StdDuration::from_secs(DEFAULT_TIMEOUT_SECS),
            force_refresh: false,
        }
    }
}

/// Returns `~/.amfi.json`, or `.amfi.json` in the working directory when no
/// home directory can be determined
pub fn default_cache_path() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(CACHE_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CACHE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_published_constants() {
        let config = Config::default();
        assert_eq!(config.url, "https://www.amfiindia.com/spages/NAVAll.txt");
        assert_eq!(config.staleness, Duration::seconds(84_600));
        assert_eq!(config.timeout, StdDuration::from_secs(30));
        assert!(!config.force_refresh);
    }

    #[test]
    fn test_default_cache_path_ends_with_file_name() {
        let path = default_cache_path();
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some(CACHE_FILE_NAME)
        );
    }

    #[test]
    fn test_staleness_is_shorter_than_a_day() {
        assert!(Duration::seconds(DEFAULT_STALENESS_SECS) < Duration::days(1));
    }
}
