//! Single-file cache for the NAV price mapping
//!
//! Provides a `PriceCache` that persists a [`PriceMap`] as JSON and decides
//! freshness from the file's last-modified time.

use chrono::{DateTime, Duration, Utc};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::data::PriceMap;

/// Errors that can occur when reading or writing the cache file
#[derive(Debug, Error)]
pub enum CacheError {
    /// The file could not be inspected, read or written
    #[error("Cache file {path} is not accessible: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists and is fresh but does not hold a valid mapping
    #[error("Cache file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of looking at the cache file
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// No cache file exists yet
    Missing,
    /// The file is older than the staleness threshold
    Stale { modified_at: DateTime<Utc> },
    /// The file is fresh; its mapping is returned
    Fresh {
        prices: PriceMap,
        modified_at: DateTime<Utc>,
    },
}

impl CacheLookup {
    /// The cached mapping, if the cache was fresh
    pub fn into_prices(self) -> Option<PriceMap> {
        match self {
            CacheLookup::Fresh { prices, .. } => Some(prices),
            CacheLookup::Missing | CacheLookup::Stale { .. } => None,
        }
    }
}

/// Returns true when a file modified at `modified_at` is still usable at `now`
///
/// A file is fresh while its age is strictly below `staleness`. Modification
/// times in the future count as fresh.
pub fn is_fresh(modified_at: DateTime<Utc>, now: DateTime<Utc>, staleness: Duration) -> bool {
    now.signed_duration_since(modified_at) < staleness
}

/// Reads and writes the NAV mapping at a fixed path
///
/// Only one file is involved and nothing guards against concurrent writers:
/// two runs racing past the staleness check both refetch, and the last write
/// wins.
#[derive(Debug, Clone)]
pub struct PriceCache {
    /// Location of the JSON file
    path: PathBuf,
    /// Maximum age before the file is ignored
    staleness: Duration,
}

impl PriceCache {
    /// Creates a cache at `path` that treats files older than `staleness` as stale
    pub fn new(path: impl Into<PathBuf>, staleness: Duration) -> Self {
        Self {
            path: path.into(),
            staleness,
        }
    }

    /// Creates a cache from the path and staleness in `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cache_path.clone(), config.staleness)
    }

    /// Path of the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> CacheError {
        CacheError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Inspects the cache file and reads it if it is fresh
    ///
    /// # Returns
    /// * `Ok(CacheLookup::Missing)` if no file exists
    /// * `Ok(CacheLookup::Stale)` if the file is too old; its content is not read
    /// * `Ok(CacheLookup::Fresh)` with the deserialized mapping
    /// * `Err(CacheError::Corrupt)` if a fresh file does not deserialize
    /// * `Err(CacheError::Io)` for any other filesystem failure
    pub fn lookup(&self) -> Result<CacheLookup, CacheError> {
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No cache file");
                return Ok(CacheLookup::Missing);
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let modified_at: DateTime<Utc> = metadata
            .modified()
            .map_err(|e| self.io_error(e))?
            .into();

        if !is_fresh(modified_at, Utc::now(), self.staleness) {
            info!(path = %self.path.display(), %modified_at, "Cache file is stale");
            return Ok(CacheLookup::Stale { modified_at });
        }

        let file = File::open(&self.path).map_err(|e| self.io_error(e))?;
        let prices: PriceMap =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                if source.is_io() {
                    self.io_error(source.into())
                } else {
                    CacheError::Corrupt {
                        path: self.path.clone(),
                        source,
                    }
                }
            })?;

        info!(
            path = %self.path.display(),
            records = prices.len(),
            "Loaded NAV listing from cache"
        );
        Ok(CacheLookup::Fresh {
            prices,
            modified_at,
        })
    }

    /// Returns the cached mapping when the file exists and is fresh
    pub fn load(&self) -> Result<Option<PriceMap>, CacheError> {
        self.lookup().map(CacheLookup::into_prices)
    }

    /// Writes `prices` to the cache file, replacing any previous content
    ///
    /// Missing parent directories are created.
    pub fn save(&self, prices: &PriceMap) -> Result<(), CacheError> {
        info!(path = %self.path.display(), records = prices.len(), "Writing NAV listing to cache");

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let file = File::create(&self.path).map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, prices).map_err(|e| self.io_error(e.into()))?;
        writer.flush().map_err(|e| self.io_error(e))
    }
}
