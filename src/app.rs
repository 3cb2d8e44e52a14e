//! Orchestration of the NAV lookup
//!
//! Loads the mapping from the cache when it is fresh, otherwise fetches,
//! parses and caches a new listing, then answers the query.

use std::io::{self, Write};

use thiserror::Error;
use tracing::info;

use crate::cache::{CacheError, CacheLookup, PriceCache};
use crate::config::Config;
use crate::data::{parse_lines, FetchError, NavClient, PriceMap};
use crate::query::{search, write_matches};

/// Errors surfaced to the entry point
#[derive(Debug, Error)]
pub enum AppError {
    /// The listing could not be downloaded
    #[error("could not fetch NAV listing: {0}")]
    Fetch(#[from] FetchError),

    /// The cache file could not be read or written
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Results could not be written to standard output
    #[error("could not write results: {0}")]
    Output(#[from] io::Error),
}

impl AppError {
    /// Process exit code for this error
    ///
    /// Usage errors exit with 2 through clap before the app runs.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Fetch(_) => 3,
            AppError::Cache(_) => 4,
            AppError::Output(_) => 5,
        }
    }
}

/// Downloads and parses a fresh listing, then replaces the cache file
pub async fn refresh(config: &Config, cache: &PriceCache) -> Result<PriceMap, AppError> {
    let client = NavClient::from_config(config)?;
    let lines = client.fetch_lines().await?;

    let parsed = parse_lines(&lines);
    info!(
        records = parsed.prices.len(),
        skipped = parsed.skipped.len(),
        "Refreshed NAV listing"
    );

    cache.save(&parsed.prices)?;
    Ok(parsed.prices)
}

/// Returns the cached mapping when fresh, otherwise refreshes it
///
/// A failed fetch is reported as an error; expired cache content is never
/// used as a fallback.
pub async fn load_prices(config: &Config) -> Result<PriceMap, AppError> {
    let cache = PriceCache::from_config(config);

    if config.force_refresh {
        info!("Refresh requested, ignoring cache");
    } else {
        match cache.lookup()? {
            CacheLookup::Fresh { prices, .. } => return Ok(prices),
            CacheLookup::Stale { .. } | CacheLookup::Missing => {}
        }
    }

    refresh(config, &cache).await
}

/// Runs one lookup, writing matches to `out`
///
/// # Returns
/// * `Ok(n)` with the number of matching funds (zero is a valid result)
/// * `Err(AppError)` if the listing could not be loaded or output failed
pub async fn run<W: Write>(config: &Config, query: &str, out: &mut W) -> Result<usize, AppError> {
    let prices = load_prices(config).await?;

    let matches = search(&prices, query);
    info!(query, matches = matches.len(), "Query complete");

    write_matches(out, &matches)?;
    out.flush()?;
    Ok(matches.len())
}
