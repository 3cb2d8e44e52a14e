//! Command-line interface parsing for the AMFI NAV lookup
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! a [`Config`] for the rest of the application.

use std::path::PathBuf;
use std::time::Duration as StdDuration;

use chrono::Duration;
use clap::Parser;

use crate::config::Config;

/// AMFI NAV lookup - search the daily mutual fund NAV listing
#[derive(Parser, Debug)]
#[command(name = "amfinav")]
#[command(about = "Search the daily AMFI mutual fund NAV listing")]
#[command(version)]
pub struct Cli {
    /// Text to look for in fund names (case, spaces and hyphens are ignored)
    ///
    /// Examples:
    ///   amfinav "hdfc top 100"
    ///   amfinav parag-parikh
    pub query: String,

    /// URL of the NAV listing
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Cache file location [default: ~/.amfi.json]
    #[arg(long, value_name = "PATH")]
    pub cache_path: Option<PathBuf>,

    /// Maximum cache age in seconds before the listing is fetched again
    #[arg(long, value_name = "SECS")]
    pub max_age: Option<u32>,

    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Ignore the cache and fetch the listing again
    #[arg(short, long)]
    pub refresh: bool,

    /// Increase log output (-v warnings, -vv progress, -vvv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Builds the runtime configuration, starting from the defaults
    pub fn to_config(&self) -> Config {
        let mut config = Config::default();
        if let Some(url) = &self.url {
            config.url = url.clone();
        }
        if let Some(path) = &self.cache_path {
            config.cache_path = path.clone();
        }
        if let Some(secs) = self.max_age {
            config.staleness = Duration::seconds(i64::from(secs));
        }
        if let Some(secs) = self.timeout {
            config.timeout = StdDuration::from_secs(secs);
        }
        config.force_refresh = self.refresh;
        config
    }

    /// Log filter directive for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "error",
            1 => "warn",
            2 => "info",
            _ => "debug",
        }
    }
}
