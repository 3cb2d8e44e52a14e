//! NAV data source for the AMFI lookup
//!
//! This module fetches the published NAV listing and turns it into a
//! [`PriceMap`] of fund name to net asset value.

pub mod fetch;
pub mod parser;

pub use fetch::{FetchError, NavClient};
pub use parser::{parse, parse_lines, ParsedNav, SkipReason, SkippedRecord};

use std::collections::BTreeMap;

/// Fund name to NAV for the whole published listing
///
/// This is the unit of both caching and querying. It is always replaced as a
/// whole on refresh, never merged.
pub type PriceMap = BTreeMap<String, f64>;
