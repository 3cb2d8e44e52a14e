//! Cache module for storing the parsed NAV listing on disk
//!
//! The listing is stored as a plain JSON object of fund name to NAV. Freshness
//! is not recorded inside the file: it comes from the file's modification
//! time, compared against a staleness threshold.

mod store;

pub use store::{is_fresh, CacheError, CacheLookup, PriceCache};
