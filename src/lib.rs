//! AMFI NAV lookup library
//!
//! Fetches the daily AMFI net asset value listing, caches it as JSON in the
//! home directory, and answers substring queries against fund names. The
//! modules are exposed for the binary and for integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod query;
