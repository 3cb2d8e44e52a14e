//! Substring search over the NAV mapping
//!
//! Queries and fund names are compared after normalization, so `"abcfund"`
//! finds `"ABC - Fund Name"`.

use std::io::{self, Write};

use crate::data::PriceMap;

/// Width of the left-justified fund name column
pub const NAME_WIDTH: usize = 50;

/// Width of the right-justified NAV column
pub const PRICE_WIDTH: usize = 20;

/// Lowercases `s` and strips every space and hyphen
pub fn normalize(s: &str) -> String {
    s.to_lowercase().replace([' ', '-'], "")
}

/// Returns every `(name, price)` whose normalized name contains the
/// normalized query, in mapping order
///
/// An empty result is not an error. A query that normalizes to the empty
/// string matches every entry.
pub fn search<'a>(prices: &'a PriceMap, raw_query: &str) -> Vec<(&'a str, f64)> {
    let query = normalize(raw_query);
    prices
        .iter()
        .filter(|(name, _)| normalize(name).contains(&query))
        .map(|(name, price)| (name.as_str(), *price))
        .collect()
}

/// Renders a price the way the listing reads: whole numbers keep one decimal
/// place (`100.0`), everything else uses the shortest exact form (`12.5`)
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 && price.abs() < 1e16 {
        format!("{:.1}", price)
    } else {
        price.to_string()
    }
}

/// Formats one result line: name padded to 50 columns, a space, then the
/// price right-aligned in 20 columns. Longer names are not truncated.
pub fn format_match(name: &str, price: f64) -> String {
    format!(
        "{:<name_width$} {:>price_width$}",
        name,
        format_price(price),
        name_width = NAME_WIDTH,
        price_width = PRICE_WIDTH
    )
}

/// Writes one formatted line per match to `out`
pub fn write_matches<W: Write>(out: &mut W, matches: &[(&str, f64)]) -> io::Result<()> {
    for (name, price) in matches {
        writeln!(out, "{}", format_match(name, *price))?;
    }
    Ok(())
}
