//! Parser for the AMFI `NAVAll.txt` listing
//!
//! The listing is line oriented. Data rows start with the numeric scheme code
//! and carry `;`-separated fields:
//!
//! ```text
//! Scheme Code;ISIN Div Payout/ISIN Growth;ISIN Div Reinvestment;Scheme Name;Net Asset Value;Date
//! 119551;INF209KA12Z1;INF209KA13Z9;Aditya Birla Sun Life Banking & PSU Debt Fund;104.4267;17-Oct-2026
//! ```
//!
//! Anything that does not start with a digit (headers, fund house names,
//! blank separators) is ignored.

use tracing::{debug, warn};

use super::PriceMap;

/// Field index of the scheme name
const NAME_FIELD: usize = 3;

/// Field index of the net asset value
const PRICE_FIELD: usize = 4;

/// Field delimiter used by the listing
const DELIMITER: char = ';';

/// Why a candidate data row was left out of the mapping
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The row has fewer fields than the name and price columns need
    MissingFields { found: usize },
    /// The price column is not a number (e.g. `N.A.`)
    InvalidPrice { name: String, raw: String },
    /// The price parsed but is negative or not finite
    OutOfRange { name: String, value: f64 },
}

/// A data row that was skipped, with its 1-based line number
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub line_number: usize,
    pub reason: SkipReason,
}

/// Result of parsing a listing: the prices plus every recoverable skip
#[derive(Debug, Clone, Default)]
pub struct ParsedNav {
    pub prices: PriceMap,
    pub skipped: Vec<SkippedRecord>,
}

/// Returns true for lines that begin with at least one ASCII digit
fn is_data_line(line: &str) -> bool {
    line.starts_with(|c: char| c.is_ascii_digit())
}

/// Extracts `(name, price)` from a data line
fn parse_record(line: &str) -> Result<(String, f64), SkipReason> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() <= PRICE_FIELD {
        return Err(SkipReason::MissingFields {
            found: fields.len(),
        });
    }

    let name = fields[NAME_FIELD].to_string();
    let raw = fields[PRICE_FIELD];
    let value: f64 = raw.trim().parse().map_err(|_| SkipReason::InvalidPrice {
        name: name.clone(),
        raw: raw.to_string(),
    })?;

    if !value.is_finite() || value < 0.0 {
        return Err(SkipReason::OutOfRange { name, value });
    }

    Ok((name, value))
}

/// Parses the listing lines into a mapping, keeping a report of skipped rows
///
/// Later rows overwrite earlier rows with the same scheme name. Malformed data
/// rows are logged and skipped; they never fail the whole parse.
pub fn parse_lines<I, S>(lines: I) -> ParsedNav
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedNav::default();

    for (index, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        if !is_data_line(line) {
            continue;
        }

        match parse_record(line) {
            Ok((name, value)) => {
                parsed.prices.insert(name, value);
            }
            Err(reason) => {
                let line_number = index + 1;
                match &reason {
                    SkipReason::MissingFields { found } => {
                        warn!(line_number, found, "Skipping record with too few fields")
                    }
                    SkipReason::InvalidPrice { name, raw } => {
                        warn!(line_number, %name, %raw, "No price for scheme")
                    }
                    SkipReason::OutOfRange { name, value } => {
                        warn!(line_number, %name, value, "Price out of range for scheme")
                    }
                }
                parsed.skipped.push(SkippedRecord {
                    line_number,
                    reason,
                });
            }
        }
    }

    debug!(
        records = parsed.prices.len(),
        skipped = parsed.skipped.len(),
        "Parsed NAV listing"
    );
    parsed
}

/// Parses the listing lines into a mapping, discarding the skip report
pub fn parse<I, S>(lines: I) -> PriceMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_lines(lines).prices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_mixed_records() {
        let lines = [
            "header",
            "123;A;B;Fund One;12.50",
            "456;C;D;Fund Two;not_a_number",
        ];

        let parsed = parse_lines(lines);

        assert_eq!(parsed.prices.len(), 1);
        assert_eq!(parsed.prices.get("Fund One"), Some(&12.5));
        assert_eq!(
            parsed.skipped,
            vec![SkippedRecord {
                line_number: 3,
                reason: SkipReason::InvalidPrice {
                    name: "Fund Two".to_string(),
                    raw: "not_a_number".to_string(),
                },
            }]
        );
    }

    #[test]
    fn test_non_data_lines_add_nothing() {
        let lines = [
            "",
            "Scheme Code;ISIN Div Payout/ ISIN Growth;ISIN Div Reinvestment;Scheme Name;Net Asset Value;Date",
            "Open Ended Schemes(Debt Scheme - Banking and PSU Fund)",
            "Aditya Birla Sun Life Mutual Fund",
            " 123;A;B;Leading Space;1.0",
            "x1;A;B;Letter First;2.0",
            "\r",
        ];

        let parsed = parse_lines(lines);

        assert!(parsed.prices.is_empty());
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_duplicate_names_keep_last_value() {
        let lines = [
            "1;A;B;Fund One;10.0",
            "2;A;B;Fund Two;20.0",
            "3;A;B;Fund One;30.0",
        ];

        let prices = parse(lines);

        assert_eq!(prices.len(), 2);
        assert_eq!(prices["Fund One"], 30.0);
        assert_eq!(prices["Fund Two"], 20.0);
    }

    #[test]
    fn test_invalid_later_duplicate_keeps_earlier_value() {
        let lines = ["1;A;B;Fund One;10.0", "2;A;B;Fund One;N.A."];

        let prices = parse(lines);

        assert_eq!(prices["Fund One"], 10.0);
    }

    #[test]
    fn test_invalid_price_drops_exactly_one_record() {
        let valid = ["1;A;B;Alpha;1.5", "2;A;B;Beta;2.5", "3;A;B;Gamma;3.5"];
        let broken = ["1;A;B;Alpha;1.5", "2;A;B;Beta;", "3;A;B;Gamma;3.5"];

        let valid_count = parse(valid).len();
        let parsed = parse_lines(broken);

        assert_eq!(parsed.prices.len(), valid_count - 1);
        assert!(!parsed.prices.contains_key("Beta"));
        assert_eq!(parsed.skipped.len(), 1);
    }

    #[test]
    fn test_short_record_is_skipped_instead_of_failing() {
        // Rows with too few fields are tolerated so one bad row cannot lose
        // the rest of the listing.
        let lines = ["1;A;B;Truncated", "2;A;B;Fund Two;20.0", "3"];

        let parsed = parse_lines(lines);

        assert_eq!(parsed.prices.len(), 1);
        assert_eq!(parsed.prices["Fund Two"], 20.0);
        assert_eq!(
            parsed.skipped,
            vec![
                SkippedRecord {
                    line_number: 1,
                    reason: SkipReason::MissingFields { found: 4 },
                },
                SkippedRecord {
                    line_number: 3,
                    reason: SkipReason::MissingFields { found: 1 },
                },
            ]
        );
    }

    #[test]
    fn test_real_listing_rows_with_crlf() {
        let lines = [
            "Scheme Code;ISIN Div Payout/ ISIN Growth;ISIN Div Reinvestment;Scheme Name;Net Asset Value;Date\r",
            "\r",
            "119551;INF209KA12Z1;INF209KA13Z9;Aditya Birla Sun Life Banking & PSU Debt Fund  - DIRECT - IDCW;104.4267;17-Oct-2026\r",
            "120437;-;INF209K01YM2;Aditya Birla Sun Life Corporate Bond Fund - Growth - Direct Plan; 110.9871 ;17-Oct-2026\r",
        ];

        let prices = parse(lines);

        assert_eq!(prices.len(), 2);
        assert_eq!(
            prices["Aditya Birla Sun Life Banking & PSU Debt Fund  - DIRECT - IDCW"],
            104.4267
        );
        assert_eq!(
            prices["Aditya Birla Sun Life Corporate Bond Fund - Growth - Direct Plan"],
            110.9871
        );
    }

    #[test]
    fn test_price_is_last_required_field() {
        let prices = parse(["42;A;B;Exactly Five;7.25"]);
        assert_eq!(prices["Exactly Five"], 7.25);
    }

    #[test]
    fn test_non_finite_and_negative_prices_are_skipped() {
        let lines = [
            "1;A;B;Not A Number;NaN",
            "2;A;B;Infinite;inf",
            "3;A;B;Negative;-1.0",
            "4;A;B;Zero;0",
        ];

        let parsed = parse_lines(lines);

        assert_eq!(parsed.prices.len(), 1);
        assert_eq!(parsed.prices["Zero"], 0.0);
        assert_eq!(parsed.skipped.len(), 3);
        assert!(matches!(
            parsed.skipped[2].reason,
            SkipReason::OutOfRange { ref name, .. } if name == "Negative"
        ));
    }

    #[test]
    fn test_exponent_prices_are_accepted() {
        let prices = parse(["1;A;B;Scientific;1.5e2"]);
        assert_eq!(prices["Scientific"], 150.0);
    }

    #[test]
    fn test_empty_input_yields_empty_mapping() {
        let parsed = parse_lines(Vec::<String>::new());
        assert!(parsed.prices.is_empty());
        assert!(parsed.skipped.is_empty());
    }
}
