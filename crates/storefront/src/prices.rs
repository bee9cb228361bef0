//! Prices

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::warn;

/// Parses a backend money string such as `"kr 1,000.00"` into an amount.
///
/// Everything other than digits, `.` and `-` is discarded first. A value that
/// still does not parse is treated as zero.
pub fn parse_price(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned).unwrap_or_else(|error| {
        warn!(raw, %error, "unparsable price, treating as zero");

        Decimal::ZERO
    })
}
