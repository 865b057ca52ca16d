//! Tolerant parser for locale-ambiguous monetary strings.
//!
//! Brokerage exports mix decimal conventions freely: "1,010.00",
//! "1.010,00", "-1 010,00 MAD" all appear in the same account history.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a monetary string with an unknown decimal convention.
///
/// Returns `None` for an empty or unparseable input. A bare "-" (a common
/// placeholder for zero in statements) parses as zero.
///
/// When both separators appear, whichever occurs last is the decimal
/// point and the other is stripped as a thousands separator. A lone comma
/// followed by exactly three digits is read as a thousands separator;
/// this is deliberately lossy for inputs like "1,234" where both readings
/// are plausible.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    if raw.trim().is_empty() {
        return None;
    }

    let mut clean = raw.trim().to_string();
    strip_currency_marker(&mut clean);
    let clean = clean.trim();
    if clean.is_empty() || clean == "-" {
        return Some(Decimal::ZERO);
    }

    let last_comma = clean.rfind(',');
    let last_period = clean.rfind('.');

    let normalized = match (last_comma, last_period) {
        (Some(comma), Some(period)) if comma > period => {
            // European style: 1.234,56 -> 1234.56
            let no_thousands = clean.replace('.', "");
            replace_last_comma(&no_thousands)
        }
        (Some(_), Some(_)) => {
            // US style: 1,234.56 -> 1234.56
            clean.replace(',', "")
        }
        (Some(comma), None) => {
            // Single separator: thousands if exactly 3 digits follow,
            // decimal otherwise.
            let after = &clean[comma + 1..];
            let before_has_digit = clean[..comma].chars().any(|c| c.is_ascii_digit());
            if after.len() == 3 && after.chars().all(|c| c.is_ascii_digit()) && before_has_digit {
                clean.replace(',', "")
            } else {
                replace_last_comma(clean)
            }
        }
        _ => clean.to_string(),
    };

    // Strip any residual non-numeric character (spaces, quotes, symbols)
    let digits: String = normalized
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
        .collect();

    Decimal::from_str(&digits).ok()
}

/// Removes every case-insensitive "MAD" marker from the string.
fn strip_currency_marker(value: &mut String) {
    while let Some(idx) = value
        .as_bytes()
        .windows(3)
        .position(|w| w.eq_ignore_ascii_case(b"mad"))
    {
        value.replace_range(idx..idx + 3, "");
    }
}

/// Replaces the last comma with a period and drops any earlier ones.
fn replace_last_comma(value: &str) -> String {
    match value.rfind(',') {
        Some(idx) => {
            let mut out = value[..idx].replace(',', "");
            out.push('.');
            out.push_str(&value[idx + 1..]);
            out
        }
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_us_style() {
        assert_eq!(parse_amount("1,010.00"), Some(dec!(1010.00)));
        assert_eq!(parse_amount("-1,234,567.89"), Some(dec!(-1234567.89)));
    }

    #[test]
    fn parses_european_style() {
        assert_eq!(parse_amount("1.010,00"), Some(dec!(1010.00)));
        assert_eq!(parse_amount("-1.234.567,89"), Some(dec!(-1234567.89)));
    }

    #[test]
    fn strips_currency_marker() {
        assert_eq!(parse_amount("-1,010.00 MAD"), Some(dec!(-1010.00)));
        assert_eq!(parse_amount("250 mad"), Some(dec!(250)));
    }

    #[test]
    fn lone_comma_with_three_digits_is_thousands() {
        assert_eq!(parse_amount("1,000"), Some(dec!(1000)));
        assert_eq!(parse_amount("12,345"), Some(dec!(12345)));
    }

    #[test]
    fn lone_comma_otherwise_is_decimal() {
        assert_eq!(parse_amount("10,5"), Some(dec!(10.5)));
        assert_eq!(parse_amount("0,25"), Some(dec!(0.25)));
        assert_eq!(parse_amount("1,2345"), Some(dec!(1.2345)));
    }

    #[test]
    fn placeholder_dash_is_zero() {
        assert_eq!(parse_amount("-"), Some(Decimal::ZERO));
        assert_eq!(parse_amount(" - "), Some(Decimal::ZERO));
    }

    #[test]
    fn empty_and_garbage_are_none() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
        assert_eq!(parse_amount("n/a"), None);
    }

    #[test]
    fn ignores_embedded_spaces_and_quotes() {
        assert_eq!(parse_amount("\"1 010,50\""), Some(dec!(1010.50)));
    }
}
