use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Canonical timezone for deriving domain dates from instants.
/// The Casablanca Stock Exchange trades on Morocco local time.
pub const MARKET_TZ: Tz = chrono_tz::Africa::Casablanca;

/// Converts a UTC instant to a calendar date in the given timezone.
pub fn market_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Today's date in the market timezone.
/// Equivalent to `market_date_from_utc(Utc::now(), MARKET_TZ)`.
pub fn market_date_today() -> NaiveDate {
    market_date_from_utc(Utc::now(), MARKET_TZ)
}

/// Parses the date formats found in brokerage exports.
///
/// Priority: ISO `YYYY-MM-DD`, then `DD/MM/YY` or `DD/MM/YYYY` (two-digit
/// years are assumed to be 2000+), then a couple of free-form fallbacks.
/// Dates that are lexically well-formed but logically impossible
/// (`31/02/2023`, `2023-13-01`) are rejected.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    let slash_parts: Vec<&str> = trimmed.split('/').collect();
    if slash_parts.len() == 3 {
        let day: u32 = slash_parts[0].trim().parse().ok()?;
        let month: u32 = slash_parts[1].trim().parse().ok()?;
        let mut year: i32 = slash_parts[2].trim().parse().ok()?;
        if year < 100 {
            year += 2000;
        }
        // from_ymd_opt rejects logically impossible dates (e.g. Feb 31)
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    // Free-form fallbacks seen in older exports
    for format in ["%d-%m-%Y", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    None
}
