//! Calendar helpers: date parsing and whole-year age arithmetic

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Parse a birth date.
///
/// Accepts a plain `YYYY-MM-DD` date or an RFC 3339 timestamp, in which case
/// only the date part is kept. Returns `None` for anything that is not a real
/// calendar date (e.g. `2023-02-30`).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Today's date in UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Whole calendar years elapsed from `earlier` to `later`.
///
/// The plain year difference is reduced by one when `later`'s month/day falls
/// strictly before `earlier`'s. The result is negative when `later` precedes
/// `earlier`.
pub fn age_difference_in_years(earlier: NaiveDate, later: NaiveDate) -> i32 {
    let mut years = later.year() - earlier.year();
    if (later.month(), later.day()) < (earlier.month(), earlier.day()) {
        years -= 1;
    }
    years
}
