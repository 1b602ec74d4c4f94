//! Cell parsing for canonical files.

use chrono::{NaiveDate, NaiveDateTime};

/// Date-only formats accepted in `TRADE_DATE`, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y"];

/// Date-time formats whose time component is discarded.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Spellings of a missing value in exported files.
const NULL_TOKENS: &[&str] = &["", "NaN", "nan", "NAN", "NA", "N/A", "#N/A", "null", "NULL", "None"];

/// Parse a trade date. Slash dates with the year last are month-first.
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let s = cell.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// A metric cell that is neither a number nor a null token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotANumber;

/// Parse a metric cell. `Ok(None)` is a missing value; NaN and infinities
/// count as missing so series statistics stay finite.
pub fn parse_metric(cell: &str) -> Result<Option<f64>, NotANumber> {
    let s = cell.trim();
    if NULL_TOKENS.contains(&s) {
        return Ok(None);
    }
    match s.parse::<f64>() {
        Ok(v) if !v.is_finite() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(NotANumber),
    }
}
