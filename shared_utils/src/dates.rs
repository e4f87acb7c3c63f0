//! Flexible calendar-date parsing for upstream date keys.
//!
//! Epidemiological feeds are inconsistent about date formats: the history
//! endpoint keys dates as `m/d/yy` without leading zeros, while regional
//! tables use ISO `YYYY-MM-DD`. Both must parse into a real
//! [`NaiveDate`] so that ordering is temporal, not lexical.

use chrono::NaiveDate;
use thiserror::Error;

/// A date string that matched none of the accepted formats.
#[derive(Debug, Error)]
#[error("unrecognized date string: {0}")]
pub struct DateParseError(pub String);

const FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y"];

/// Parses a date string in any of the accepted upstream formats.
pub fn parse_flexible_date(raw: &str) -> Result<NaiveDate, DateParseError> {
    let s = raw.trim();
    for fmt in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }
    Err(DateParseError(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_flexible_date("2020-01-22").unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 22).unwrap()
        );
    }

    #[test]
    fn parses_short_slash_dates_without_leading_zeros() {
        assert_eq!(
            parse_flexible_date("1/22/20").unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 22).unwrap()
        );
        assert_eq!(
            parse_flexible_date("12/31/19").unwrap(),
            NaiveDate::from_ymd_opt(2019, 12, 31).unwrap()
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_flexible_date("yesterday").is_err());
        assert!(parse_flexible_date("").is_err());
    }
}
