//! Time normalizer.
//!
//! Validates the textual birth date and time and reshapes them into the
//! date + fractional hour pair a provider turns into a [`TimeReference`].
//! No timezone adjustment happens here: input is taken as UT.

use crate::ephemeris::{PositionProvider, TimeReference};
use crate::error::EngineError;
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

/// Time of day assumed when none is given
pub const DEFAULT_TIME: &str = "12:00";

lazy_static::lazy_static! {
    static ref DATE_RE: Regex = Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("valid date regex");
    static ref TIME_RE: Regex = Regex::new(r"^(\d{1,2}):(\d{2})$").expect("valid time regex");
}

/// A validated birth date and clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthMoment {
    pub date: NaiveDate,
    pub hour: u32,
    pub minute: u32,
}

impl BirthMoment {
    /// hour + minute / 60
    pub fn fractional_hour(&self) -> f64 {
        self.hour as f64 + self.minute as f64 / 60.0
    }
}

/// Parse `YYYY-MM-DD` into a calendar date. Month and day may omit the
/// leading zero; impossible dates such as `2023-02-29` are rejected.
pub fn parse_date(text: &str) -> Result<NaiveDate, EngineError> {
    let invalid = || EngineError::InvalidDateFormat(text.to_string());
    let caps = DATE_RE.captures(text.trim()).ok_or_else(invalid)?;

    let year: i32 = caps[1].parse().map_err(|_| invalid())?;
    let month: u32 = caps[2].parse().map_err(|_| invalid())?;
    let day: u32 = caps[3].parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Parse `HH:MM` (24-hour) into hour and minute. Empty text means noon.
pub fn parse_time(text: &str) -> Result<(u32, u32), EngineError> {
    let trimmed = text.trim();
    let effective = if trimmed.is_empty() { DEFAULT_TIME } else { trimmed };

    let invalid = || EngineError::InvalidTimeFormat(text.to_string());
    let caps = TIME_RE.captures(effective).ok_or_else(invalid)?;

    let hour: u32 = caps[1].parse().map_err(|_| invalid())?;
    let minute: u32 = caps[2].parse().map_err(|_| invalid())?;

    // Range check only; the NaiveTime itself is not kept
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)?;
    Ok((hour, minute))
}

/// Validate both inputs. The date is checked first so a request with two
/// bad fields reports the date.
pub fn parse_moment(date_text: &str, time_text: Option<&str>) -> Result<BirthMoment, EngineError> {
    let date = parse_date(date_text)?;
    let (hour, minute) = parse_time(time_text.unwrap_or(""))?;
    Ok(BirthMoment { date, hour, minute })
}

/// Full normalization: parse, then delegate scalar construction to the
/// provider's time-conversion entry point.
pub fn normalize<P: PositionProvider + ?Sized>(
    date_text: &str,
    time_text: Option<&str>,
    provider: &P,
) -> Result<TimeReference, EngineError> {
    let moment = parse_moment(date_text, time_text)?;
    Ok(provider.julian_day(moment.date, moment.fractional_hour()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::FixedPositions;

    #[test]
    fn test_parse_date_valid() {
        let date = parse_date("1985-11-21").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1985, 11, 21).unwrap());
        assert!(parse_date("2024-2-9").is_ok());
        assert!(parse_date(" 2024-02-29 ").is_ok()); // leap year
    }

    #[test]
    fn test_parse_date_invalid() {
        for bad in ["2024-13-40", "2023-02-29", "2024/01/01", "24-01-01", "abcd-ef-gh", "", "2024-01"] {
            assert_eq!(
                parse_date(bad),
                Err(EngineError::InvalidDateFormat(bad.to_string())),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_parse_time_default_noon() {
        assert_eq!(parse_time("").unwrap(), (12, 0));
        assert_eq!(parse_time("   ").unwrap(), (12, 0));
    }

    #[test]
    fn test_parse_time_bounds() {
        assert_eq!(parse_time("00:00").unwrap(), (0, 0));
        assert_eq!(parse_time("23:59").unwrap(), (23, 59));
        assert_eq!(parse_time("7:05").unwrap(), (7, 5));
        for bad in ["24:00", "12:60", "1200", "12:5", "ab:cd", "-1:00"] {
            assert!(matches!(parse_time(bad), Err(EngineError::InvalidTimeFormat(_))), "{bad}");
        }
    }

    #[test]
    fn test_fractional_hour() {
        let moment = parse_moment("2000-01-01", Some("08:30")).unwrap();
        assert_eq!(moment.fractional_hour(), 8.5);
        let noon = parse_moment("2000-01-01", None).unwrap();
        assert_eq!(noon.fractional_hour(), 12.0);
    }

    #[test]
    fn test_date_error_wins_over_time_error() {
        let err = parse_moment("2024-13-40", Some("99:99")).unwrap_err();
        assert!(matches!(err, EngineError::InvalidDateFormat(_)));
    }

    #[test]
    fn test_normalize_delegates_to_provider() {
        let provider = FixedPositions::new();
        let t = normalize("2000-01-01", Some("12:00"), &provider).unwrap();
        assert!((t.julian_day() - 2_451_545.0).abs() < 1e-9);
    }
}
