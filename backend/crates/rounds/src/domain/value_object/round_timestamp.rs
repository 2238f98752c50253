//! Round Date/Time Value Objects
//!
//! Wire formats exchanged with the mobile client:
//! - dates as `YYYY-MM-DD`
//! - timestamps as `YYYY-MM-DDTHH:MM:SS` (no fractional seconds, no offset)
//!
//! Parsing is strict: anything else, including trailing characters, is an
//! `InvalidFormat` error.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{RoundsError, RoundsResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Calendar date in `YYYY-MM-DD` form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoundDate(NaiveDate);

impl RoundDate {
    pub fn parse(value: &str) -> RoundsResult<Self> {
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(Self)
            .map_err(|e| RoundsError::InvalidFormat(format!("date {:?}: {}", value, e)))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for RoundDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for RoundDate {
    type Err = RoundsError;

    fn from_str(s: &str) -> RoundsResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RoundDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// Local timestamp in `YYYY-MM-DDTHH:MM:SS` form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoundTimestamp(NaiveDateTime);

impl RoundTimestamp {
    pub fn parse(value: &str) -> RoundsResult<Self> {
        NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
            .map(Self)
            .map_err(|e| RoundsError::InvalidFormat(format!("timestamp {:?}: {}", value, e)))
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Time-of-day component
    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }
}

impl From<NaiveDateTime> for RoundTimestamp {
    fn from(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }
}

impl FromStr for RoundTimestamp {
    type Err = RoundsError;

    fn from_str(s: &str) -> RoundsResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RoundTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATETIME_FORMAT))
    }
}

/// Format a time of day as `HH:MM:SS`
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_parse_and_format() {
        let date = RoundDate::parse("2025-11-03").unwrap();
        assert_eq!(date.date(), NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());
        assert_eq!(date.to_string(), "2025-11-03");
    }

    #[test]
    fn test_date_rejects_other_layouts() {
        for bad in ["03-11-2025", "2025/11/03", "2025-11-03T00:00:00", "2025-13-01", ""] {
            assert!(
                matches!(RoundDate::parse(bad), Err(RoundsError::InvalidFormat(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_timestamp_parse_and_format() {
        let ts: RoundTimestamp = "2025-11-03T14:30:00".parse().unwrap();
        assert_eq!(ts.time(), NaiveTime::from_hms_opt(14, 30, 0).unwrap());
        assert_eq!(ts.to_string(), "2025-11-03T14:30:00");
    }

    #[test]
    fn test_timestamp_rejects_other_layouts() {
        for bad in [
            "2025-11-03 14:30:00",
            "2025-11-03T14:30",
            "2025-11-03T14:30:00.123",
            "2025-11-03T14:30:00Z",
            "2025-11-03",
            "14:30:00",
        ] {
            assert!(RoundTimestamp::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_format_time() {
        assert_eq!(
            format_time(NaiveTime::from_hms_opt(6, 5, 4).unwrap()),
            "06:05:04"
        );
    }
}
