//! ODF data type conversions (DateTime, time of day).
//!
//! This module converts the ISO 8601 strings found in `office:date-value`
//! attributes and the displayed text of time cells into chrono values.

use crate::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

// ============================================================================
// DATETIME CONVERSION
// ============================================================================

/// DateTime data type conversion utilities
///
/// Converts ODF date-values (ISO 8601 date or date-time) into
/// `chrono::NaiveDateTime`.
pub struct DateTimeOdf;

impl DateTimeOdf {
    /// Decode an ODF date-value to a calendar date-time
    ///
    /// A plain date decodes to midnight. A value carrying a UTC offset keeps
    /// its wall-clock time; the offset itself is discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use odsgrid::odf::datatype::DateTimeOdf;
    ///
    /// let dt = DateTimeOdf::decode("2024-01-31T15:30:00").unwrap();
    /// assert_eq!(dt.to_string(), "2024-01-31 15:30:00");
    ///
    /// let midnight = DateTimeOdf::decode("2024-01-31").unwrap();
    /// assert_eq!(midnight.to_string(), "2024-01-31 00:00:00");
    /// ```
    pub fn decode(data: &str) -> Result<NaiveDateTime> {
        let data = data.trim();

        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(data, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(naive_dt);
        }

        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(data, "%Y-%m-%dT%H:%M") {
            return Ok(naive_dt);
        }

        if let Ok(date) = NaiveDate::parse_from_str(data, "%Y-%m-%d") {
            return Ok(date.and_time(NaiveTime::MIN));
        }

        // Handle 'Z' suffix (UTC timezone)
        let normalized = match data.strip_suffix('Z') {
            Some(rest) => format!("{}+00:00", rest),
            None => data.to_string(),
        };
        if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
            return Ok(dt.naive_local());
        }

        Err(crate::Error::InvalidFormat(format!(
            "Failed to parse ODF datetime '{}'",
            data
        )))
    }
}

// ============================================================================
// TIME OF DAY CONVERSION
// ============================================================================

/// Time-of-day conversion utilities
///
/// Time cells are decoded from their displayed text, which follows the
/// document's number format rather than ISO 8601.
pub struct TimeOfDay;

const TIME_FORMATS: &[&str] = &[
    "%H:%M:%S%.f",
    "%H:%M",
    "%I:%M:%S%.f %p",
    "%I:%M:%S %p",
    "%I:%M %p",
];

impl TimeOfDay {
    /// Decode displayed text to a time of day
    ///
    /// Accepts 24-hour `HH:MM[:SS[.fff]]`, 12-hour forms with an AM/PM
    /// marker, or a full date-time whose time part is taken.
    ///
    /// # Examples
    ///
    /// ```
    /// use odsgrid::odf::datatype::TimeOfDay;
    /// use chrono::NaiveTime;
    ///
    /// assert_eq!(
    ///     TimeOfDay::decode("16:25:30").unwrap(),
    ///     NaiveTime::from_hms_opt(16, 25, 30).unwrap()
    /// );
    /// assert_eq!(
    ///     TimeOfDay::decode("04:25 PM").unwrap(),
    ///     NaiveTime::from_hms_opt(16, 25, 0).unwrap()
    /// );
    /// ```
    pub fn decode(data: &str) -> Result<NaiveTime> {
        let data = data.trim();

        for format in TIME_FORMATS {
            if let Ok(time) = NaiveTime::parse_from_str(data, format) {
                return Ok(time);
            }
        }

        if let Ok(dt) = DateTimeOdf::decode(data) {
            return Ok(dt.time());
        }

        Err(crate::Error::InvalidFormat(format!(
            "Failed to parse time of day '{}'",
            data
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_datetime_decode() {
        let dt = DateTimeOdf::decode("2024-01-31T15:30:00").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 1, 31));
        assert_eq!((dt.hour(), dt.minute()), (15, 30));

        let dt = DateTimeOdf::decode("2024-01-31T15:30:00.250").unwrap();
        assert_eq!(dt.nanosecond(), 250_000_000);

        let dt = DateTimeOdf::decode("1999-12-31").unwrap();
        assert_eq!(dt.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_datetime_decode_with_offset_keeps_wall_clock() {
        let dt = DateTimeOdf::decode("2024-01-31T15:30:00+01:00").unwrap();
        assert_eq!(dt.hour(), 15);

        let dt = DateTimeOdf::decode("2024-01-31T15:30:00Z").unwrap();
        assert_eq!(dt.hour(), 15);
    }

    #[test]
    fn test_datetime_decode_rejects_garbage() {
        assert!(DateTimeOdf::decode("yesterday").is_err());
        assert!(DateTimeOdf::decode("2024-13-01").is_err());
        assert!(DateTimeOdf::decode("").is_err());
    }

    #[test]
    fn test_time_of_day_decode() {
        assert_eq!(
            TimeOfDay::decode("09:05").unwrap(),
            NaiveTime::from_hms_opt(9, 5, 0).unwrap()
        );
        assert_eq!(
            TimeOfDay::decode("23:59:59.5").unwrap(),
            NaiveTime::from_hms_milli_opt(23, 59, 59, 500).unwrap()
        );
        assert_eq!(
            TimeOfDay::decode("12:00:00 AM").unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap()
        );
        assert_eq!(
            TimeOfDay::decode("2024-01-31T07:45:00").unwrap(),
            NaiveTime::from_hms_opt(7, 45, 0).unwrap()
        );
    }

    #[test]
    fn test_time_of_day_decode_rejects_garbage() {
        assert!(TimeOfDay::decode("noon").is_err());
        assert!(TimeOfDay::decode("25:00").is_err());
    }
}
