//! Display formatting for note timestamps.
//!
//! The browser build prefers `Date.toLocaleDateString` so the output follows
//! the user's locale; this is the fallback used when that is unavailable.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Long month, numeric day and year, two-digit 12-hour time.
pub const CREATED_AT_FORMAT: &str = "%B %-d, %Y, %I:%M %p";

/// Format a timestamp in an arbitrary timezone.
pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format(CREATED_AT_FORMAT).to_string()
}

/// Format a note's creation time in the local timezone.
pub fn format_created_at(at: &DateTime<Utc>) -> String {
    format_timestamp(&at.with_timezone(&Local))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_long_date_and_two_digit_time() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 14, 5, 0).unwrap();
        assert_eq!(format_timestamp(&at), "May 1, 2024, 02:05 PM");
    }

    #[test]
    fn morning_times_use_am() {
        let at = Utc.with_ymd_and_hms(2023, 12, 25, 9, 30, 0).unwrap();
        assert_eq!(format_timestamp(&at), "December 25, 2023, 09:30 AM");
    }
}
