//! Date and duration formatting utilities.
//!
//! Pure helpers for turning timestamps and durations into the strings shown
//! in tables and messages. Durations use the "HH:MM" pattern; negative
//! values are clamped to zero.

use chrono::{Duration, NaiveDateTime, NaiveTime};

/// Formats a duration as "HH:MM", clamping negative values to "00:00".
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;

    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

/// Formats accumulated seconds as "HH:MM".
pub fn format_secs(secs: i64) -> String {
    format_duration(&Duration::seconds(secs))
}

/// Formats an optional timestamp for table display.
///
/// Midnight timestamps show the date only, since a midnight due time means
/// "all-day" throughout the application.
pub fn format_timestamp(timestamp: &Option<NaiveDateTime>) -> String {
    match timestamp {
        Some(dt) if dt.time() == NaiveTime::MIN => dt.format("%Y-%m-%d").to_string(),
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// Parses user date input: "YYYY-MM-DD" (midnight, i.e. all-day) or
/// "YYYY-MM-DD HH:MM".
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        return Some(dt);
    }
    chrono::NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
