#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use tudu::libs::formatter::{format_duration, format_secs, format_timestamp, parse_timestamp};
    use tudu::libs::task::Priority;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(&Duration::minutes(0)), "00:00");
        assert_eq!(format_duration(&Duration::minutes(65)), "01:05");
        assert_eq!(format_duration(&(Duration::hours(10) + Duration::minutes(30))), "10:30");
        // Negative durations clamp to zero
        assert_eq!(format_duration(&Duration::minutes(-5)), "00:00");
    }

    #[test]
    fn test_format_secs() {
        assert_eq!(format_secs(0), "00:00");
        assert_eq!(format_secs(3_600), "01:00");
        assert_eq!(format_secs(5_400), "01:30");
    }

    #[test]
    fn test_format_timestamp_hides_midnight_time() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        assert_eq!(format_timestamp(&date.and_hms_opt(0, 0, 0)), "2026-08-25");
        assert_eq!(format_timestamp(&date.and_hms_opt(9, 30, 0)), "2026-08-25 09:30");
        assert_eq!(format_timestamp(&None), "-");
    }

    #[test]
    fn test_parse_timestamp() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        assert_eq!(parse_timestamp("2026-08-25"), date.and_hms_opt(0, 0, 0));
        assert_eq!(parse_timestamp("2026-08-25 09:30"), date.and_hms_opt(9, 30, 0));
        assert_eq!(parse_timestamp("  2026-08-25  "), date.and_hms_opt(0, 0, 0));
        assert_eq!(parse_timestamp("not-a-date"), None);
        assert_eq!(parse_timestamp("2026-13-40"), None);
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(Priority::default(), Priority::Medium);
        assert!("critical".parse::<Priority>().is_err());
    }
}
