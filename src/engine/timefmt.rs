use chrono::NaiveDate;

/// Format whole seconds as HH:MM:SS (hours grow past two digits if needed).
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Parse a duration typed by the user: either `HH:MM:SS` or a plain number
/// of seconds.
pub fn parse_duration(value: &str) -> Option<u64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(seconds);
    }
    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() != 3 {
        return None;
    }
    let hours: u64 = parts[0].parse().ok()?;
    let minutes: u64 = parts[1].parse().ok()?;
    let seconds: u64 = parts[2].parse().ok()?;
    if minutes > 59 || seconds > 59 {
        return None;
    }
    Some(hours * 3600 + minutes * 60 + seconds)
}

/// Parse the calendar-date prefix of an ISO string (`YYYY-MM-DD` or
/// `YYYY-MM-DD HH:MM:SS`) as a plain calendar date. Going through NaiveDate
/// keeps a date-only string on its own calendar day; routing it through a UTC
/// instant shifts it by a day in western timezones.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let prefix = value.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Calendar-date prefix of an ISO string, if it looks like one.
pub fn date_part(value: &str) -> Option<&str> {
    let prefix = value.get(..10)?;
    parse_calendar_date(prefix).map(|_| prefix)
}

/// Display label for a dated bucket, e.g. "Sun, Jan 4".
pub fn format_bucket_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_zero_and_large_durations() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(59), "00:00:59");
        assert_eq!(format_duration(61), "00:01:01");
        assert_eq!(format_duration(3661), "01:01:01");
        assert_eq!(format_duration(100 * 3600), "100:00:00");
    }

    #[test]
    fn date_only_strings_stay_on_their_calendar_day() {
        // Regression guard: "2026-01-04" must parse as January 4th no matter
        // what timezone the process runs in.
        let date = parse_calendar_date("2026-01-04").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 1, 4).unwrap());
        assert_eq!(format_bucket_date(date), "Sun, Jan 4");
    }

    #[test]
    fn parses_timestamp_prefixes() {
        let date = parse_calendar_date("2025-12-31 23:59:59").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert_eq!(date_part("2025-12-31 23:59:59"), Some("2025-12-31"));
    }

    #[test]
    fn parses_durations_in_both_forms() {
        assert_eq!(parse_duration("90"), Some(90));
        assert_eq!(parse_duration("01:02:03"), Some(3723));
        assert_eq!(parse_duration("100:00:00"), Some(360_000));
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("1:99:00"), None);
        assert_eq!(parse_duration("five"), None);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_calendar_date("soon"), None);
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("2025-13-01"), None);
        assert_eq!(date_part("not-a-date-at-all"), None);
    }
}
