//! Date and time utilities

use chrono::NaiveDateTime;

/// Format a duration in milliseconds as "MM:SS"
pub fn duration_to_str(duration_ms: u64) -> String {
    let seconds = duration_ms / 1000;
    let (minutes, seconds) = (seconds / 60, seconds % 60);
    format!("{:02}:{:02}", minutes, seconds)
}

/// Format a point in time as a lexicographically sortable ISO 8601 string
pub fn to_iso8601(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Length of a playlist rounded to the minute, as "42 min" or "3 h 07 min"
pub fn playlist_length(duration_ms: u64) -> String {
    let minutes = duration_ms.saturating_add(30_000) / 60_000;
    match (minutes / 60, minutes % 60) {
        (0, minutes) => format!("{} min", minutes),
        (hours, minutes) => format!("{} h {:02} min", hours, minutes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_duration_to_str() {
        assert_eq!(duration_to_str(0), "00:00");
        assert_eq!(duration_to_str(59_999), "00:59");
        assert_eq!(duration_to_str(61_000), "01:01");
        assert_eq!(duration_to_str(6_000_000), "100:00");
    }

    #[test]
    fn test_to_iso8601() {
        let dt = NaiveDate::from_ymd_opt(2001, 9, 4)
            .unwrap()
            .and_hms_opt(7, 5, 0)
            .unwrap();
        assert_eq!(to_iso8601(&dt), "2001-09-04T07:05:00");
    }

    #[test]
    fn test_playlist_length() {
        assert_eq!(playlist_length(0), "0 min");
        assert_eq!(playlist_length(29_999), "0 min");
        assert_eq!(playlist_length(2_520_000), "42 min");
        assert_eq!(playlist_length(3_600_000), "1 h 00 min");
        assert_eq!(playlist_length(11_230_000), "3 h 07 min");
    }
}
