// Display formatting
// File sizes and "2 hours ago" style ages for the history list

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

const MINUTES_PER_DAY: i64 = 1440;
const MINUTES_PER_MONTH: i64 = 43_200;

/// Human-readable size: bytes below 1 KB, else KB or MB with one decimal
pub fn format_file_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

/// `"1 file (3.5 MB)"`, `"3 files (8.2 MB)"`
pub fn format_file_count(count: usize, total_size: u64) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{} file{} ({})", count, plural, format_file_size(total_size))
}

/// Approximate age of `timestamp_ms` relative to `now_ms`, e.g. `"about 2 hours ago"`
///
/// Timestamps in the future are treated as "now".
pub fn format_relative_age(timestamp_ms: i64, now_ms: i64) -> String {
    format!("{} ago", distance_in_words(now_ms.saturating_sub(timestamp_ms).max(0)))
}

fn distance_in_words(elapsed_ms: i64) -> String {
    let minutes = (elapsed_ms as f64 / 60_000.0).round() as i64;

    if minutes < 1 {
        return "less than a minute".to_string();
    }
    if minutes < 45 {
        return plural(minutes, "minute");
    }
    if minutes < 90 {
        return "about 1 hour".to_string();
    }
    if minutes < MINUTES_PER_DAY {
        let hours = (minutes as f64 / 60.0).round() as i64;
        return format!("about {}", plural(hours, "hour"));
    }
    if minutes < 2520 {
        return "1 day".to_string();
    }
    if minutes < MINUTES_PER_MONTH {
        let days = (minutes as f64 / MINUTES_PER_DAY as f64).round() as i64;
        return plural(days, "day");
    }

    let months = (minutes as f64 / MINUTES_PER_MONTH as f64).round() as i64;
    if minutes < 2 * MINUTES_PER_MONTH {
        return format!("about {}", plural(months, "month"));
    }
    if months < 12 {
        return plural(months, "month");
    }

    let years = months / 12;
    match months % 12 {
        0..=2 => format!("about {}", plural(years, "year")),
        3..=8 => format!("over {}", plural(years, "year")),
        _ => format!("almost {}", plural(years + 1, "year")),
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: i64 = 60_000;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;

    #[test]
    fn test_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(3_670_016), "3.5 MB");
    }

    #[test]
    fn test_file_count() {
        assert_eq!(format_file_count(1, 512), "1 file (512 B)");
        assert_eq!(format_file_count(3, 3_670_016), "3 files (3.5 MB)");
    }

    #[test]
    fn test_relative_age() {
        let now = 1_700_000_000_000;
        assert_eq!(format_relative_age(now - 10_000, now), "less than a minute ago");
        assert_eq!(format_relative_age(now + DAY, now), "less than a minute ago");
        assert_eq!(format_relative_age(now - MINUTE, now), "1 minute ago");
        assert_eq!(format_relative_age(now - 5 * MINUTE, now), "5 minutes ago");
        assert_eq!(format_relative_age(now - 50 * MINUTE, now), "about 1 hour ago");
        assert_eq!(format_relative_age(now - 2 * HOUR, now), "about 2 hours ago");
        assert_eq!(format_relative_age(now - DAY, now), "1 day ago");
        assert_eq!(format_relative_age(now - 3 * DAY, now), "3 days ago");
        assert_eq!(format_relative_age(now - 45 * DAY, now), "about 2 months ago");
        assert_eq!(format_relative_age(now - 120 * DAY, now), "4 months ago");
        assert_eq!(format_relative_age(now - 400 * DAY, now), "about 1 year ago");
    }
}
