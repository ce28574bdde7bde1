//! Shared utility functions

use chrono::{Local, NaiveDate};

/// Minimum interval to prevent tight loops (10 seconds)
pub const MIN_INTERVAL_SECS: u64 = 10;

/// Unified duration parser - supports "30s", "5m", "2h", "1d" or plain seconds
pub fn parse_duration(s: &str) -> Option<u64> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }

    if let Ok(secs) = s.parse::<u64>() {
        return Some(secs);
    }

    let (num_str, unit) = if let Some(n) = s.strip_suffix('s') {
        (n, 1u64)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60u64)
    } else if let Some(n) = s.strip_suffix('h') {
        (n, 3600u64)
    } else if let Some(n) = s.strip_suffix('d') {
        (n, 86400u64)
    } else {
        return None;
    };

    num_str.parse::<u64>().ok()?.checked_mul(unit)
}

/// Parse an interval string into seconds, enforcing the 10 second minimum
pub fn parse_interval_str(s: &str) -> motivad::Result<u64> {
    let secs = parse_duration(s).ok_or_else(|| {
        motivad::MotivadError::ConfigError(format!(
            "Invalid interval '{}'. Use format like 30s, 5m, 2h, 1d", s
        ))
    })?;

    if secs < MIN_INTERVAL_SECS {
        return Err(motivad::MotivadError::ConfigError(format!(
            "Interval {}s is too short. Minimum is {}s.",
            secs, MIN_INTERVAL_SECS
        )));
    }

    Ok(secs)
}

/// Format seconds as human-readable interval (e.g., "30s", "5m", "2h")
pub fn format_interval(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86400)
    }
}

/// `--today` value, or the local date
pub fn resolve_today(arg: Option<&str>) -> motivad::Result<NaiveDate> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            motivad::MotivadError::ConfigError(format!("Invalid date '{}' (use YYYY-MM-DD)", s))
        }),
        None => Ok(Local::now().date_naive()),
    }
}

/// Truncate a string to max_len characters (not bytes), adding "..." if truncated.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        chars[..max_len].iter().collect()
    } else {
        format!("{}...", chars[..max_len - 3].iter().collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("30s"), Some(30));
        assert_eq!(parse_duration("5m"), Some(300));
        assert_eq!(parse_duration("2h"), Some(7200));
        assert_eq!(parse_duration("1d"), Some(86400));
        assert_eq!(parse_duration("60"), Some(60));
        assert_eq!(parse_duration("soon"), None);
    }

    #[test]
    fn test_parse_duration_overflow_is_rejected() {
        assert_eq!(parse_duration("999999999999999999d"), None);
        assert!(parse_interval_str("999999999999999999d").is_err());
    }

    #[test]
    fn test_parse_interval_minimum() {
        assert_eq!(parse_interval_str("1m").unwrap(), 60);
        assert!(parse_interval_str("5s").is_err());
        assert!(parse_interval_str("often").is_err());
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(30), "30s");
        assert_eq!(format_interval(60), "1m");
        assert_eq!(format_interval(7200), "2h");
    }

    #[test]
    fn test_resolve_today() {
        assert_eq!(
            resolve_today(Some("2024-06-01")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert!(resolve_today(Some("06/01/2024")).is_err());
        assert!(resolve_today(None).is_ok());
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
    }
}
