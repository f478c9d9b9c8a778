/// Format a phone number for display
/// Handles various input formats and normalizes 10-digit numbers to XXXXX XXXXX
pub fn format_phone(phone: &str) -> String {
    // Extract just the digits
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        10 => format!("{} {}", &digits[0..5], &digits[5..10]),
        12 if digits.starts_with("91") => format!("+91 {} {}", &digits[2..7], &digits[7..12]),
        _ => phone.to_string(), // Return original if can't format
    }
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format a possibly empty string, returning a default if empty
pub fn format_optional(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Format a date string to a more readable format
pub fn format_date(date: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        dt.format("%b %d, %Y").to_string()
    } else if let Ok(d) =
        chrono::NaiveDate::parse_from_str(date.get(..10).unwrap_or(date), "%Y-%m-%d")
    {
        d.format("%b %d, %Y").to_string()
    } else {
        date.to_string()
    }
}

/// Clock time from a timestamp; non-timestamps are shown as sent
pub fn format_time(value: Option<&str>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) => match chrono::DateTime::parse_from_rfc3339(v) {
            Ok(dt) => dt.format("%I:%M %p").to_string(),
            Err(_) => v.to_string(),
        },
    }
}

/// Hours worked, e.g. `7h 30m`
pub fn format_hours(hours: f64) -> String {
    if hours <= 0.0 {
        return "-".to_string();
    }
    let minutes = (hours * 60.0).round() as u64;
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("9876543210"), "98765 43210");
        assert_eq!(format_phone("+91 98765-43210"), "+91 98765 43210");
        assert_eq!(format_phone("123"), "123"); // Too short, return as-is
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-01"), "Mar 01, 2024");
        assert_eq!(format_date("2024-03-01T09:15:00Z"), "Mar 01, 2024");
        assert_eq!(format_date("soon"), "soon");
    }

    #[test]
    fn test_format_time_and_hours() {
        assert_eq!(format_time(Some("2024-03-01T09:05:00+05:30")), "09:05 AM");
        assert_eq!(format_time(Some("09:05")), "09:05");
        assert_eq!(format_time(None), "-");
        assert_eq!(format_hours(7.5), "7h 30m");
        assert_eq!(format_hours(0.0), "-");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional("  ", "-"), "-");
        assert_eq!(format_optional("Pune", "-"), "Pune");
    }
}
