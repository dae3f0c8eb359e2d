//! String formatting utilities for UI rendering.

use voyage_core::itinerary::parse_day_date;

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Wrap text to a given width.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Long form of a day's date, e.g. "Thursday, May 21, 2026".
///
/// Dates that do not parse are shown as given.
pub fn long_date(date: &str) -> String {
    match parse_day_date(date) {
        Some(day) => day.format("%A, %B %-d, %Y").to_string(),
        None => date.to_string(),
    }
}

/// Short form of a day's date, e.g. "Thu, May 21".
pub fn short_date(date: &str) -> String {
    match parse_day_date(date) {
        Some(day) => day.format("%a, %b %-d").to_string(),
        None => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Little Venice", 20), "Little Venice");
        assert_eq!(truncate("Jemaa el-Fnaa night market", 10), "Jemaa e...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_wrap() {
        assert_eq!(
            wrap("ferry from Piraeus to Mykonos", 12),
            vec!["ferry from", "Piraeus to", "Mykonos"]
        );
        assert!(wrap("", 10).is_empty());
    }

    #[test]
    fn test_long_date() {
        assert_eq!(long_date("2026-05-21"), "Thursday, May 21, 2026");
        assert_eq!(long_date(" 2026-05-21\n"), "Thursday, May 21, 2026");
        assert_eq!(long_date("someday"), "someday");
    }

    #[test]
    fn test_short_date() {
        assert_eq!(short_date("2026-05-14"), "Thu, May 14");
        assert_eq!(short_date(" 2026-05-14"), "Thu, May 14");
        assert_eq!(short_date(""), "");
    }
}
