//! Text and date formatting helpers shared by the projections and the TUI
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use chrono::NaiveDate;

/// Parse the leading `YYYY-MM-DD` of a backend date or timestamp string
pub fn leading_date(value: &str) -> Option<NaiveDate> {
    let head = value.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Format a backend date for display, falling back to the raw value
pub fn format_date(value: &str) -> String {
    match leading_date(value) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => value.to_string(),
    }
}

/// Whole days between a due date and `today`; zero when not yet overdue
pub fn days_overdue(next_due: &str, today: NaiveDate) -> Option<i64> {
    let due = leading_date(next_due)?;
    Some((today - due).num_days().max(0))
}

/// "1 overdue reminder" / "3 overdue reminders"
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Truncate text to `max_len` characters, appending "..." when cut
pub fn truncate_text(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_date_accepts_date_and_timestamp() {
        let expected = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        assert_eq!(leading_date("2026-01-15"), Some(expected));
        assert_eq!(leading_date("2026-01-15T08:30:00"), Some(expected));
        assert_eq!(leading_date("soon"), None);
        assert_eq!(leading_date(""), None);
    }

    #[test]
    fn test_format_date_falls_back_to_raw() {
        assert_eq!(format_date("2026-03-05"), "Mar 5, 2026");
        assert_eq!(format_date("not a date"), "not a date");
    }

    #[test]
    fn test_days_overdue() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
        assert_eq!(days_overdue("2026-01-15", today), Some(5));
        assert_eq!(days_overdue("2026-01-25", today), Some(0));
        assert_eq!(days_overdue("garbage", today), None);
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "overdue reminder"), "1 overdue reminder");
        assert_eq!(pluralize(2, "overdue reminder"), "2 overdue reminders");
        assert_eq!(pluralize(0, "check-in"), "0 check-ins");
    }

    #[test]
    fn test_truncate_text_is_char_safe() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("Run a marathon this year", 10), "Run a m...");
        assert_eq!(truncate_text("éééééééééééé", 6), "ééé...");
    }
}
