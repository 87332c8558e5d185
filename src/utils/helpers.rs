//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a correlation id for an inbound update
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Token tying confirmation buttons to one pending deletion
pub fn generate_confirmation_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Trim surrounding whitespace; `None` when nothing is left.
pub fn normalize_input(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Parse a user id typed by an operator.
///
/// Accepts a bare integer or a `tg://user?id=` link.
pub fn parse_user_id(text: &str) -> Option<i64> {
    let text = text.trim();
    text.strip_prefix("tg://user?id=")
        .unwrap_or(text)
        .parse::<i64>()
        .ok()
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_input() {
        assert_eq!(normalize_input("  Colors \n"), Some("Colors"));
        assert_eq!(normalize_input("   "), None);
        assert_eq!(normalize_input(""), None);
    }

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("123456789"), Some(123456789));
        assert_eq!(parse_user_id(" -42 "), Some(-42));
        assert_eq!(parse_user_id("tg://user?id=77"), Some(77));
        assert_eq!(parse_user_id("@username"), None);
        assert_eq!(parse_user_id("12ab"), None);
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("привет мир", 4), "при…");
    }

    #[test]
    fn test_correlation_ids_are_unique() {
        assert_ne!(generate_correlation_id(), generate_correlation_id());
    }
}
