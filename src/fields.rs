//! Enumerations and field types for task records.
//!
//! This module defines the two structured values a task carries, priority and
//! lifecycle status, together with the parse/format helpers that map them to
//! the exact words used in the task file and on screen.

/// Priority classification for task importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Task lifecycle status.
///
/// A task starts `Pending` and moves one way to `Completed`; nothing exposes
/// the reverse transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pending,
    Completed,
}

/// Parse a priority word from user input or a task file row.
///
/// Matching is case-insensitive so that `high`, `HIGH` and `High` all land on
/// the same variant; anything else is `None`.
pub fn parse_priority(s: &str) -> Option<Priority> {
    match s.trim().to_lowercase().as_str() {
        "high" => Some(Priority::High),
        "medium" => Some(Priority::Medium),
        "low" => Some(Priority::Low),
        _ => None,
    }
}

/// Parse a status word from a task file row.
pub fn parse_status(s: &str) -> Option<Status> {
    match s.trim().to_lowercase().as_str() {
        "pending" => Some(Status::Pending),
        "completed" => Some(Status::Completed),
        _ => None,
    }
}

/// Canonical form of a priority, as written to the task file and rendered in
/// tables.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::High => "High",
        Priority::Medium => "Medium",
        Priority::Low => "Low",
    }
}

/// Canonical form of a status.
pub fn format_status(s: Status) -> &'static str {
    match s {
        Status::Pending => "Pending",
        Status::Completed => "Completed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_priority_is_case_insensitive() {
        assert_eq!(parse_priority("High"), Some(Priority::High));
        assert_eq!(parse_priority("high"), Some(Priority::High));
        assert_eq!(parse_priority("MEDIUM"), Some(Priority::Medium));
        assert_eq!(parse_priority("  low  "), Some(Priority::Low));
        assert_eq!(parse_priority("urgent"), None);
        assert_eq!(parse_priority(""), None);
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("Pending"), Some(Status::Pending));
        assert_eq!(parse_status("completed"), Some(Status::Completed));
        assert_eq!(parse_status("done"), None);
    }

    #[test]
    fn test_format_round_trips_through_parse() {
        for p in [Priority::High, Priority::Medium, Priority::Low] {
            assert_eq!(parse_priority(format_priority(p)), Some(p));
        }
        for s in [Status::Pending, Status::Completed] {
            assert_eq!(parse_status(format_status(s)), Some(s));
        }
    }
}
