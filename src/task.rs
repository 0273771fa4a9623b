//! Task data structure.
//!
//! This module defines the core `Task` struct that represents a single to-do
//! item with its description, priority, lifecycle status, and date stamps.

use chrono::NaiveDate;

use crate::fields::*;

/// A single to-do item.
///
/// The `id` is assigned by the store (`T` + zero-padded sequence number) and
/// never changes or gets reused. `date_completed` stays `None` until the task
/// is marked complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub date_created: NaiveDate,
    pub date_completed: Option<NaiveDate>,
}
