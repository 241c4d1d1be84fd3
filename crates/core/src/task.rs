//! Task domain model.
//!
//! [`Task`] is the fully-populated domain shape: every optional gateway
//! field has been defaulted by the mapping layer, so no absent value
//! propagates past the store crate. [`NewTask`] is the write-side DTO
//! used for both create and full-replace update.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{RecordId, Timestamp};

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Task priority level.
///
/// Variant order is the sort rank: `Low < Medium < High`. Unrecognized
/// input never reaches this enum -- the mapping layer coerces anything
/// it cannot parse to [`Priority::Medium`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Parse a priority token, falling back to `Medium` for anything
    /// absent or unrecognized. Matching is case-insensitive.
    pub fn parse_lenient(raw: &str) -> Priority {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Priority::Low,
            "high" => Priority::High,
            _ => Priority::Medium,
        }
    }

    /// The wire token for this priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// A fully-populated task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    /// Gateway-assigned identifier, never generated client-side.
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    /// Reference to a category; `None` means uncategorized.
    pub category_id: Option<RecordId>,
    pub completed: bool,
    /// Archived tasks are excluded from every default view but remain
    /// queryable.
    pub archived: bool,
    /// Set once at creation; updates never alter it.
    pub created_at: Timestamp,
}

/// Write-side task payload for create and full-replace update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category_id: Option<RecordId>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub archived: bool,
    /// When absent on create, the repository stamps the call time.
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl From<&Task> for NewTask {
    /// Build a full-replace payload carrying every updateable field of an
    /// existing task. Used for toggle-style updates and the category
    /// deletion cascade.
    fn from(task: &Task) -> Self {
        NewTask {
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date,
            priority: task.priority,
            category_id: task.category_id,
            completed: task.completed,
            archived: task.archived,
            created_at: Some(task.created_at),
        }
    }
}

// ---------------------------------------------------------------------------
// Due date parsing
// ---------------------------------------------------------------------------

/// Parse a due date from its wire representation.
///
/// Accepts a plain ISO calendar date (`2024-01-10`) or a full RFC 3339
/// datetime, from which only the calendar day is kept. Empty or
/// unparseable input yields `None`, never an error.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}
