//! Task derivation pipeline.
//!
//! Pure, deterministic transformations from a raw task snapshot plus UI
//! state into what the presentation layer renders: the filtered and
//! ordered visible list ([`visible_tasks`]), due-date classification
//! ([`classify_due_date`]), and the dashboard completion summary
//! ([`completion_stats`]).

use std::cmp::Ordering;

use chrono::{NaiveDate, Utc};

use crate::filter::{CategoryFilter, PriorityFilter, StatusFilter, TaskFilters};
use crate::task::{parse_due_date, Task};

// ---------------------------------------------------------------------------
// Visible list
// ---------------------------------------------------------------------------

/// Derive the ordered, filtered task list for display.
///
/// Archived tasks are excluded unconditionally. A non-empty `search`
/// keeps tasks whose title or description contains it, case-insensitive.
/// The status, category, and priority filters then apply in turn, and
/// the survivors are sorted with [`compare_tasks`].
pub fn visible_tasks(tasks: &[Task], search: &str, filters: &TaskFilters) -> Vec<Task> {
    let query = search.to_lowercase();

    let mut visible: Vec<Task> = tasks
        .iter()
        .filter(|task| !task.archived)
        .filter(|task| {
            query.is_empty()
                || task.title.to_lowercase().contains(&query)
                || task.description.to_lowercase().contains(&query)
        })
        .filter(|task| match filters.status {
            StatusFilter::All => true,
            StatusFilter::Active => !task.completed,
            StatusFilter::Completed => task.completed,
        })
        .filter(|task| match filters.category {
            CategoryFilter::All => true,
            CategoryFilter::Category(id) => task.category_id == Some(id),
        })
        .filter(|task| match filters.priority {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => task.priority == priority,
        })
        .cloned()
        .collect();

    visible.sort_by(compare_tasks);
    visible
}

/// Composite display ordering for tasks.
///
/// Precedence: incomplete before completed, then higher priority first,
/// then ascending due date (only when both sides have one), then
/// `created_at` descending as the final discriminator. Total over every
/// pair, so the (stable) sort is deterministic.
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    match (a.completed, b.completed) {
        (false, true) => return Ordering::Less,
        (true, false) => return Ordering::Greater,
        _ => {}
    }

    match b.priority.cmp(&a.priority) {
        Ordering::Equal => {}
        ordering => return ordering,
    }

    // The due-date tie-break only applies when both tasks carry one.
    if let (Some(a_due), Some(b_due)) = (a.due_date, b.due_date) {
        match a_due.cmp(&b_due) {
            Ordering::Equal => {}
            ordering => return ordering,
        }
    }

    b.created_at.cmp(&a.created_at)
}

// ---------------------------------------------------------------------------
// Due-date classification
// ---------------------------------------------------------------------------

/// Display classification of a due date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueDateStatus {
    /// `"Today"`, or an abbreviated month-day such as `"Jan 5"`.
    pub display_text: String,
    pub is_overdue: bool,
    pub is_today: bool,
}

/// Classify a raw due-date string against a reference calendar day.
///
/// Returns `None` for absent or unparseable input. `is_today` is set
/// when the date equals `today`; `is_overdue` when it is strictly
/// earlier. Comparison is calendar-day granular, never timestamp-based.
pub fn classify_due_date(raw: &str, today: NaiveDate) -> Option<DueDateStatus> {
    let date = parse_due_date(raw)?;

    if date == today {
        return Some(DueDateStatus {
            display_text: "Today".to_string(),
            is_overdue: false,
            is_today: true,
        });
    }

    Some(DueDateStatus {
        display_text: date.format("%b %-d").to_string(),
        is_overdue: date < today,
        is_today: false,
    })
}

/// [`classify_due_date`] against the current UTC calendar day.
pub fn classify_due_date_now(raw: &str) -> Option<DueDateStatus> {
    classify_due_date(raw, Utc::now().date_naive())
}

// ---------------------------------------------------------------------------
// Completion summary
// ---------------------------------------------------------------------------

/// Dashboard header summary over the non-archived task set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionStats {
    pub total: usize,
    pub completed: usize,
}

/// Count non-archived tasks and how many of them are completed.
pub fn completion_stats(tasks: &[Task]) -> CompletionStats {
    let total = tasks.iter().filter(|task| !task.archived).count();
    let completed = tasks
        .iter()
        .filter(|task| task.completed && !task.archived)
        .count();
    CompletionStats { total, completed }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
