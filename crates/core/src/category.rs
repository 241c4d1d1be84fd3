//! Category domain model and the derived task-count aggregate.

use serde::{Deserialize, Serialize};

use crate::task::Task;
use crate::types::RecordId;

/// A task category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    /// Gateway-assigned identifier.
    pub id: RecordId,
    pub name: String,
    /// Palette color token; the mapping layer substitutes the default
    /// for anything missing or unrecognized.
    pub color: String,
    /// Derived count of non-archived tasks referencing this category.
    /// Never authoritative: recomputed from the current task set every
    /// time categories are listed.
    pub task_count: i64,
}

/// Write-side category payload for create and full-replace update.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Recompute every category's `task_count` from a task snapshot.
///
/// A task contributes to a category's count when it references that
/// category and is not archived. Stateless and side-effect-free; the
/// category read path calls this against a freshly fetched snapshot.
pub fn recompute_task_counts(categories: &mut [Category], tasks: &[Task]) {
    for category in categories.iter_mut() {
        category.task_count = tasks
            .iter()
            .filter(|task| !task.archived && task.category_id == Some(category.id))
            .count() as i64;
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::task::Priority;

    fn task(id: RecordId, category_id: Option<RecordId>, archived: bool) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            description: String::new(),
            due_date: None,
            priority: Priority::Medium,
            category_id,
            completed: false,
            archived,
            created_at: Utc::now(),
        }
    }

    fn category(id: RecordId, task_count: i64) -> Category {
        Category {
            id,
            name: format!("category {id}"),
            color: "#5B21B6".into(),
            task_count,
        }
    }

    #[test]
    fn counts_only_matching_non_archived_tasks() {
        let mut categories = vec![category(1, 0), category(2, 0)];
        let tasks = vec![
            task(10, Some(1), false),
            task(11, Some(1), true),
            task(12, Some(2), false),
            task(13, None, false),
        ];

        recompute_task_counts(&mut categories, &tasks);

        assert_eq!(categories[0].task_count, 1);
        assert_eq!(categories[1].task_count, 1);
    }

    #[test]
    fn stale_counts_are_overwritten() {
        let mut categories = vec![category(1, 99)];

        recompute_task_counts(&mut categories, &[]);

        assert_eq!(categories[0].task_count, 0);
    }
}
