//! UI filter state consumed by the derivation pipeline.

use crate::task::Priority;
use crate::types::RecordId;

/// Completion-state filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    /// Keep tasks with `completed == false`.
    Active,
    /// Keep tasks with `completed == true`.
    Completed,
}

/// Category filter: everything, or a single category by id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(RecordId),
}

/// Priority filter: everything, or a single priority level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

/// The combined filter state. `Default` is the all-pass state: every
/// non-archived task is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilters {
    pub status: StatusFilter,
    pub category: CategoryFilter,
    pub priority: PriorityFilter,
}
