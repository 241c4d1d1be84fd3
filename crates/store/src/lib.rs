//! TaskFlow data-access layer.
//!
//! Two-layer design over the record gateway:
//!
//! - [`models`] — the mapping layer between raw gateway records and the
//!   domain shapes in `taskflow-core`. Owns default substitution and
//!   type coercion; nothing outside this crate sees gateway field
//!   names.
//! - [`repositories`] — [`TaskRepo`] and [`CategoryRepo`], the
//!   domain-level CRUD and query operations the presentation layer
//!   calls.

pub mod models;
pub mod repositories;

pub use repositories::category_repo::{CategoryDeleteOutcome, CategoryRepo};
pub use repositories::task_repo::TaskRepo;
