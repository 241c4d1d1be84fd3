//! Repository for the `category_c` collection.
//!
//! Category reads carry a derived aggregate: `task_count` is
//! recomputed from a fresh task snapshot on every list, never trusted
//! from storage. Category deletion is a two-phase operation whose
//! first phase -- clearing the reference on every task that points at
//! the category -- is best-effort and reported via
//! [`CategoryDeleteOutcome::cascade_warnings`].

use serde_json::Value;

use taskflow_core::category::{recompute_task_counts, Category, NewCategory};
use taskflow_core::error::CoreError;
use taskflow_core::task::NewTask;
use taskflow_core::types::RecordId;
use taskflow_core::validate;
use taskflow_events::NoticeBus;
use taskflow_gateway::{OrderBy, QueryParams, RecordGateway, ID_FIELD};

use crate::models::category::{
    self, category_fields, category_fields_for_create, category_from_value, category_projection,
};
use crate::repositories::{failure_text, unwrap_mutation, TaskRepo};

/// Collection holding category records.
const COLLECTION: &str = "category_c";

/// Result of a category deletion.
///
/// `deleted` reports the primary effect. `cascade_warnings` lists the
/// cleanup steps that failed; a non-empty list with `deleted: true`
/// means the category is gone but some tasks may still reference it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDeleteOutcome {
    pub deleted: bool,
    pub cascade_warnings: Vec<String>,
}

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// List all categories, ordered by name, with `task_count` freshly
    /// recomputed.
    ///
    /// The recount needs the current task set, so the task fetch is
    /// sequenced before this returns. If that fetch fails, the
    /// categories are returned with the counts the gateway stored
    /// rather than failing the whole read.
    pub async fn get_all(gateway: &dyn RecordGateway, notices: &NoticeBus) -> Vec<Category> {
        let mut categories = match Self::fetch_all(gateway).await {
            Ok(categories) => categories,
            Err(err) => {
                tracing::error!(error = %err, "Failed to fetch categories");
                notices.error(failure_text(&err));
                return Vec::new();
            }
        };

        match TaskRepo::fetch_all(gateway).await {
            Ok(tasks) => recompute_task_counts(&mut categories, &tasks),
            Err(err) => {
                tracing::warn!(error = %err, "Task count refresh failed; keeping stored counts");
            }
        }

        categories
    }

    /// Find a category by id. Any gateway failure or unmappable record
    /// surfaces as the fixed `Category not found` error.
    pub async fn get_by_id(
        gateway: &dyn RecordGateway,
        id: RecordId,
    ) -> Result<Category, CoreError> {
        let params = QueryParams {
            fields: category_projection(),
            ..Default::default()
        };
        let response = gateway
            .get_record_by_id(COLLECTION, id, &params)
            .await
            .map_err(|err| {
                tracing::error!(category_id = id, error = %err, "Failed to fetch category");
                CoreError::category_not_found()
            })?;

        response
            .data
            .as_ref()
            .and_then(category_from_value)
            .ok_or_else(CoreError::category_not_found)
    }

    async fn fetch_all(gateway: &dyn RecordGateway) -> Result<Vec<Category>, CoreError> {
        let params = QueryParams {
            fields: category_projection(),
            order_by: vec![OrderBy::asc(category::FIELD_NAME)],
            ..Default::default()
        };
        let response = gateway
            .fetch_records(COLLECTION, &params)
            .await
            .map_err(|err| CoreError::Transport(err.to_string()))?;

        if !response.success {
            return Err(CoreError::Transport(
                response
                    .message
                    .unwrap_or_else(|| "Failed to fetch categories".to_string()),
            ));
        }

        Ok(response
            .data
            .iter()
            .filter_map(|value| {
                let category = category_from_value(value);
                if category.is_none() {
                    tracing::warn!("Skipping unmappable category record");
                }
                category
            })
            .collect())
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Create a category. The name is validated before any gateway
    /// call; the stored task count starts at zero.
    pub async fn create(
        gateway: &dyn RecordGateway,
        notices: &NoticeBus,
        draft: &NewCategory,
    ) -> Result<Category, CoreError> {
        if let Err(message) = validate::validate_category_name(&draft.name) {
            notices.error(message.clone());
            return Err(CoreError::Validation(message));
        }

        let record = category_fields_for_create(draft);
        let outcome = unwrap_mutation(
            gateway.create_records(COLLECTION, vec![record]).await,
            "Category",
            "Failed to create category",
        )
        .and_then(|value| {
            category_from_value(&value).ok_or_else(|| {
                CoreError::Transport("No data returned from create operation".to_string())
            })
        });

        match outcome {
            Ok(category) => {
                notices.success("Category created successfully");
                Ok(category)
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to create category");
                notices.error(failure_text(&err));
                Err(err)
            }
        }
    }

    /// Full replace of a category's updateable fields.
    pub async fn update(
        gateway: &dyn RecordGateway,
        notices: &NoticeBus,
        id: RecordId,
        draft: &NewCategory,
    ) -> Result<Category, CoreError> {
        let mut record = category_fields(draft);
        record[ID_FIELD] = Value::from(id);

        let outcome = unwrap_mutation(
            gateway.update_records(COLLECTION, vec![record]).await,
            "Category",
            "Failed to update category",
        )
        .and_then(|value| {
            category_from_value(&value).ok_or_else(|| {
                CoreError::Transport("No data returned from update operation".to_string())
            })
        });

        match outcome {
            Ok(category) => {
                notices.success("Category updated successfully");
                Ok(category)
            }
            Err(err) => {
                tracing::error!(category_id = id, error = %err, "Failed to update category");
                notices.error(failure_text(&err));
                Err(err)
            }
        }
    }

    /// Delete a category, clearing the reference on every task that
    /// points at it first.
    ///
    /// The cascade is best-effort: a task that cannot be cleared is
    /// recorded as a warning and never blocks the deletion itself. The
    /// cascade always completes (or is caught) before the category
    /// record is removed.
    pub async fn delete(
        gateway: &dyn RecordGateway,
        notices: &NoticeBus,
        id: RecordId,
    ) -> Result<CategoryDeleteOutcome, CoreError> {
        let mut cascade_warnings = Vec::new();

        // Phase one: clear the reference on affected tasks.
        match TaskRepo::fetch_by_category(gateway, id).await {
            Ok(tasks) => {
                for task in tasks {
                    let mut draft = NewTask::from(&task);
                    draft.category_id = None;
                    if let Err(err) = TaskRepo::apply_update(gateway, task.id, &draft).await {
                        tracing::warn!(
                            category_id = id,
                            task_id = task.id,
                            error = %err,
                            "Failed to clear category reference",
                        );
                        cascade_warnings.push(format!("task {}: {err}", task.id));
                    }
                }
            }
            Err(err) => {
                tracing::warn!(
                    category_id = id,
                    error = %err,
                    "Could not enumerate tasks for category cleanup",
                );
                cascade_warnings.push(format!("referencing tasks not enumerated: {err}"));
            }
        }

        // Phase two: delete the category record itself.
        let response = match gateway.delete_records(COLLECTION, &[id]).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(category_id = id, error = %err, "Failed to delete category");
                let err = CoreError::Transport(err.to_string());
                notices.error(failure_text(&err));
                return Err(err);
            }
        };

        if !response.success {
            let message = response
                .message
                .unwrap_or_else(|| "Failed to delete category".to_string());
            tracing::error!(category_id = id, message, "Category delete rejected");
            notices.error(message);
            return Ok(CategoryDeleteOutcome {
                deleted: false,
                cascade_warnings,
            });
        }

        let failed: Vec<_> = response
            .results
            .iter()
            .filter(|result| !result.success)
            .collect();
        if !failed.is_empty() {
            for result in &failed {
                if let Some(message) = &result.message {
                    notices.error(message.clone());
                }
            }
            tracing::warn!(category_id = id, "Category delete reported per-record failure");
            return Ok(CategoryDeleteOutcome {
                deleted: false,
                cascade_warnings,
            });
        }

        notices.success("Category deleted successfully");
        Ok(CategoryDeleteOutcome {
            deleted: true,
            cascade_warnings,
        })
    }
}
