//! Repository for the `task_c` collection.
//!
//! Read operations never fail: on any gateway problem they log,
//! surface a notice where the UI expects one, and degrade to an empty
//! list. Write operations publish a notice and propagate a typed
//! error.

use chrono::Utc;
use serde_json::Value;

use taskflow_core::error::CoreError;
use taskflow_core::task::{NewTask, Task};
use taskflow_core::types::RecordId;
use taskflow_core::validate;
use taskflow_events::NoticeBus;
use taskflow_gateway::{
    ConditionGroup, GroupCondition, GroupOperator, Operator, OrderBy, QueryParams, RecordGateway,
    WhereCondition, WhereGroup, ID_FIELD,
};

use crate::models::task::{
    self, task_fields, task_fields_for_create, task_from_value, task_projection,
};
use crate::repositories::{failure_text, unwrap_mutation};

/// Collection holding task records.
const COLLECTION: &str = "task_c";

/// Provides CRUD and query operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// List all tasks, most recently created first.
    ///
    /// Degrades to an empty list on any gateway failure; the failure is
    /// logged and surfaced on the notice bus, never raised.
    pub async fn get_all(gateway: &dyn RecordGateway, notices: &NoticeBus) -> Vec<Task> {
        match Self::fetch_all(gateway).await {
            Ok(tasks) => tasks,
            Err(err) => {
                tracing::error!(error = %err, "Failed to fetch tasks");
                notices.error(failure_text(&err));
                Vec::new()
            }
        }
    }

    /// Find a task by id. Any gateway failure or unmappable record
    /// surfaces as the fixed `Task not found` error.
    pub async fn get_by_id(gateway: &dyn RecordGateway, id: RecordId) -> Result<Task, CoreError> {
        let params = QueryParams {
            fields: task_projection(),
            ..Default::default()
        };
        let response = gateway
            .get_record_by_id(COLLECTION, id, &params)
            .await
            .map_err(|err| {
                tracing::error!(task_id = id, error = %err, "Failed to fetch task");
                CoreError::task_not_found()
            })?;

        response
            .data
            .as_ref()
            .and_then(task_from_value)
            .ok_or_else(CoreError::task_not_found)
    }

    /// List tasks referencing a category. Degrades to empty on failure.
    pub async fn get_by_category(gateway: &dyn RecordGateway, category_id: RecordId) -> Vec<Task> {
        match Self::fetch_by_category(gateway, category_id).await {
            Ok(tasks) => tasks,
            Err(err) => {
                tracing::error!(category_id, error = %err, "Failed to fetch tasks by category");
                Vec::new()
            }
        }
    }

    /// List completed tasks. Degrades to empty on failure.
    pub async fn get_completed(gateway: &dyn RecordGateway) -> Vec<Task> {
        let params = QueryParams {
            fields: task_projection(),
            where_: vec![WhereCondition::equal_to(
                task::FIELD_COMPLETED,
                Value::from(true),
            )],
            ..Default::default()
        };
        match Self::fetch_with(gateway, params).await {
            Ok(tasks) => tasks,
            Err(err) => {
                tracing::error!(error = %err, "Failed to fetch completed tasks");
                Vec::new()
            }
        }
    }

    /// List active tasks: neither completed nor archived. Degrades to
    /// empty on failure.
    pub async fn get_active(gateway: &dyn RecordGateway) -> Vec<Task> {
        let params = QueryParams {
            fields: task_projection(),
            where_groups: vec![WhereGroup {
                operator: GroupOperator::And,
                sub_groups: vec![
                    single_condition(task::FIELD_COMPLETED, Value::from(false)),
                    single_condition(task::FIELD_ARCHIVED, Value::from(false)),
                ],
            }],
            ..Default::default()
        };
        match Self::fetch_with(gateway, params).await {
            Ok(tasks) => tasks,
            Err(err) => {
                tracing::error!(error = %err, "Failed to fetch active tasks");
                Vec::new()
            }
        }
    }

    /// Fetch-all variant that reports failure instead of degrading.
    /// The category read path uses it to decide whether a task-count
    /// refresh can be trusted.
    pub(crate) async fn fetch_all(gateway: &dyn RecordGateway) -> Result<Vec<Task>, CoreError> {
        let params = QueryParams {
            fields: task_projection(),
            order_by: vec![OrderBy::desc(task::FIELD_CREATED_AT)],
            ..Default::default()
        };
        Self::fetch_with(gateway, params).await
    }

    pub(crate) async fn fetch_by_category(
        gateway: &dyn RecordGateway,
        category_id: RecordId,
    ) -> Result<Vec<Task>, CoreError> {
        let params = QueryParams {
            fields: task_projection(),
            where_: vec![WhereCondition::equal_to(
                task::FIELD_CATEGORY_ID,
                Value::from(category_id),
            )],
            ..Default::default()
        };
        Self::fetch_with(gateway, params).await
    }

    async fn fetch_with(
        gateway: &dyn RecordGateway,
        params: QueryParams,
    ) -> Result<Vec<Task>, CoreError> {
        let response = gateway
            .fetch_records(COLLECTION, &params)
            .await
            .map_err(|err| CoreError::Transport(err.to_string()))?;

        if !response.success {
            return Err(CoreError::Transport(
                response
                    .message
                    .unwrap_or_else(|| "Failed to fetch tasks".to_string()),
            ));
        }

        Ok(map_records(&response.data))
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Create a task, returning the mapped record with its
    /// gateway-assigned id.
    ///
    /// Validation runs before any gateway call; a missing title or
    /// category never produces network traffic. When the draft carries
    /// no creation timestamp, the call time is stamped.
    pub async fn create(
        gateway: &dyn RecordGateway,
        notices: &NoticeBus,
        draft: &NewTask,
    ) -> Result<Task, CoreError> {
        if let Err(message) = validate_new_task(draft) {
            notices.error(message.clone());
            return Err(CoreError::Validation(message));
        }

        let created_at = draft.created_at.unwrap_or_else(Utc::now);
        let record = task_fields_for_create(draft, created_at);
        let outcome = unwrap_mutation(
            gateway.create_records(COLLECTION, vec![record]).await,
            "Task",
            "Failed to create task",
        )
        .and_then(|value| {
            task_from_value(&value).ok_or_else(|| {
                CoreError::Transport("No data returned from create operation".to_string())
            })
        });

        match outcome {
            Ok(task) => {
                notices.success("Task created successfully");
                Ok(task)
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to create task");
                notices.error(failure_text(&err));
                Err(err)
            }
        }
    }

    /// Full replace of a task's updateable fields.
    pub async fn update(
        gateway: &dyn RecordGateway,
        notices: &NoticeBus,
        id: RecordId,
        draft: &NewTask,
    ) -> Result<Task, CoreError> {
        match Self::apply_update(gateway, id, draft).await {
            Ok(task) => {
                notices.success("Task updated successfully");
                Ok(task)
            }
            Err(err) => {
                tracing::error!(task_id = id, error = %err, "Failed to update task");
                notices.error(failure_text(&err));
                Err(err)
            }
        }
    }

    /// Update without the notice side effects. The category deletion
    /// cascade uses this so a best-effort cleanup does not flood the
    /// notice bus.
    pub(crate) async fn apply_update(
        gateway: &dyn RecordGateway,
        id: RecordId,
        draft: &NewTask,
    ) -> Result<Task, CoreError> {
        let mut record = task_fields(draft);
        record[ID_FIELD] = Value::from(id);

        let value = unwrap_mutation(
            gateway.update_records(COLLECTION, vec![record]).await,
            "Task",
            "Failed to update task",
        )?;
        let mut task = task_from_value(&value).ok_or_else(|| {
            CoreError::Transport("No data returned from update operation".to_string())
        })?;

        // The payload never carries created_at_c; if the response also
        // omits it, keep the caller's copy of the original timestamp.
        if value.get(task::FIELD_CREATED_AT).is_none() {
            if let Some(created_at) = draft.created_at {
                task.created_at = created_at;
            }
        }
        Ok(task)
    }

    /// Delete a task by id.
    ///
    /// Returns `Ok(false)` when the gateway rejects the delete or the
    /// record does not exist; only a transport failure is an error.
    pub async fn delete(
        gateway: &dyn RecordGateway,
        notices: &NoticeBus,
        id: RecordId,
    ) -> Result<bool, CoreError> {
        let response = match gateway.delete_records(COLLECTION, &[id]).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(task_id = id, error = %err, "Failed to delete task");
                let err = CoreError::Transport(err.to_string());
                notices.error(failure_text(&err));
                return Err(err);
            }
        };

        if !response.success {
            let message = response
                .message
                .unwrap_or_else(|| "Failed to delete task".to_string());
            tracing::error!(task_id = id, message, "Task delete rejected");
            notices.error(message);
            return Ok(false);
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
            tracing::warn!(task_id = id, "Task delete reported per-record failure");
            return Ok(false);
        }

        notices.success("Task deleted successfully");
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_new_task(draft: &NewTask) -> Result<(), String> {
    validate::validate_task_title(&draft.title)?;
    validate::validate_task_description(&draft.description)?;
    if draft.category_id.is_none() {
        return Err("Task category is required".to_string());
    }
    Ok(())
}

fn single_condition(field_name: &str, value: Value) -> ConditionGroup {
    ConditionGroup {
        conditions: vec![GroupCondition {
            field_name: field_name.to_string(),
            operator: Operator::EqualTo,
            values: vec![value],
        }],
        operator: GroupOperator::And,
    }
}

fn map_records(data: &[Value]) -> Vec<Task> {
    data.iter()
        .filter_map(|value| {
            let task = task_from_value(value);
            if task.is_none() {
                tracing::warn!("Skipping unmappable task record");
            }
            task
        })
        .collect()
}
