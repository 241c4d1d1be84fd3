//! Task record mapping for the `task_c` collection.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use taskflow_core::task::{parse_due_date, NewTask, Priority, Task};
use taskflow_core::types::{RecordId, Timestamp};
use taskflow_gateway::FieldSpec;

pub const FIELD_TITLE: &str = "title_c";
pub const FIELD_DESCRIPTION: &str = "description_c";
pub const FIELD_DUE_DATE: &str = "due_date_c";
pub const FIELD_PRIORITY: &str = "priority_c";
pub const FIELD_CATEGORY_ID: &str = "category_id_c";
pub const FIELD_COMPLETED: &str = "completed_c";
pub const FIELD_ARCHIVED: &str = "archived_c";
pub const FIELD_CREATED_AT: &str = "created_at_c";

/// Projection for every task read.
pub fn task_projection() -> Vec<FieldSpec> {
    [
        FIELD_TITLE,
        FIELD_DESCRIPTION,
        FIELD_DUE_DATE,
        FIELD_PRIORITY,
        FIELD_CATEGORY_ID,
        FIELD_COMPLETED,
        FIELD_ARCHIVED,
        FIELD_CREATED_AT,
    ]
    .into_iter()
    .map(FieldSpec::named)
    .collect()
}

/// A raw task record as the gateway returns it.
///
/// Every field is lenient: anything missing, null, or of the wrong
/// type falls back to the domain default during
/// [`into_task`](Self::into_task) instead of failing the read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskRecord {
    #[serde(rename = "Id", default)]
    pub id: Option<Value>,
    #[serde(rename = "title_c", default)]
    pub title: Option<String>,
    #[serde(rename = "description_c", default)]
    pub description: Option<String>,
    #[serde(rename = "due_date_c", default)]
    pub due_date: Option<Value>,
    #[serde(rename = "priority_c", default)]
    pub priority: Option<Value>,
    #[serde(rename = "category_id_c", default)]
    pub category_id: Option<Value>,
    #[serde(rename = "completed_c", default)]
    pub completed: Option<Value>,
    #[serde(rename = "archived_c", default)]
    pub archived: Option<Value>,
    #[serde(rename = "created_at_c", default)]
    pub created_at: Option<Value>,
}

impl TaskRecord {
    /// Convert into the fully-populated domain shape.
    ///
    /// Returns `None` only when the record has no usable id; every
    /// other defect is absorbed by a default.
    pub fn into_task(self) -> Option<Task> {
        let id = self.id.as_ref().and_then(coerce_record_id)?;
        Some(Task {
            id,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            due_date: self
                .due_date
                .as_ref()
                .and_then(Value::as_str)
                .and_then(parse_due_date),
            priority: self
                .priority
                .as_ref()
                .and_then(Value::as_str)
                .map(Priority::parse_lenient)
                .unwrap_or_default(),
            category_id: self.category_id.as_ref().and_then(coerce_record_id),
            completed: self.completed.as_ref().map(truthy).unwrap_or(false),
            archived: self.archived.as_ref().map(truthy).unwrap_or(false),
            created_at: self
                .created_at
                .as_ref()
                .and_then(Value::as_str)
                .and_then(parse_timestamp)
                .unwrap_or_else(Utc::now),
        })
    }
}

/// Map a raw gateway value to a task, or `None` if it is unusable.
pub fn task_from_value(value: &Value) -> Option<Task> {
    serde_json::from_value::<TaskRecord>(value.clone())
        .ok()?
        .into_task()
}

/// Updateable-field payload for a full-replace write. Never includes
/// the id or `created_at_c`.
pub fn task_fields(draft: &NewTask) -> Value {
    let mut fields = Map::new();
    fields.insert(FIELD_TITLE.into(), Value::from(draft.title.clone()));
    fields.insert(
        FIELD_DESCRIPTION.into(),
        Value::from(draft.description.clone()),
    );
    fields.insert(
        FIELD_DUE_DATE.into(),
        draft
            .due_date
            .map(|date| Value::from(date.format("%Y-%m-%d").to_string()))
            .unwrap_or(Value::Null),
    );
    fields.insert(FIELD_PRIORITY.into(), Value::from(draft.priority.as_str()));
    fields.insert(
        FIELD_CATEGORY_ID.into(),
        draft.category_id.map(Value::from).unwrap_or(Value::Null),
    );
    fields.insert(FIELD_COMPLETED.into(), Value::from(draft.completed));
    fields.insert(FIELD_ARCHIVED.into(), Value::from(draft.archived));
    Value::Object(fields)
}

/// Create payload: the updateable fields plus the creation timestamp.
pub fn task_fields_for_create(draft: &NewTask, created_at: Timestamp) -> Value {
    let mut value = task_fields(draft);
    value[FIELD_CREATED_AT] = Value::from(format_timestamp(created_at));
    value
}

// ---------------------------------------------------------------------------
// Coercions
// ---------------------------------------------------------------------------

/// Coerce a gateway value to a record id.
///
/// Accepts integers, numeric strings, and lookup objects carrying an
/// `Id` key. Anything else yields `None`, never an error.
pub(crate) fn coerce_record_id(value: &Value) -> Option<RecordId> {
    match value {
        Value::Number(_) => value.as_i64(),
        Value::String(raw) => raw.trim().parse().ok(),
        Value::Object(fields) => fields.get("Id").and_then(coerce_record_id),
        _ => None,
    }
}

/// Loose boolean coercion: accepts booleans and numbers.
pub(crate) fn truthy(value: &Value) -> bool {
    value
        .as_bool()
        .or_else(|| value.as_i64().map(|n| n != 0))
        .unwrap_or(false)
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub(crate) fn format_timestamp(timestamp: Timestamp) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    #[test]
    fn full_record_maps_every_field() {
        let value = json!({
            "Id": 7,
            "title_c": "Ship release",
            "description_c": "tag and push",
            "due_date_c": "2024-02-01",
            "priority_c": "high",
            "category_id_c": 3,
            "completed_c": true,
            "archived_c": false,
            "created_at_c": "2024-01-15T10:00:00.000Z",
        });

        let task = task_from_value(&value).unwrap();

        assert_eq!(task.id, 7);
        assert_eq!(task.title, "Ship release");
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.category_id, Some(3));
        assert!(task.completed);
        assert!(!task.archived);
    }

    #[test]
    fn sparse_record_gets_domain_defaults() {
        let task = task_from_value(&json!({"Id": 1})).unwrap();

        assert_eq!(task.title, "");
        assert_eq!(task.description, "");
        assert_eq!(task.due_date, None);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.category_id, None);
        assert!(!task.completed);
        assert!(!task.archived);
    }

    #[test]
    fn record_without_usable_id_is_rejected() {
        assert!(task_from_value(&json!({"title_c": "orphan"})).is_none());
        assert!(task_from_value(&json!({"Id": "abc"})).is_none());
    }

    #[test]
    fn category_id_coercion_is_lenient() {
        let from_string = task_from_value(&json!({"Id": 1, "category_id_c": "12"})).unwrap();
        assert_eq!(from_string.category_id, Some(12));

        let from_lookup =
            task_from_value(&json!({"Id": 1, "category_id_c": {"Id": 4, "Name": "Work"}}))
                .unwrap();
        assert_eq!(from_lookup.category_id, Some(4));

        let from_garbage = task_from_value(&json!({"Id": 1, "category_id_c": "n/a"})).unwrap();
        assert_eq!(from_garbage.category_id, None);

        let from_empty = task_from_value(&json!({"Id": 1, "category_id_c": ""})).unwrap();
        assert_eq!(from_empty.category_id, None);
    }

    #[test]
    fn invalid_priority_and_due_date_fall_back() {
        let task = task_from_value(
            &json!({"Id": 1, "priority_c": "urgent", "due_date_c": "whenever"}),
        )
        .unwrap();

        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn round_trip_preserves_meaningful_fields() {
        let draft = NewTask {
            title: "Write docs".into(),
            description: "user guide".into(),
            due_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            priority: Priority::Low,
            category_id: Some(9),
            completed: false,
            archived: true,
            created_at: None,
        };

        let mut value = task_fields(&draft);
        value["Id"] = json!(5);
        let task = task_from_value(&value).unwrap();

        assert_eq!(task.title, draft.title);
        assert_eq!(task.description, draft.description);
        assert_eq!(task.due_date, draft.due_date);
        assert_eq!(task.priority, draft.priority);
        assert_eq!(task.category_id, draft.category_id);
        assert_eq!(task.completed, draft.completed);
        assert_eq!(task.archived, draft.archived);
    }

    #[test]
    fn applying_defaults_twice_changes_nothing() {
        let defaulted = task_from_value(&json!({"Id": 1})).unwrap();

        let mut value = task_fields(&NewTask::from(&defaulted));
        value["Id"] = json!(1);
        value[FIELD_CREATED_AT] = json!(format_timestamp(defaulted.created_at));
        let redefaulted = task_from_value(&value).unwrap();

        assert_eq!(
            (
                redefaulted.title.as_str(),
                redefaulted.description.as_str(),
                redefaulted.due_date,
                redefaulted.priority,
                redefaulted.category_id,
                redefaulted.completed,
                redefaulted.archived,
            ),
            ("", "", None, Priority::Medium, None, false, false),
        );
    }

    #[test]
    fn update_payload_never_contains_created_at() {
        let value = task_fields(&NewTask::default());
        assert!(value.get(FIELD_CREATED_AT).is_none());
    }
}
