//! In-memory record-service backend.
//!
//! Behaves like the live service from the repository layer's point of
//! view: gateway-assigned integer ids, projection, filter predicates,
//! where-groups, and ordering. Used by the test suites and for local
//! development without a remote service.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use taskflow_core::types::RecordId;

use crate::gateway::{GatewayError, RecordGateway};
use crate::records::{
    ConditionGroup, FetchResponse, GroupOperator, MutationResponse, Operator, QueryParams,
    RecordResponse, RecordResult, WhereGroup, ID_FIELD,
};

#[derive(Default)]
struct Collection {
    last_id: RecordId,
    records: Vec<Map<String, Value>>,
}

/// In-memory [`RecordGateway`] implementation.
///
/// Collections spring into existence on first use. All state lives
/// behind one async mutex; every operation locks, works, and releases,
/// mirroring the independent request/response units of the live
/// backend.
#[derive(Default)]
pub struct MemoryGateway {
    collections: Mutex<HashMap<String, Collection>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordGateway for MemoryGateway {
    async fn fetch_records(
        &self,
        collection: &str,
        params: &QueryParams,
    ) -> Result<FetchResponse, GatewayError> {
        let collections = self.collections.lock().await;
        let Some(stored) = collections.get(collection) else {
            return Ok(FetchResponse {
                success: true,
                data: Vec::new(),
                message: None,
            });
        };

        let mut matches: Vec<&Map<String, Value>> = stored
            .records
            .iter()
            .filter(|record| matches_query(record, params))
            .collect();

        matches.sort_by(|a, b| compare_by_clauses(a, b, params));

        let data = matches
            .into_iter()
            .map(|record| project(record, params))
            .collect();

        Ok(FetchResponse {
            success: true,
            data,
            message: None,
        })
    }

    async fn get_record_by_id(
        &self,
        collection: &str,
        id: RecordId,
        params: &QueryParams,
    ) -> Result<RecordResponse, GatewayError> {
        let collections = self.collections.lock().await;
        let data = collections
            .get(collection)
            .and_then(|stored| stored.records.iter().find(|record| record_id(record) == Some(id)))
            .map(|record| project(record, params));

        Ok(RecordResponse { data })
    }

    async fn create_records(
        &self,
        collection: &str,
        records: Vec<Value>,
    ) -> Result<MutationResponse, GatewayError> {
        let mut collections = self.collections.lock().await;
        let stored = collections.entry(collection.to_string()).or_default();

        let results = records
            .into_iter()
            .map(|record| match record {
                Value::Object(mut fields) => {
                    stored.last_id += 1;
                    fields.insert(ID_FIELD.to_string(), Value::from(stored.last_id));
                    stored.records.push(fields.clone());
                    RecordResult {
                        success: true,
                        data: Some(Value::Object(fields)),
                        message: None,
                    }
                }
                _ => RecordResult {
                    success: false,
                    data: None,
                    message: Some("Record must be a JSON object".to_string()),
                },
            })
            .collect();

        Ok(MutationResponse {
            success: true,
            results,
            message: None,
        })
    }

    async fn update_records(
        &self,
        collection: &str,
        records: Vec<Value>,
    ) -> Result<MutationResponse, GatewayError> {
        let mut collections = self.collections.lock().await;
        let stored = collections.entry(collection.to_string()).or_default();

        let results = records
            .into_iter()
            .map(|record| {
                let Value::Object(fields) = record else {
                    return failure("Record must be a JSON object");
                };
                let Some(id) = fields.get(ID_FIELD).and_then(Value::as_i64) else {
                    return failure("Record is missing an Id");
                };
                let Some(existing) = stored
                    .records
                    .iter_mut()
                    .find(|candidate| record_id(candidate) == Some(id))
                else {
                    return failure("Record not found");
                };

                for (key, value) in fields {
                    if key != ID_FIELD {
                        existing.insert(key, value);
                    }
                }
                RecordResult {
                    success: true,
                    data: Some(Value::Object(existing.clone())),
                    message: None,
                }
            })
            .collect();

        Ok(MutationResponse {
            success: true,
            results,
            message: None,
        })
    }

    async fn delete_records(
        &self,
        collection: &str,
        ids: &[RecordId],
    ) -> Result<MutationResponse, GatewayError> {
        let mut collections = self.collections.lock().await;
        let stored = collections.entry(collection.to_string()).or_default();

        let results = ids
            .iter()
            .map(|id| {
                let before = stored.records.len();
                stored.records.retain(|record| record_id(record) != Some(*id));
                if stored.records.len() < before {
                    RecordResult {
                        success: true,
                        data: None,
                        message: None,
                    }
                } else {
                    failure("Record not found")
                }
            })
            .collect();

        Ok(MutationResponse {
            success: true,
            results,
            message: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Matching, ordering, projection
// ---------------------------------------------------------------------------

fn failure(message: &str) -> RecordResult {
    RecordResult {
        success: false,
        data: None,
        message: Some(message.to_string()),
    }
}

fn record_id(record: &Map<String, Value>) -> Option<RecordId> {
    record.get(ID_FIELD).and_then(Value::as_i64)
}

fn matches_query(record: &Map<String, Value>, params: &QueryParams) -> bool {
    let conditions_pass = params
        .where_
        .iter()
        .all(|cond| matches_condition(record, &cond.field_name, cond.operator, &cond.values));

    conditions_pass
        && params
            .where_groups
            .iter()
            .all(|group| matches_group(record, group))
}

fn matches_group(record: &Map<String, Value>, group: &WhereGroup) -> bool {
    let mut outcomes = group
        .sub_groups
        .iter()
        .map(|sub| matches_condition_group(record, sub));
    match group.operator {
        GroupOperator::And => outcomes.all(|passed| passed),
        GroupOperator::Or => outcomes.any(|passed| passed),
    }
}

fn matches_condition_group(record: &Map<String, Value>, group: &ConditionGroup) -> bool {
    let mut outcomes = group
        .conditions
        .iter()
        .map(|cond| matches_condition(record, &cond.field_name, cond.operator, &cond.values));
    match group.operator {
        GroupOperator::And => outcomes.all(|passed| passed),
        GroupOperator::Or => outcomes.any(|passed| passed),
    }
}

fn matches_condition(
    record: &Map<String, Value>,
    field_name: &str,
    operator: Operator,
    values: &[Value],
) -> bool {
    let actual = record.get(field_name).unwrap_or(&Value::Null);
    match operator {
        Operator::EqualTo => values.iter().any(|value| values_equal(actual, value)),
        Operator::NotEqualTo => !values.iter().any(|value| values_equal(actual, value)),
        Operator::Contains => {
            let Some(haystack) = actual.as_str() else {
                return false;
            };
            let haystack = haystack.to_lowercase();
            values.iter().any(|value| {
                value
                    .as_str()
                    .is_some_and(|needle| haystack.contains(&needle.to_lowercase()))
            })
        }
    }
}

/// Value equality with numeric coercion, so `3` matches `3.0`.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(left), Some(right)) => left == right,
        _ => a == b,
    }
}

fn compare_by_clauses(
    a: &Map<String, Value>,
    b: &Map<String, Value>,
    params: &QueryParams,
) -> Ordering {
    for clause in &params.order_by {
        let left = a.get(&clause.field_name).unwrap_or(&Value::Null);
        let right = b.get(&clause.field_name).unwrap_or(&Value::Null);
        let ordering = match clause.sorttype {
            crate::records::SortType::Asc => compare_values(left, right),
            crate::records::SortType::Desc => compare_values(right, left),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Total order over JSON scalars: null, then booleans, then numbers,
/// then strings, then everything else by textual form.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            _ => 4,
        }
    }

    match (a, b) {
        (Value::Bool(left), Value::Bool(right)) => left.cmp(right),
        (Value::Number(_), Value::Number(_)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(left), Value::String(right)) => left.cmp(right),
        _ => rank(a).cmp(&rank(b)).then_with(|| a.to_string().cmp(&b.to_string())),
    }
}

fn project(record: &Map<String, Value>, params: &QueryParams) -> Value {
    if params.fields.is_empty() {
        return Value::Object(record.clone());
    }

    let mut projected = Map::new();
    if let Some(id) = record.get(ID_FIELD) {
        projected.insert(ID_FIELD.to_string(), id.clone());
    }
    for spec in &params.fields {
        if let Some(value) = record.get(&spec.field.name) {
            projected.insert(spec.field.name.clone(), value.clone());
        }
    }
    Value::Object(projected)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
