//! Wire shapes for the record-service contract.
//!
//! Field names follow the service's JSON spelling exactly (mixed
//! casing included), so these structs are the single place that
//! spelling appears.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use taskflow_core::types::RecordId;

/// JSON key under which every record carries its identifier.
pub const ID_FIELD: &str = "Id";

// ---------------------------------------------------------------------------
// Query building blocks
// ---------------------------------------------------------------------------

/// One projected field: `{"field": {"Name": "title_c"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub field: FieldName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldName {
    #[serde(rename = "Name")]
    pub name: String,
}

impl FieldSpec {
    /// Project a field by name.
    pub fn named(name: impl Into<String>) -> Self {
        FieldSpec {
            field: FieldName { name: name.into() },
        }
    }
}

/// Sort direction for an order-by clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortType {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

/// One ordering clause: `{"fieldName": "created_at_c", "sorttype": "DESC"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    pub sorttype: SortType,
}

impl OrderBy {
    pub fn asc(field_name: impl Into<String>) -> Self {
        OrderBy {
            field_name: field_name.into(),
            sorttype: SortType::Asc,
        }
    }

    pub fn desc(field_name: impl Into<String>) -> Self {
        OrderBy {
            field_name: field_name.into(),
            sorttype: SortType::Desc,
        }
    }
}

/// Filter predicate operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    EqualTo,
    NotEqualTo,
    Contains,
}

/// One top-level filter condition. A record matches when its field
/// value equals (or contains, per the operator) any of `values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhereCondition {
    #[serde(rename = "FieldName")]
    pub field_name: String,
    #[serde(rename = "Operator")]
    pub operator: Operator,
    #[serde(rename = "Values")]
    pub values: Vec<Value>,
}

impl WhereCondition {
    /// Equality against a single value.
    pub fn equal_to(field_name: impl Into<String>, value: Value) -> Self {
        WhereCondition {
            field_name: field_name.into(),
            operator: Operator::EqualTo,
            values: vec![value],
        }
    }
}

/// A condition inside a where-group. Same semantics as
/// [`WhereCondition`], but the service spells the keys in lower camel
/// case here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupCondition {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    pub operator: Operator,
    pub values: Vec<Value>,
}

/// Combinator for conditions and sub-groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupOperator {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

/// A nested group of conditions combined by `operator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroup {
    pub conditions: Vec<GroupCondition>,
    pub operator: GroupOperator,
}

/// A top-level group of condition groups combined by `operator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhereGroup {
    pub operator: GroupOperator,
    #[serde(rename = "subGroups")]
    pub sub_groups: Vec<ConditionGroup>,
}

/// Query parameters accepted by fetch operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldSpec>,
    #[serde(rename = "orderBy", default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
    #[serde(rename = "where", default, skip_serializing_if = "Vec::is_empty")]
    pub where_: Vec<WhereCondition>,
    #[serde(rename = "whereGroups", default, skip_serializing_if = "Vec::is_empty")]
    pub where_groups: Vec<WhereGroup>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Envelope returned by a multi-record fetch.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Envelope returned by a single-record fetch. Carries no success flag;
/// absence of `data` means the record does not exist.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordResponse {
    #[serde(default)]
    pub data: Option<Value>,
}

/// Per-record outcome inside a mutation response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordResult {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Envelope returned by create/update/delete.
///
/// `success` reports the request as a whole; individual records may
/// still fail and appear with `success: false` in `results`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default)]
    pub results: Vec<RecordResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body for create/update requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsBody {
    pub records: Vec<Value>,
}

/// Body for delete requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteBody {
    #[serde(rename = "RecordIds")]
    pub record_ids: Vec<RecordId>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn query_params_serialize_with_wire_spelling() {
        let params = QueryParams {
            fields: vec![FieldSpec::named("title_c")],
            order_by: vec![OrderBy::desc("created_at_c")],
            where_: vec![WhereCondition::equal_to("completed_c", json!(true))],
            where_groups: Vec::new(),
        };

        let value = serde_json::to_value(&params).unwrap();

        assert_eq!(value["fields"][0]["field"]["Name"], "title_c");
        assert_eq!(value["orderBy"][0]["fieldName"], "created_at_c");
        assert_eq!(value["orderBy"][0]["sorttype"], "DESC");
        assert_eq!(value["where"][0]["FieldName"], "completed_c");
        assert_eq!(value["where"][0]["Operator"], "EqualTo");
        assert_eq!(value["where"][0]["Values"], json!([true]));
    }

    #[test]
    fn where_groups_serialize_nested_shape() {
        let group = WhereGroup {
            operator: GroupOperator::And,
            sub_groups: vec![ConditionGroup {
                conditions: vec![GroupCondition {
                    field_name: "archived_c".into(),
                    operator: Operator::EqualTo,
                    values: vec![json!(false)],
                }],
                operator: GroupOperator::And,
            }],
        };

        let value = serde_json::to_value(&group).unwrap();

        assert_eq!(value["operator"], "AND");
        assert_eq!(value["subGroups"][0]["conditions"][0]["fieldName"], "archived_c");
        assert_eq!(value["subGroups"][0]["conditions"][0]["operator"], "EqualTo");
    }

    #[test]
    fn empty_query_sections_are_omitted() {
        let value = serde_json::to_value(QueryParams::default()).unwrap();
        let object = value.as_object().unwrap();

        assert!(!object.contains_key("orderBy"));
        assert!(!object.contains_key("where"));
        assert!(!object.contains_key("whereGroups"));
    }

    #[test]
    fn fetch_response_tolerates_missing_data() {
        let response: FetchResponse =
            serde_json::from_value(json!({"success": false, "message": "boom"})).unwrap();

        assert!(!response.success);
        assert!(response.data.is_empty());
        assert_eq!(response.message.as_deref(), Some("boom"));
    }

    #[test]
    fn delete_body_uses_record_ids_key() {
        let value = serde_json::to_value(DeleteBody { record_ids: vec![3, 4] }).unwrap();
        assert_eq!(value["RecordIds"], json!([3, 4]));
    }
}
