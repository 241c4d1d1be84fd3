//! Category record mapping for the `category_c` collection.

use serde::Deserialize;
use serde_json::{Map, Value};

use taskflow_core::category::{Category, NewCategory};
use taskflow_core::palette;
use taskflow_gateway::FieldSpec;

use crate::models::task::coerce_record_id;

pub const FIELD_NAME: &str = "Name";
pub const FIELD_COLOR: &str = "color_c";
pub const FIELD_TASK_COUNT: &str = "task_count_c";

/// Projection for every category read.
pub fn category_projection() -> Vec<FieldSpec> {
    [FIELD_NAME, FIELD_COLOR, FIELD_TASK_COUNT]
        .into_iter()
        .map(FieldSpec::named)
        .collect()
}

/// A raw category record as the gateway returns it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryRecord {
    #[serde(rename = "Id", default)]
    pub id: Option<Value>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "color_c", default)]
    pub color: Option<String>,
    #[serde(rename = "task_count_c", default)]
    pub task_count: Option<Value>,
}

impl CategoryRecord {
    /// Convert into the domain shape. Unrecognized colors collapse to
    /// the palette default; the stored count is kept only until the
    /// read path recomputes it.
    pub fn into_category(self) -> Option<Category> {
        let id = self.id.as_ref().and_then(coerce_record_id)?;
        Some(Category {
            id,
            name: self.name.unwrap_or_default(),
            color: palette::normalize_color(self.color.as_deref().unwrap_or("")).to_string(),
            task_count: self
                .task_count
                .as_ref()
                .and_then(Value::as_i64)
                .unwrap_or(0),
        })
    }
}

/// Map a raw gateway value to a category, or `None` if it is unusable.
pub fn category_from_value(value: &Value) -> Option<Category> {
    serde_json::from_value::<CategoryRecord>(value.clone())
        .ok()?
        .into_category()
}

/// Updateable-field payload for a full-replace write.
pub fn category_fields(draft: &NewCategory) -> Value {
    let mut fields = Map::new();
    fields.insert(FIELD_NAME.into(), Value::from(draft.name.clone()));
    fields.insert(
        FIELD_COLOR.into(),
        Value::from(palette::normalize_color(draft.color.as_deref().unwrap_or(""))),
    );
    Value::Object(fields)
}

/// Create payload: the updateable fields plus a zero task count. The
/// count is never authoritative; reads recompute it.
pub fn category_fields_for_create(draft: &NewCategory) -> Value {
    let mut value = category_fields(draft);
    value[FIELD_TASK_COUNT] = Value::from(0);
    value
}
