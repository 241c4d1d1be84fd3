/// All record identifiers are gateway-assigned integers. Their values carry
/// no ordering semantics.
pub type RecordId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
