//! The pluggable record-gateway abstraction.

use async_trait::async_trait;
use serde_json::Value;

use taskflow_core::types::RecordId;

use crate::records::{FetchResponse, MutationResponse, QueryParams, RecordResponse};

/// Errors from the gateway transport layer.
///
/// A response that arrives with `success: false` is NOT a
/// `GatewayError` -- the envelope is returned to the caller, which
/// applies its own degrade-or-propagate policy.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Record service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The client configuration is incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Access to a generic record service.
///
/// Collections are addressed by name; records are opaque JSON objects
/// keyed by [`ID_FIELD`](crate::records::ID_FIELD). Implementations:
/// [`RecordClient`](crate::client::RecordClient) over HTTP and
/// [`MemoryGateway`](crate::memory::MemoryGateway) for tests and local
/// development. Every operation is an independent request/response
/// unit; implementations hold no cross-call state visible to callers.
#[async_trait]
pub trait RecordGateway: Send + Sync {
    /// Fetch records from a collection with projection, filtering, and
    /// ordering.
    async fn fetch_records(
        &self,
        collection: &str,
        params: &QueryParams,
    ) -> Result<FetchResponse, GatewayError>;

    /// Fetch a single record by id. Absent records surface as
    /// `data: None`, not as an error.
    async fn get_record_by_id(
        &self,
        collection: &str,
        id: RecordId,
        params: &QueryParams,
    ) -> Result<RecordResponse, GatewayError>;

    /// Create records. Ids are assigned by the service and returned in
    /// the per-record results.
    async fn create_records(
        &self,
        collection: &str,
        records: Vec<Value>,
    ) -> Result<MutationResponse, GatewayError>;

    /// Full-replace update of the supplied fields on each record; every
    /// record must carry its id.
    async fn update_records(
        &self,
        collection: &str,
        records: Vec<Value>,
    ) -> Result<MutationResponse, GatewayError>;

    /// Delete records by id.
    async fn delete_records(
        &self,
        collection: &str,
        ids: &[RecordId],
    ) -> Result<MutationResponse, GatewayError>;
}
