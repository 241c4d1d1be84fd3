//! Shared fixtures for the repository suites: seed helpers plus
//! gateway wrappers that count calls or inject failures.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{json, Value};

use taskflow_core::types::RecordId;
use taskflow_gateway::{
    FetchResponse, GatewayError, MemoryGateway, MutationResponse, QueryParams, RecordGateway,
    RecordResponse,
};

pub const TASKS: &str = "task_c";
pub const CATEGORIES: &str = "category_c";

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Field values for one seeded task record.
pub struct TaskSeed {
    pub title: &'static str,
    pub category_id: Option<RecordId>,
    pub completed: bool,
    pub archived: bool,
    pub created_at: &'static str,
}

impl Default for TaskSeed {
    fn default() -> Self {
        TaskSeed {
            title: "task",
            category_id: None,
            completed: false,
            archived: false,
            created_at: "2024-01-01T10:00:00.000Z",
        }
    }
}

/// Insert a task record directly through the gateway, returning its id.
pub async fn seed_task(gateway: &dyn RecordGateway, seed: TaskSeed) -> RecordId {
    let record = json!({
        "title_c": seed.title,
        "description_c": "",
        "due_date_c": Value::Null,
        "priority_c": "medium",
        "category_id_c": seed.category_id,
        "completed_c": seed.completed,
        "archived_c": seed.archived,
        "created_at_c": seed.created_at,
    });
    let response = gateway.create_records(TASKS, vec![record]).await.unwrap();
    created_id(&response)
}

/// Insert a category record directly through the gateway, returning its id.
pub async fn seed_category(
    gateway: &dyn RecordGateway,
    name: &str,
    stored_count: i64,
) -> RecordId {
    let record = json!({
        "Name": name,
        "color_c": "#3B82F6",
        "task_count_c": stored_count,
    });
    let response = gateway
        .create_records(CATEGORIES, vec![record])
        .await
        .unwrap();
    created_id(&response)
}

fn created_id(response: &MutationResponse) -> RecordId {
    response.results[0].data.as_ref().unwrap()["Id"]
        .as_i64()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Gateway wrappers
// ---------------------------------------------------------------------------

/// Counts every gateway call; used to assert that validation failures
/// never produce network traffic.
pub struct CountingGateway {
    inner: MemoryGateway,
    calls: AtomicUsize,
}

impl CountingGateway {
    pub fn new() -> Self {
        Self {
            inner: MemoryGateway::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordGateway for CountingGateway {
    async fn fetch_records(
        &self,
        collection: &str,
        params: &QueryParams,
    ) -> Result<FetchResponse, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_records(collection, params).await
    }

    async fn get_record_by_id(
        &self,
        collection: &str,
        id: RecordId,
        params: &QueryParams,
    ) -> Result<RecordResponse, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_record_by_id(collection, id, params).await
    }

    async fn create_records(
        &self,
        collection: &str,
        records: Vec<Value>,
    ) -> Result<MutationResponse, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.create_records(collection, records).await
    }

    async fn update_records(
        &self,
        collection: &str,
        records: Vec<Value>,
    ) -> Result<MutationResponse, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.update_records(collection, records).await
    }

    async fn delete_records(
        &self,
        collection: &str,
        ids: &[RecordId],
    ) -> Result<MutationResponse, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_records(collection, ids).await
    }
}

/// Reports `success: false` for fetches against one collection and
/// delegates everything else.
pub struct FailingFetchGateway {
    pub inner: MemoryGateway,
    pub collection: &'static str,
}

impl FailingFetchGateway {
    pub fn new(collection: &'static str) -> Self {
        Self {
            inner: MemoryGateway::new(),
            collection,
        }
    }
}

#[async_trait]
impl RecordGateway for FailingFetchGateway {
    async fn fetch_records(
        &self,
        collection: &str,
        params: &QueryParams,
    ) -> Result<FetchResponse, GatewayError> {
        if collection == self.collection {
            return Ok(FetchResponse {
                success: false,
                data: Vec::new(),
                message: Some("Record service unavailable".to_string()),
            });
        }
        self.inner.fetch_records(collection, params).await
    }

    async fn get_record_by_id(
        &self,
        collection: &str,
        id: RecordId,
        params: &QueryParams,
    ) -> Result<RecordResponse, GatewayError> {
        self.inner.get_record_by_id(collection, id, params).await
    }

    async fn create_records(
        &self,
        collection: &str,
        records: Vec<Value>,
    ) -> Result<MutationResponse, GatewayError> {
        self.inner.create_records(collection, records).await
    }

    async fn update_records(
        &self,
        collection: &str,
        records: Vec<Value>,
    ) -> Result<MutationResponse, GatewayError> {
        self.inner.update_records(collection, records).await
    }

    async fn delete_records(
        &self,
        collection: &str,
        ids: &[RecordId],
    ) -> Result<MutationResponse, GatewayError> {
        self.inner.delete_records(collection, ids).await
    }
}

/// Rejects updates touching one specific record id and delegates
/// everything else; drives the partial-cascade scenarios.
pub struct UpdateRejectingGateway {
    pub inner: MemoryGateway,
    pub reject_id: RecordId,
}

impl UpdateRejectingGateway {
    pub fn new(reject_id: RecordId) -> Self {
        Self {
            inner: MemoryGateway::new(),
            reject_id,
        }
    }
}

#[async_trait]
impl RecordGateway for UpdateRejectingGateway {
    async fn fetch_records(
        &self,
        collection: &str,
        params: &QueryParams,
    ) -> Result<FetchResponse, GatewayError> {
        self.inner.fetch_records(collection, params).await
    }

    async fn get_record_by_id(
        &self,
        collection: &str,
        id: RecordId,
        params: &QueryParams,
    ) -> Result<RecordResponse, GatewayError> {
        self.inner.get_record_by_id(collection, id, params).await
    }

    async fn create_records(
        &self,
        collection: &str,
        records: Vec<Value>,
    ) -> Result<MutationResponse, GatewayError> {
        self.inner.create_records(collection, records).await
    }

    async fn update_records(
        &self,
        collection: &str,
        records: Vec<Value>,
    ) -> Result<MutationResponse, GatewayError> {
        let rejected = records
            .iter()
            .any(|record| record.get("Id").and_then(Value::as_i64) == Some(self.reject_id));
        if rejected {
            return Err(GatewayError::Api {
                status: 500,
                body: "update rejected".to_string(),
            });
        }
        self.inner.update_records(collection, records).await
    }

    async fn delete_records(
        &self,
        collection: &str,
        ids: &[RecordId],
    ) -> Result<MutationResponse, GatewayError> {
        self.inner.delete_records(collection, ids).await
    }
}
