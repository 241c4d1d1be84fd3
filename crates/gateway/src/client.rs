//! HTTP backend for the record service, built on [`reqwest`].

use async_trait::async_trait;
use serde_json::Value;

use taskflow_core::types::RecordId;

use crate::config::GatewayConfig;
use crate::gateway::{GatewayError, RecordGateway};
use crate::records::{
    DeleteBody, FetchResponse, MutationResponse, QueryParams, RecordResponse, RecordsBody,
};

/// Header carrying the project identifier.
const PROJECT_HEADER: &str = "x-project-id";

/// Header carrying the public API key.
const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for the record service.
///
/// Stateless apart from connection pooling: every call is an
/// independent request/response exchange.
pub struct RecordClient {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl RecordClient {
    /// Create a client with a fresh connection pool.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful
    /// for pooling connections across several gateways).
    pub fn with_client(client: reqwest::Client, config: GatewayConfig) -> Self {
        Self { client, config }
    }

    /// Build an authenticated POST request for a service path.
    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}/api/records/{path}", self.config.base_url))
            .header(PROJECT_HEADER, &self.config.project_id)
            .header(API_KEY_HEADER, &self.config.api_key)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`GatewayError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl RecordGateway for RecordClient {
    async fn fetch_records(
        &self,
        collection: &str,
        params: &QueryParams,
    ) -> Result<FetchResponse, GatewayError> {
        tracing::debug!(collection, "Fetching records");
        let response = self
            .post(&format!("{collection}/fetch"))
            .json(params)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn get_record_by_id(
        &self,
        collection: &str,
        id: RecordId,
        params: &QueryParams,
    ) -> Result<RecordResponse, GatewayError> {
        tracing::debug!(collection, id, "Fetching record by id");
        let response = self
            .post(&format!("{collection}/{id}/fetch"))
            .json(params)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn create_records(
        &self,
        collection: &str,
        records: Vec<Value>,
    ) -> Result<MutationResponse, GatewayError> {
        tracing::debug!(collection, count = records.len(), "Creating records");
        let response = self
            .post(&format!("{collection}/create"))
            .json(&RecordsBody { records })
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn update_records(
        &self,
        collection: &str,
        records: Vec<Value>,
    ) -> Result<MutationResponse, GatewayError> {
        tracing::debug!(collection, count = records.len(), "Updating records");
        let response = self
            .post(&format!("{collection}/update"))
            .json(&RecordsBody { records })
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn delete_records(
        &self,
        collection: &str,
        ids: &[RecordId],
    ) -> Result<MutationResponse, GatewayError> {
        tracing::debug!(collection, count = ids.len(), "Deleting records");
        let response = self
            .post(&format!("{collection}/delete"))
            .json(&DeleteBody {
                record_ids: ids.to_vec(),
            })
            .send()
            .await?;
        Self::parse_response(response).await
    }
}
