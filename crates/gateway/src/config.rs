//! Gateway client configuration.

use crate::gateway::GatewayError;

/// Connection settings for the record service, loaded from environment
/// variables.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base HTTP URL of the record service (default:
    /// `http://localhost:4000`).
    pub base_url: String,
    /// Project identifier sent with every request.
    pub project_id: String,
    /// Public API key sent with every request.
    pub api_key: String,
}

impl GatewayConfig {
    /// Build a configuration from explicit values.
    pub fn new(
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            project_id: project_id.into(),
            api_key: api_key.into(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var                       | Default                 |
    /// |-------------------------------|-------------------------|
    /// | `TASKFLOW_GATEWAY_URL`        | `http://localhost:4000` |
    /// | `TASKFLOW_GATEWAY_PROJECT_ID` | required                |
    /// | `TASKFLOW_GATEWAY_API_KEY`    | required                |
    pub fn from_env() -> Result<Self, GatewayError> {
        let base_url = std::env::var("TASKFLOW_GATEWAY_URL")
            .unwrap_or_else(|_| "http://localhost:4000".into());

        let project_id = std::env::var("TASKFLOW_GATEWAY_PROJECT_ID").map_err(|_| {
            GatewayError::Config("TASKFLOW_GATEWAY_PROJECT_ID must be set".into())
        })?;

        let api_key = std::env::var("TASKFLOW_GATEWAY_API_KEY")
            .map_err(|_| GatewayError::Config("TASKFLOW_GATEWAY_API_KEY must be set".into()))?;

        Ok(Self {
            base_url,
            project_id,
            api_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn explicit_construction_keeps_values() {
        let config = GatewayConfig::new("http://records.local", "proj-1", "key-1");

        assert_eq!(config.base_url, "http://records.local");
        assert_eq!(config.project_id, "proj-1");
        assert_eq!(config.api_key, "key-1");
    }

    #[test]
    fn from_env_requires_project_id_and_key() {
        // These variables are never set in the test environment.
        std::env::remove_var("TASKFLOW_GATEWAY_PROJECT_ID");
        std::env::remove_var("TASKFLOW_GATEWAY_API_KEY");

        let result = GatewayConfig::from_env();

        assert_matches!(result, Err(GatewayError::Config(_)));
    }
}
