//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async operations
//! that accept the gateway handle as the first argument and, for
//! writes, the notice bus through which user-facing status messages
//! are surfaced.

use serde_json::Value;

use taskflow_core::error::CoreError;
use taskflow_gateway::{GatewayError, MutationResponse};

pub mod category_repo;
pub mod task_repo;

pub use category_repo::{CategoryDeleteOutcome, CategoryRepo};
pub use task_repo::TaskRepo;

/// Reduce a mutation response to the first created/updated record.
///
/// Transport errors and `success: false` envelopes become
/// [`CoreError::Transport`]; a per-record "not found" failure becomes
/// [`CoreError::NotFound`] for the given entity.
pub(crate) fn unwrap_mutation(
    result: Result<MutationResponse, GatewayError>,
    entity: &'static str,
    fallback: &str,
) -> Result<Value, CoreError> {
    let response = result.map_err(|err| CoreError::Transport(err.to_string()))?;
    if !response.success {
        return Err(CoreError::Transport(
            response.message.unwrap_or_else(|| fallback.to_string()),
        ));
    }
    if let Some(failed) = response.results.iter().find(|result| !result.success) {
        let message = failed
            .message
            .clone()
            .unwrap_or_else(|| fallback.to_string());
        if message.to_lowercase().contains("not found") {
            return Err(CoreError::NotFound { entity });
        }
        return Err(CoreError::Transport(message));
    }
    response
        .results
        .into_iter()
        .find_map(|result| result.data)
        .ok_or_else(|| CoreError::Transport(fallback.to_string()))
}

/// The user-facing text for a failed write.
pub(crate) fn failure_text(err: &CoreError) -> String {
    match err {
        CoreError::Transport(message) => message.clone(),
        _ => err.to_string(),
    }
}
