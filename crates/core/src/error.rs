use thiserror::Error;

/// Domain-level error taxonomy shared by the repository layer.
///
/// Read operations never surface [`CoreError::Transport`] to callers --
/// they degrade to empty results at the repository boundary. Write
/// operations propagate it after publishing a notice.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested record does not exist in the gateway.
    #[error("{entity} not found")]
    NotFound {
        /// Entity kind, e.g. `"Task"` or `"Category"`.
        entity: &'static str,
    },

    /// A required field was missing or malformed. Raised before any
    /// gateway call is made.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The gateway was unreachable or reported a failure.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl CoreError {
    /// `NotFound` for a task, with the fixed user-facing message.
    pub fn task_not_found() -> Self {
        CoreError::NotFound { entity: "Task" }
    }

    /// `NotFound` for a category, with the fixed user-facing message.
    pub fn category_not_found() -> Self {
        CoreError::NotFound { entity: "Category" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_messages_are_fixed() {
        assert_eq!(CoreError::task_not_found().to_string(), "Task not found");
        assert_eq!(
            CoreError::category_not_found().to_string(),
            "Category not found"
        );
    }

    #[test]
    fn validation_message_includes_detail() {
        let err = CoreError::Validation("Task title is required".into());
        assert_eq!(err.to_string(), "Validation failed: Task title is required");
    }
}
