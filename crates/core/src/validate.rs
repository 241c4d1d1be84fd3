//! Input validation for task and category writes.
//!
//! These checks run before any gateway call so that malformed input
//! never produces network traffic.

/// Maximum length of a task title in characters.
pub const MAX_TASK_TITLE_LENGTH: usize = 200;

/// Maximum length of a task description in characters.
pub const MAX_TASK_DESCRIPTION_LENGTH: usize = 2_000;

/// Maximum length of a category name.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 50;

/// Validate a task title: non-empty after trimming, within the length cap.
pub fn validate_task_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Task title is required".to_string());
    }
    if title.len() > MAX_TASK_TITLE_LENGTH {
        return Err(format!(
            "Task title exceeds maximum length of {MAX_TASK_TITLE_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate a task description: within the length cap (may be empty).
pub fn validate_task_description(description: &str) -> Result<(), String> {
    if description.len() > MAX_TASK_DESCRIPTION_LENGTH {
        return Err(format!(
            "Task description exceeds maximum length of {MAX_TASK_DESCRIPTION_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate a category name: non-empty after trimming, within the length cap.
pub fn validate_category_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Category name is required".to_string());
    }
    if name.len() > MAX_CATEGORY_NAME_LENGTH {
        return Err(format!(
            "Category name exceeds maximum length of {MAX_CATEGORY_NAME_LENGTH} characters"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- validate_task_title -------------------------------------------------

    #[test]
    fn non_empty_title_accepted() {
        assert!(validate_task_title("Buy groceries").is_ok());
    }

    #[test]
    fn empty_title_rejected() {
        let result = validate_task_title("");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("required"));
    }

    #[test]
    fn whitespace_only_title_rejected() {
        assert!(validate_task_title("   ").is_err());
    }

    #[test]
    fn title_at_max_length_accepted() {
        assert!(validate_task_title(&"a".repeat(MAX_TASK_TITLE_LENGTH)).is_ok());
    }

    #[test]
    fn title_over_max_length_rejected() {
        let result = validate_task_title(&"a".repeat(MAX_TASK_TITLE_LENGTH + 1));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("exceeds maximum length"));
    }

    // -- validate_task_description -------------------------------------------

    #[test]
    fn empty_description_accepted() {
        assert!(validate_task_description("").is_ok());
    }

    #[test]
    fn oversized_description_rejected() {
        assert!(validate_task_description(&"a".repeat(MAX_TASK_DESCRIPTION_LENGTH + 1)).is_err());
    }

    // -- validate_category_name ----------------------------------------------

    #[test]
    fn non_empty_category_name_accepted() {
        assert!(validate_category_name("Work").is_ok());
    }

    #[test]
    fn empty_category_name_rejected() {
        assert!(validate_category_name(" ").is_err());
    }
}
