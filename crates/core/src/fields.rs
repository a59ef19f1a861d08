//! Required-field checks applied to request bodies before they reach storage.
//!
//! Titles are stored trimmed. Free-text descriptions are stored as given but
//! must contain something other than whitespace.

use crate::error::CoreError;

/// A required title: present, non-blank, returned trimmed.
pub fn required_title(field: &str, raw: Option<&str>) -> Result<String, CoreError> {
    match raw.map(str::trim) {
        Some(title) if !title.is_empty() => Ok(title.to_string()),
        _ => Err(missing(field)),
    }
}

/// A required free-text field: present and non-blank, returned unchanged.
pub fn required_text(field: &str, raw: Option<&str>) -> Result<String, CoreError> {
    match raw {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        _ => Err(missing(field)),
    }
}

/// A title in a partial update: absent means unchanged, blank is rejected.
pub fn updated_title(field: &str, raw: Option<&str>) -> Result<Option<String>, CoreError> {
    raw.map(|title| required_title(field, Some(title))).transpose()
}

/// A free-text field in a partial update: absent means unchanged, blank is rejected.
pub fn updated_text(field: &str, raw: Option<&str>) -> Result<Option<String>, CoreError> {
    raw.map(|text| required_text(field, Some(text))).transpose()
}

fn missing(field: &str) -> CoreError {
    CoreError::validation(format!("{field} is required"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed() {
        assert_eq!(required_title("Task_Title", Some("  Write report ")).unwrap(), "Write report");
    }

    #[test]
    fn blank_title_rejected() {
        let err = required_title("Task_Title", Some("   ")).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Task_Title is required");
        assert!(required_title("Task_Title", None).is_err());
    }

    #[test]
    fn text_is_kept_verbatim() {
        assert_eq!(required_text("Description", Some(" draft ")).unwrap(), " draft ");
        assert!(required_text("Description", Some("")).is_err());
    }

    #[test]
    fn update_absent_is_unchanged() {
        assert_eq!(updated_title("Goal_Aim", None).unwrap(), None);
        assert_eq!(updated_text("Description", None).unwrap(), None);
    }

    #[test]
    fn update_blank_is_rejected() {
        assert!(updated_title("Goal_Aim", Some(" ")).is_err());
        assert!(updated_text("Description", Some("")).is_err());
    }

    #[test]
    fn update_value_is_applied() {
        assert_eq!(
            updated_title("Goal_Aim", Some(" Run ")).unwrap(),
            Some("Run".to_string())
        );
    }
}
