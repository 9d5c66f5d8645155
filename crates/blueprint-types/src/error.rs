use thiserror::Error;

/// Errors raised while ingesting a blueprint document.
#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("failed to parse JSON: {0}")]
    Parse(String),

    #[error("invalid blueprint format: missing '{0}' property")]
    MissingField(&'static str),

    #[error("invalid blueprint format: '{field}' must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("invalid module: {0}")]
    InvalidModule(String),

    #[error("failed to read blueprint file: {0}")]
    Io(String),
}

/// Errors from the blueprint explanation service.
///
/// Each variant carries a distinct user-facing message.
#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("API key is not configured. Set GEMINI_API_KEY or send an x-api-key header.")]
    NotConfigured,

    #[error("The configured API key is invalid.")]
    InvalidCredential,

    #[error("Failed to get explanation from AI service: {0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blueprint_error_display() {
        let err = BlueprintError::MissingField("flow");
        assert_eq!(err.to_string(), "invalid blueprint format: missing 'flow' property");

        let err = BlueprintError::InvalidField {
            field: "name",
            expected: "a string",
        };
        assert_eq!(err.to_string(), "invalid blueprint format: 'name' must be a string");
    }

    #[test]
    fn test_explain_errors_are_distinct() {
        let messages = [
            ExplainError::NotConfigured.to_string(),
            ExplainError::InvalidCredential.to_string(),
            ExplainError::Failed("timeout".to_string()).to_string(),
        ];
        assert!(messages[0].contains("not configured"));
        assert!(messages[1].contains("invalid"));
        assert!(messages[2].contains("timeout"));
        assert_ne!(messages[0], messages[1]);
    }
}
