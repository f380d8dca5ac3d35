use thiserror::Error;

/// Top-level error type for the guidechat workspace.
///
/// Covers the failures that can surface outside a chat session: loading and
/// saving configuration, reading intents documents, and (de)serializing
/// content. Errors raised while talking to the Conversation Service are
/// recovered inside the session controller and never reach this type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GuideChatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for GuideChatError {
    fn from(err: toml::de::Error) -> Self {
        GuideChatError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for GuideChatError {
    fn from(err: toml::ser::Error) -> Self {
        GuideChatError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for GuideChatError {
    fn from(err: serde_json::Error) -> Self {
        GuideChatError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for guidechat operations.
pub type Result<T> = std::result::Result<T, GuideChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GuideChatError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = GuideChatError::Serialization("eof".to_string());
        assert_eq!(err.to_string(), "Serialization error: eof");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GuideChatError = io_err.into();
        assert!(matches!(err, GuideChatError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("key = ").unwrap_err();
        let err: GuideChatError = toml_err.into();
        assert!(matches!(err, GuideChatError::Config(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: GuideChatError = json_err.into();
        assert!(matches!(err, GuideChatError::Serialization(_)));
    }
}
