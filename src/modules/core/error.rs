//! Error types for the SmartPOS API

use thiserror::Error;

/// Main error type for SmartPOS operations
///
/// Every variant ends up in the same place: the handler's catch-all turns it
/// into a `500` whose `details` field is the `Display` text.
#[derive(Error, Debug)]
pub enum SmartPosError {
    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// MongoDB driver error
    #[error("MongoDB error: {0}")]
    MongoDB(String),

    /// Storage backend error outside the MongoDB driver
    #[error("Store error: {0}")]
    Store(String),

    /// Request body or stored document has the wrong shape
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// HTTP server error
    #[error("Server error: {0}")]
    Server(String),

    /// File system or stdio error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SmartPosError {
    /// Returns true if the failure came from the database rather than the request
    pub fn is_database_error(&self) -> bool {
        matches!(self, SmartPosError::MongoDB(_) | SmartPosError::Store(_))
    }
}

/// Result type alias using SmartPosError
pub type Result<T> = std::result::Result<T, SmartPosError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SmartPosError::Config("MONGODB_URL is not set".into());
        assert_eq!(err.to_string(), "Configuration error: MONGODB_URL is not set");
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: SmartPosError = parse.unwrap_err().into();
        assert!(matches!(err, SmartPosError::Json(_)));
        assert!(err.to_string().starts_with("JSON error:"));
    }

    #[test]
    fn test_is_database_error() {
        assert!(SmartPosError::MongoDB("timeout".into()).is_database_error());
        assert!(SmartPosError::Store("poisoned".into()).is_database_error());
        assert!(!SmartPosError::InvalidDocument("array".into()).is_database_error());
    }
}
