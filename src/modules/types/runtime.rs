//! Response envelope definitions

use serde::{Deserialize, Serialize};

/// Success envelope for reads and writes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    /// Always true; failures use [`ErrorResponse`]
    pub success: bool,
    /// Documents read or the document written
    pub data: T,
}

impl<T> DataResponse<T> {
    /// Create a successful response wrapping `data`
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// ISO-8601 instant the check was answered
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy(timestamp: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: timestamp.into(),
        }
    }
}

/// Error body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_response_success() {
        let response = DataResponse::success(vec![json!({ "name": "cola" })]);
        assert!(response.success);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "success": true, "data": [{ "name": "cola" }] })
        );
    }

    #[test]
    fn test_health_response() {
        let response = HealthResponse::healthy("2024-01-01T00:00:00.000Z");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "status": "healthy", "timestamp": "2024-01-01T00:00:00.000Z" })
        );
    }

    #[test]
    fn test_error_response_builders() {
        assert_eq!(
            serde_json::to_value(ErrorResponse::new("Endpoint not found")).unwrap(),
            json!({ "error": "Endpoint not found" })
        );
        assert_eq!(
            serde_json::to_value(ErrorResponse::new("Internal server error").with_details("boom"))
                .unwrap(),
            json!({ "error": "Internal server error", "details": "boom" })
        );
    }

    #[test]
    fn test_error_response_parses_with_and_without_details() {
        let bare: ErrorResponse =
            serde_json::from_value(json!({ "error": "Endpoint not found" })).unwrap();
        assert!(bare.details.is_none());

        let detailed: ErrorResponse = serde_json::from_value(
            json!({ "error": "Internal server error", "details": "boom" }),
        )
        .unwrap();
        assert_eq!(detailed.details.as_deref(), Some("boom"));
    }
}
