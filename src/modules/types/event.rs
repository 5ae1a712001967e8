//! Gateway event and response types
//!
//! The handler speaks the API-gateway proxy shape: an event carrying
//! `httpMethod`, `path` and a raw `body`, answered with `statusCode`,
//! `headers` and a JSON-encoded `body` string.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::runtime::ErrorResponse;

pub const ALLOW_ORIGIN_HEADER: &str = "Access-Control-Allow-Origin";
pub const ALLOW_HEADERS_HEADER: &str = "Access-Control-Allow-Headers";
pub const ALLOW_METHODS_HEADER: &str = "Access-Control-Allow-Methods";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

/// Fixed CORS headers attached to every response.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    (ALLOW_ORIGIN_HEADER, "*"),
    (ALLOW_HEADERS_HEADER, "Content-Type"),
    (ALLOW_METHODS_HEADER, "GET, POST, PUT, DELETE, OPTIONS"),
];

/// Inbound request event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    /// HTTP method, compared verbatim (`GET`, `POST`, ...)
    pub http_method: String,
    /// Request path, matched exactly against the route table
    pub path: String,
    /// Raw request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl GatewayEvent {
    pub fn new(http_method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            path: path.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Outbound response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl GatewayResponse {
    /// Empty `200` answer to a CORS preflight. Carries no content type.
    pub fn preflight() -> Self {
        Self {
            status_code: 200,
            headers: cors_headers(),
            body: String::new(),
        }
    }

    /// JSON response with the CORS headers and `Content-Type: application/json`
    pub fn json<T: Serialize>(status_code: u16, body: &T) -> Result<Self, serde_json::Error> {
        let value = serde_json::to_value(body)?;
        Ok(Self::from_value(status_code, &value))
    }

    /// `404` for any method and path outside the route table
    pub fn not_found() -> Self {
        Self::error(404, ErrorResponse::new("Endpoint not found"))
    }

    /// `500` carrying the failure message as `details`
    pub fn internal_error(details: impl Into<String>) -> Self {
        Self::error(
            500,
            ErrorResponse::new("Internal server error").with_details(details),
        )
    }

    fn error(status_code: u16, body: ErrorResponse) -> Self {
        // A struct of strings always serializes.
        let value = serde_json::to_value(&body).unwrap_or_default();
        Self::from_value(status_code, &value)
    }

    fn from_value(status_code: u16, value: &Value) -> Self {
        let mut headers = cors_headers();
        headers.insert(
            CONTENT_TYPE_HEADER.to_string(),
            "application/json".to_string(),
        );
        Self {
            status_code,
            headers,
            body: value.to_string(),
        }
    }

    /// Look up a header by exact name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Parse the body back into JSON
    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

fn cors_headers() -> BTreeMap<String, String> {
    CORS_HEADERS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_deserialize_gateway_shape() {
        let event: GatewayEvent = serde_json::from_value(json!({
            "httpMethod": "POST",
            "path": "/api/transactions",
            "body": "{\"total_amount\": 1}",
            "headers": { "host": "localhost" },
            "isBase64Encoded": false
        }))
        .unwrap();
        assert_eq!(event.http_method, "POST");
        assert_eq!(event.path, "/api/transactions");
        assert_eq!(event.body.as_deref(), Some("{\"total_amount\": 1}"));
    }

    #[test]
    fn test_event_without_body() {
        let event: GatewayEvent =
            serde_json::from_value(json!({ "httpMethod": "GET", "path": "/api/items" })).unwrap();
        assert!(event.body.is_none());
    }

    #[test]
    fn test_preflight_has_no_content_type() {
        let response = GatewayResponse::preflight();
        assert_eq!(response.status_code, 200);
        assert!(response.body.is_empty());
        assert_eq!(response.header(ALLOW_ORIGIN_HEADER), Some("*"));
        assert_eq!(response.header(ALLOW_HEADERS_HEADER), Some("Content-Type"));
        assert_eq!(
            response.header(ALLOW_METHODS_HEADER),
            Some("GET, POST, PUT, DELETE, OPTIONS")
        );
        assert!(response.header(CONTENT_TYPE_HEADER).is_none());
    }

    #[test]
    fn test_not_found() {
        let response = GatewayResponse::not_found();
        assert_eq!(response.status_code, 404);
        assert_eq!(response.header(CONTENT_TYPE_HEADER), Some("application/json"));
        assert_eq!(
            response.body_json().unwrap(),
            json!({ "error": "Endpoint not found" })
        );
    }

    #[test]
    fn test_internal_error() {
        let response = GatewayResponse::internal_error("boom");
        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body_json().unwrap(),
            json!({ "error": "Internal server error", "details": "boom" })
        );
    }

    #[test]
    fn test_error_bodies_use_error_envelope() {
        let parsed: ErrorResponse =
            serde_json::from_str(&GatewayResponse::not_found().body).unwrap();
        assert_eq!(parsed, ErrorResponse::new("Endpoint not found"));

        let parsed: ErrorResponse =
            serde_json::from_str(&GatewayResponse::internal_error("timeout").body).unwrap();
        assert_eq!(
            parsed,
            ErrorResponse::new("Internal server error").with_details("timeout")
        );
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let value = serde_json::to_value(GatewayResponse::preflight()).unwrap();
        assert_eq!(value["statusCode"], json!(200));
        assert_eq!(value["body"], json!(""));
    }
}
