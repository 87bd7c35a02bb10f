use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::openapi::DOCS_PATH;

/// Service name reported by the root endpoint.
pub const SERVICE_NAME: &str = "AI Dev Team API";

/// # Service Identity Response
///
/// Static identity payload returned by `GET /`, pointing callers at the
/// interactive documentation.
///
/// ## Fields
/// - `message`: Service name
/// - `version`: Crate version
/// - `timestamp`: ISO 8601 timestamp of response construction
/// - `documentation`: Path prefix where the Swagger UI is mounted
///
/// ## Example JSON
/// ```json
/// {
///   "message": "AI Dev Team API",
///   "version": "1.0.0",
///   "timestamp": "2024-03-10T15:30:45.123456789Z",
///   "documentation": "/api-docs"
/// }
/// ```
#[derive(Serialize, Debug, PartialEq, Deserialize)]
pub struct ApiInfo {
    pub message: String,
    pub version: String,
    pub timestamp: String,
    pub documentation: String,
}

impl ApiInfo {
    pub fn current() -> Self {
        Self {
            message: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now().to_rfc3339(),
            documentation: DOCS_PATH.to_string(),
        }
    }
}

/// # Error Envelope
///
/// Fixed JSON shape for every non-2xx outcome. `success` is always `false`;
/// `details` carries diagnostic information and is serialized only when
/// populated (development environment), otherwise the key is absent.
///
/// ## Example JSON
/// ```json
/// {
///   "success": false,
///   "error": "Route /nonexistent not found",
///   "timestamp": "2024-03-10T15:30:45.123456789Z"
/// }
/// ```
#[derive(Serialize, Debug, PartialEq, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            timestamp: Utc::now().to_rfc3339(),
            details: None,
        }
    }

    /// Envelope for a request that matched no registered route.
    pub fn not_found(path: &str) -> Self {
        Self::new(format!("Route {path} not found"))
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde_json::Value;

    #[test]
    fn test_api_info_payload() {
        let info = ApiInfo::current();

        assert_eq!(info.message, "AI Dev Team API");
        assert_eq!(info.version, "1.0.0");
        assert_eq!(info.documentation, "/api-docs");
        assert!(DateTime::parse_from_rfc3339(&info.timestamp).is_ok());
    }

    #[test]
    fn test_not_found_message_echoes_path() {
        let envelope = ErrorEnvelope::not_found("/api/nonexistent");

        assert!(!envelope.success);
        assert_eq!(envelope.error, "Route /api/nonexistent not found");
        assert!(envelope.details.is_none());
    }

    #[test]
    fn test_details_key_omitted_when_absent() {
        let envelope = ErrorEnvelope::new("Internal server error");
        let json = serde_json::to_value(&envelope).expect("Should serialize to JSON");

        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 3, "details key should be absent");
        assert_eq!(json["success"], Value::Bool(false));
        assert_eq!(json["error"], "Internal server error");
    }

    #[test]
    fn test_details_key_present_when_populated() {
        let envelope = ErrorEnvelope::new("Internal server error").with_details("boom");
        let json = serde_json::to_value(&envelope).expect("Should serialize to JSON");

        assert_eq!(json["details"], "boom");
    }
}
