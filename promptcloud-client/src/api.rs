//! Request and response bodies of the generation endpoint

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `POST {endpoint}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub instruction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
}

/// Successful response body
///
/// Only `points` is required; the debug artifacts are optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerateResponse {
    pub points: Vec<Vec<f64>>,
    #[serde(default)]
    pub generated_code: Option<String>,
    /// Annotated images keyed by name, each base64 or a URL
    #[serde(default)]
    pub detection_images: Option<BTreeMap<String, String>>,
}

/// Error response body
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_omits_missing_selectors() {
        let body = GenerateRequest {
            instruction: "stack the blocks".to_string(),
            task: None,
            config: None,
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"instruction": "stack the blocks"}));

        let body = GenerateRequest {
            task: Some("battery".to_string()),
            config: Some("config_1".to_string()),
            ..body
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"instruction": "stack the blocks", "task": "battery", "config": "config_1"})
        );
    }

    #[test]
    fn test_optional_response_fields() {
        let response: GenerateResponse = serde_json::from_str(r#"{"points": [[0, 0, 0]]}"#).unwrap();
        assert_eq!(response.points.len(), 1);
        assert!(response.generated_code.is_none());
        assert!(response.detection_images.is_none());
    }

    #[test]
    fn test_error_body_without_message() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.error, None);
    }
}
