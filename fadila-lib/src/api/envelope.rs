//! JSON response envelope

use serde::Deserialize;
use serde::Serialize;

use crate::error::ApiError;

/// Wrapper around every school API payload.
///
/// Success: `{ "success": true, "data": ... }`
/// Failure: `{ "success": false, "error": "..." }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Creates a successful envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Creates a failed envelope.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Unwraps the payload, mapping `success: false` to [`ApiError::Remote`].
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            let message = self
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(ApiError::Remote(message));
        }
        self.data
            .ok_or_else(|| ApiError::parse("successful envelope without data"))
    }
}

impl<T: serde::de::DeserializeOwned> ApiEnvelope<T> {
    /// Parses an envelope from a raw body.
    pub fn from_body(body: &str) -> Result<Self, ApiError> {
        serde_json::from_str(body).map_err(|e| ApiError::parse_with_body(e.to_string(), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fadila_ui::Record;

    #[test]
    fn test_success_envelope() {
        let body = r#"{"success":true,"data":[{"id":1,"class":"1AP"},{"id":2,"class":"2AP"}]}"#;
        let records = ApiEnvelope::<Vec<Record>>::from_body(body)
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("class").unwrap().to_string(), "2AP");
    }

    #[test]
    fn test_failure_envelope() {
        let body = r#"{"success":false,"error":"database offline"}"#;
        let err = ApiEnvelope::<Vec<Record>>::from_body(body)
            .unwrap()
            .into_result()
            .unwrap_err();
        assert!(matches!(err, ApiError::Remote(ref m) if m == "database offline"));
    }

    #[test]
    fn test_failure_without_message() {
        let err = ApiEnvelope::<u32>::from_body(r#"{"success":false}"#)
            .unwrap()
            .into_result()
            .unwrap_err();
        assert!(matches!(err, ApiError::Remote(ref m) if m == "unknown error"));
    }

    #[test]
    fn test_success_without_data_is_parse_error() {
        let err = ApiEnvelope::<u32>::from_body(r#"{"success":true}"#)
            .unwrap()
            .into_result()
            .unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
    }

    #[test]
    fn test_malformed_body_keeps_raw_text() {
        let err = ApiEnvelope::<u32>::from_body("<html>").unwrap_err();
        match err {
            ApiError::Parse { body, .. } => assert_eq!(body.as_deref(), Some("<html>")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let json = serde_json::to_string(&ApiEnvelope::ok(3)).unwrap();
        assert_eq!(json, r#"{"success":true,"data":3}"#);
    }
}
