use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Error object returned by the Graph API on a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderError {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
    pub code: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_subcode: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fbtrace_id: Option<String>,
}

/// Wire shape of the error object. Only `message` is required; the other
/// fields are filled from the HTTP status when absent or mistyped.
#[derive(Debug, Deserialize)]
struct WireProviderError {
    message: String,
    #[serde(rename = "type", default)]
    error_type: Option<Value>,
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    error_subcode: Option<Value>,
    #[serde(default)]
    fbtrace_id: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorEnvelope {
    error: WireProviderError,
}

impl ProviderError {
    /// Extracts the error object from a response body, or synthesizes one from
    /// the HTTP status when the body has no `error.message`.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let fallback = Self::from_status(status);
        let Ok(ProviderErrorEnvelope { error }) = serde_json::from_str::<ProviderErrorEnvelope>(body) else {
            return fallback;
        };

        Self {
            message: error.message,
            error_type: error.error_type.as_ref().and_then(Value::as_str).map_or(fallback.error_type, str::to_string),
            code: error.code.as_ref().and_then(Value::as_i64).unwrap_or(fallback.code),
            error_subcode: error.error_subcode.as_ref().and_then(Value::as_i64),
            fbtrace_id: error.fbtrace_id.as_ref().and_then(Value::as_str).map(str::to_string),
        }
    }

    fn from_status(status: StatusCode) -> Self {
        Self {
            message: status.canonical_reason().unwrap_or("Unknown status").to_string(),
            error_type: "UnknownError".to_string(),
            code: i64::from(status.as_u16()),
            error_subcode: None,
            fbtrace_id: None,
        }
    }
}

/// Result of a single send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent { request_id: Uuid, status: StatusCode },
    Failed(DispatchFailure),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchFailure {
    /// Absent when the request never left the process.
    pub request_id: Option<Uuid>,
    pub status: Option<StatusCode>,
    pub detail: Option<String>,
    pub error: Option<ProviderError>,
}

impl DispatchFailure {
    #[must_use]
    pub fn configuration(detail: impl Into<String>) -> Self {
        Self { detail: Some(detail.into()), ..Self::default() }
    }

    /// The most specific human-readable explanation available, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.detail.as_deref().or_else(|| self.error.as_ref().map(|e| e.message.as_str()))
    }
}

impl DispatchOutcome {
    #[must_use]
    pub const fn request_id(&self) -> Option<Uuid> {
        match self {
            Self::Sent { request_id, .. } => Some(*request_id),
            Self::Failed(failure) => failure.request_id,
        }
    }

    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}
