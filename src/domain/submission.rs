use crate::domain::lead::FieldErrors;
use serde::Serialize;
use uuid::Uuid;

/// Status of the most recent form submission, as shown to the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmissionResult {
    #[default]
    Idle,
    #[serde(rename_all = "camelCase")]
    Success {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        request_id: Option<Uuid>,
    },
    #[serde(rename_all = "camelCase")]
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        field_errors: Option<FieldErrors>,
    },
}

impl SubmissionResult {
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Success { message, .. } | Self::Error { message, .. } => Some(message.as_str()),
        }
    }
}
