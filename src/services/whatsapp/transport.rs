use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Raised by transports not built on `reqwest` when no connection could be made.
    #[error("Connection failed: {0}")]
    Connection(String),
}

impl TransportError {
    /// Whether the request is known not to have left the process.
    #[must_use]
    pub fn never_sent(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_builder(),
            Self::Connection(_) => true,
        }
    }
}

/// A fully prepared JSON POST to the messaging provider.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub url: String,
    pub access_token: String,
    pub request_id: Uuid,
    pub body: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

#[async_trait]
pub trait MessageTransport: Send + Sync + std::fmt::Debug {
    /// Performs exactly one POST and reports whatever terminal status came back.
    ///
    /// # Errors
    /// Returns `TransportError` if no HTTP response was received.
    async fn post_json(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError>;
}
