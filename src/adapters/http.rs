use crate::services::whatsapp::transport::{
    MessageTransport, OutboundRequest, REQUEST_ID_HEADER, TransportError, TransportResponse,
};
use async_trait::async_trait;

/// Sends provider requests with a shared `reqwest` connection pool.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a transport with the client's default timeouts.
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl MessageTransport for HttpTransport {
    async fn post_json(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(&request.url)
            .bearer_auth(&request.access_token)
            .header(REQUEST_ID_HEADER, request.request_id.to_string())
            .json(&request.body)
            .send()
            .await?;

        let status = response.status();
        // An unreadable body is treated like an unparseable one.
        let body = response.text().await.unwrap_or_default();

        Ok(TransportResponse { status, body })
    }
}
