use crate::config::WhatsAppConfig;
use crate::domain::dispatch::{DispatchFailure, DispatchOutcome, ProviderError};
use crate::domain::lead::LeadInput;
use opentelemetry::{KeyValue, global, metrics::Counter};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

pub mod transport;

use transport::{MessageTransport, OutboundRequest};

pub const MISSING_CREDENTIALS: &str =
    "Missing WhatsApp credentials. Please set WHATSAPP_ACCESS_TOKEN and WHATSAPP_PHONE_NUMBER_ID.";

#[derive(Clone, Debug)]
struct Metrics {
    dispatched_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("leadrelay-server");
        Self {
            dispatched_total: meter
                .u64_counter("leadrelay_messages_dispatched_total")
                .with_description("WhatsApp send attempts by outcome")
                .build(),
        }
    }
}

/// Relays validated leads as WhatsApp text messages.
#[derive(Clone, Debug)]
pub struct WhatsAppDispatcher {
    config: WhatsAppConfig,
    transport: Arc<dyn MessageTransport>,
    metrics: Metrics,
}

impl WhatsAppDispatcher {
    #[must_use]
    pub fn new(config: WhatsAppConfig, transport: Arc<dyn MessageTransport>) -> Self {
        Self { config, transport, metrics: Metrics::new() }
    }

    /// Makes a single send attempt for `lead`.
    ///
    /// Every failure, including transport faults, is reported as
    /// `DispatchOutcome::Failed` rather than an error.
    #[tracing::instrument(skip(self, lead), fields(request_id = tracing::field::Empty))]
    pub async fn dispatch(&self, lead: &LeadInput) -> DispatchOutcome {
        let Some((access_token, phone_number_id)) = self.config.credentials() else {
            tracing::warn!("WhatsApp credentials are not configured");
            self.metrics.dispatched_total.add(1, &[KeyValue::new("status", "unconfigured")]);
            return DispatchOutcome::Failed(DispatchFailure::configuration(MISSING_CREDENTIALS));
        };

        let request_id = Uuid::new_v4();
        tracing::Span::current().record("request_id", tracing::field::display(request_id));

        let request = OutboundRequest {
            url: self.config.messages_url(phone_number_id),
            access_token: access_token.to_string(),
            request_id,
            body: json!({
                "messaging_product": "whatsapp",
                "to": lead.phone_number(),
                "type": "text",
                "text": {
                    "body": format_lead_message(lead)
                }
            }),
        };

        let response = match self.transport.post_json(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "WhatsApp request did not complete");
                self.metrics.dispatched_total.add(1, &[KeyValue::new("status", "transport_error")]);
                let request_id = (!e.never_sent()).then_some(request_id);
                return DispatchOutcome::Failed(DispatchFailure { request_id, ..DispatchFailure::default() });
            }
        };

        if response.status.is_success() {
            tracing::info!(status = %response.status.as_u16(), "WhatsApp message accepted");
            self.metrics.dispatched_total.add(1, &[KeyValue::new("status", "sent")]);
            return DispatchOutcome::Sent { request_id, status: response.status };
        }

        let error = ProviderError::from_response(response.status, &response.body);
        tracing::warn!(
            status = %response.status.as_u16(),
            code = error.code,
            error_type = %error.error_type,
            fbtrace_id = error.fbtrace_id.as_deref().unwrap_or_default(),
            "WhatsApp rejected message"
        );
        self.metrics.dispatched_total.add(1, &[KeyValue::new("status", "rejected")]);

        DispatchOutcome::Failed(DispatchFailure {
            request_id: Some(request_id),
            status: Some(response.status),
            detail: None,
            error: Some(error),
        })
    }
}

/// Renders the text body delivered for a lead. The email line is omitted
/// entirely when no address was given.
#[must_use]
pub fn format_lead_message(lead: &LeadInput) -> String {
    let mut lines = vec![format!("New form registration from {}.", lead.full_name())];
    if let Some(email) = lead.email() {
        lines.push(format!("Email: {email}"));
    }
    lines.push(format!("Phone: {}", lead.phone_number()));
    lines.push(String::new());
    lines.push(lead.message().to_string());
    lines.join("\n")
}
