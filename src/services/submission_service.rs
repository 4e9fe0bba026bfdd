use crate::domain::dispatch::DispatchOutcome;
use crate::domain::lead::{RawLeadForm, validate};
use crate::domain::submission::SubmissionResult;
use crate::services::view::ViewInvalidator;
use crate::services::whatsapp::WhatsAppDispatcher;
use opentelemetry::{KeyValue, global, metrics::Counter};
use std::sync::Arc;

pub const VALIDATION_FAILED: &str = "Please fix the errors below.";
pub const DISPATCH_FALLBACK: &str = "Unable to send message. Try again later.";
pub const DISPATCH_CONFIRMED: &str = "WhatsApp message sent successfully.";

/// Path of the page that reflects submissions.
pub const FORM_PAGE_PATH: &str = "/";

#[derive(Clone, Debug)]
struct Metrics {
    submissions_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("leadrelay-server");
        Self {
            submissions_total: meter
                .u64_counter("leadrelay_submissions_total")
                .with_description("Form submissions by outcome")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SubmissionService {
    dispatcher: WhatsAppDispatcher,
    view: Arc<dyn ViewInvalidator>,
    metrics: Metrics,
}

impl SubmissionService {
    #[must_use]
    pub fn new(dispatcher: WhatsAppDispatcher, view: Arc<dyn ViewInvalidator>) -> Self {
        Self { dispatcher, view, metrics: Metrics::new() }
    }

    /// Validates the form and, if it is valid, relays it as one WhatsApp message.
    ///
    /// The previous result is discarded; every call produces a fresh result.
    #[tracing::instrument(skip_all)]
    pub async fn submit(&self, _previous: &SubmissionResult, form: RawLeadForm) -> SubmissionResult {
        let lead = match validate(&form) {
            Ok(lead) => lead,
            Err(field_errors) => {
                tracing::debug!(fields = ?field_errors.fields().map(|f| f.as_str()).collect::<Vec<_>>(), "Lead rejected");
                self.metrics.submissions_total.add(1, &[KeyValue::new("outcome", "invalid")]);
                return SubmissionResult::Error {
                    message: VALIDATION_FAILED.to_string(),
                    field_errors: Some(field_errors),
                };
            }
        };

        match self.dispatcher.dispatch(&lead).await {
            DispatchOutcome::Failed(failure) => {
                self.metrics.submissions_total.add(1, &[KeyValue::new("outcome", "failed")]);
                SubmissionResult::Error {
                    message: failure.message().unwrap_or(DISPATCH_FALLBACK).to_string(),
                    field_errors: None,
                }
            }
            DispatchOutcome::Sent { request_id, .. } => {
                self.view.invalidate(FORM_PAGE_PATH);
                self.metrics.submissions_total.add(1, &[KeyValue::new("outcome", "sent")]);
                SubmissionResult::Success { message: DISPATCH_CONFIRMED.to_string(), request_id: Some(request_id) }
            }
        }
    }
}
