use crate::config::WhatsAppConfig;
use opentelemetry::{KeyValue, global, metrics::Gauge};

#[derive(Clone, Debug)]
pub struct Metrics {
    pub status: Gauge<i64>,
}

impl Metrics {
    #[must_use]
    pub(crate) fn new() -> Self {
        let meter = global::meter("leadrelay-server");
        Self {
            status: meter
                .i64_gauge("leadrelay_health_status")
                .with_description("Status of health checks (1 for ok, 0 for error)")
                .build(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub struct HealthService {
    whatsapp: WhatsAppConfig,
    metrics: Metrics,
}

impl HealthService {
    #[must_use]
    pub fn new(whatsapp: WhatsAppConfig) -> Self {
        Self { whatsapp, metrics: Metrics::new() }
    }

    /// Checks that the provider credentials needed to relay leads are present.
    ///
    /// # Errors
    /// Returns a string describing the missing configuration.
    pub fn check_whatsapp(&self) -> Result<(), String> {
        if self.whatsapp.credentials().is_some() {
            self.metrics.status.record(1, &[KeyValue::new("component", "whatsapp")]);
            Ok(())
        } else {
            self.metrics.status.record(0, &[KeyValue::new("component", "whatsapp")]);
            Err("WhatsApp access token or phone number id is not configured".to_string())
        }
    }
}
