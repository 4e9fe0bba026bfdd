use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub whatsapp: WhatsAppConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "LEADRELAY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the public form and submission endpoints
    #[arg(long, env = "LEADRELAY_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for the liveness and readiness probes
    #[arg(long, env = "LEADRELAY_MGMT_PORT", default_value_t = 9090)]
    pub mgmt_port: u16,

    /// How long to wait for in-flight requests during shutdown
    #[arg(long, env = "LEADRELAY_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,
}

/// Credentials and endpoint for the WhatsApp Cloud API.
///
/// Both credentials are optional at startup. A missing value is reported on
/// every submission instead of preventing the server from booting.
#[derive(Clone, Debug, Args)]
pub struct WhatsAppConfig {
    /// Bearer token used to authenticate against the Graph API
    #[arg(long, env = "WHATSAPP_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Sender phone number id that messages are sent from
    #[arg(long, env = "WHATSAPP_PHONE_NUMBER_ID")]
    pub phone_number_id: Option<String>,

    /// Base URL of the Graph API
    #[arg(long, env = "WHATSAPP_API_BASE", default_value = "https://graph.facebook.com")]
    pub api_base: String,

    /// Graph API version segment
    #[arg(long, env = "WHATSAPP_API_VERSION", default_value = "v19.0")]
    pub api_version: String,
}

impl WhatsAppConfig {
    /// Returns the token and sender id if both are present and non-blank.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let token = self.access_token.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
        let sender = self.phone_number_id.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
        Some((token, sender))
    }

    #[must_use]
    pub fn messages_url(&self, phone_number_id: &str) -> String {
        format!(
            "{}/{}/{}/messages",
            self.api_base.trim_end_matches('/'),
            self.api_version.trim_matches('/'),
            phone_number_id
        )
    }
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            phone_number_id: None,
            api_base: "https://graph.facebook.com".to_string(),
            api_version: "v19.0".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Default, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "LEADRELAY_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OTLP collector endpoint; traces and metrics are only exported when set
    #[arg(long, env = "LEADRELAY_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        Self::parse()
    }
}
