#![allow(dead_code)]
use leadrelay_server::AppBuilder;
use leadrelay_server::config::{Config, ServerConfig, TelemetryConfig, WhatsAppConfig};
use leadrelay_server::services::whatsapp::transport::MessageTransport;
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("leadrelay_server=debug".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap())
            .add_directive("httpmock=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().init();
    });
}

pub fn get_test_config(api_base: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            mgmt_port: 0,
            shutdown_timeout_secs: 1,
        },
        whatsapp: WhatsAppConfig {
            access_token: Some("test-token".to_string()),
            phone_number_id: Some("1234567890".to_string()),
            api_base: api_base.to_string(),
            api_version: "v19.0".to_string(),
        },
        telemetry: TelemetryConfig::default(),
    }
}

pub struct TestApp {
    pub server_url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn(api_base: &str) -> Self {
        Self::spawn_with_config(get_test_config(api_base)).await
    }

    pub async fn spawn_with_config(config: Config) -> Self {
        Self::start(AppBuilder::new(config)).await
    }

    pub async fn spawn_with_transport(config: Config, transport: Arc<dyn MessageTransport>) -> Self {
        Self::start(AppBuilder::new(config).with_transport(transport)).await
    }

    async fn start(builder: AppBuilder) -> Self {
        setup_tracing();
        let app = builder.build().expect("Failed to build app");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mgmt_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server_url = format!("http://{}", listener.local_addr().unwrap());
        let mgmt_url = format!("http://{}", mgmt_listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(listener, app.router).await.unwrap();
        });
        tokio::spawn(async move {
            axum::serve(mgmt_listener, app.mgmt_router).await.unwrap();
        });

        Self { server_url, mgmt_url, client: reqwest::Client::new() }
    }

    pub async fn post_lead(&self, form: &[(&str, &str)]) -> reqwest::Response {
        self.client.post(format!("{}/leads", self.server_url)).form(form).send().await.unwrap()
    }
}
