#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

use crate::adapters::http::HttpTransport;
use crate::adapters::page_cache::PageCache;
use crate::api::{AppState, MgmtState};
use crate::config::Config;
use crate::services::health_service::HealthService;
use crate::services::submission_service::SubmissionService;
use crate::services::whatsapp::WhatsAppDispatcher;
use crate::services::whatsapp::transport::MessageTransport;
use std::sync::Arc;
use tokio::sync::watch;

pub mod adapters;
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod telemetry;

/// The wired routers for the public and management listeners.
#[derive(Debug)]
pub struct App {
    pub router: axum::Router,
    pub mgmt_router: axum::Router,
}

#[derive(Debug)]
pub struct AppBuilder {
    config: Config,
    transport: Option<Arc<dyn MessageTransport>>,
}

impl AppBuilder {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config, transport: None }
    }

    /// Overrides the HTTP transport used to reach the messaging provider.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn MessageTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Wires services into routers.
    ///
    /// # Errors
    /// Returns an error if the default HTTP transport cannot be constructed.
    pub fn build(self) -> anyhow::Result<App> {
        let transport: Arc<dyn MessageTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new()?),
        };

        let page_cache = Arc::new(PageCache::new());
        let dispatcher = WhatsAppDispatcher::new(self.config.whatsapp.clone(), transport);
        let view = Arc::clone(&page_cache);
        let submission_service = SubmissionService::new(dispatcher, view);
        let health_service = HealthService::new(self.config.whatsapp);

        Ok(App {
            router: api::app_router(AppState { submission_service, page_cache }),
            mgmt_router: api::mgmt_router(MgmtState { health_service }),
        })
    }
}

/// Flips the shutdown channel on SIGINT or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to listen for SIGTERM");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });
}

/// Routes panics through tracing so they reach the configured log sink.
pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info.location().map(ToString::to_string).unwrap_or_default();
        tracing::error!(panic = %info, location = %location, "Panic occurred");
    }));
}
