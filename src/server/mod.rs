//! HTTP front end for the checks.
//!
//! Provides two endpoints:
//! - `/check` - runs both diagnosers for the query parameters and returns the
//!   findings as JSON
//! - `/health` - liveness probe
//!
//! Every request performs fresh lookups; nothing is shared between requests
//! except the DNS client.

mod handlers;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::dns::DnsClient;

pub use handlers::{check_handler, health_handler};

/// Shared state for the server
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn DnsClient>,
}

impl AppState {
    pub fn new(client: Arc<dyn DnsClient>) -> Self {
        Self { client }
    }
}

/// Builds the router with all endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/check", get(check_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Binds `bind:port` and serves until the process is stopped.
pub async fn start_server(bind: &str, port: u16, state: AppState) -> Result<(), anyhow::Error> {
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", bind, port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind server to {}:{}: {}", bind, port, e))?;

    log::info!("Server listening on http://{}:{}/", bind, port);
    log::info!("  - Check: http://{}:{}/check?dkim_domain=&custom_domain=", bind, port);
    log::info!("  - Health: http://{}:{}/health", bind, port);

    axum::serve(listener, router(state))
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
