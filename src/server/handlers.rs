//! Server HTTP handlers.

use axum::extract::{Query, State};
use axum::Json;

use super::AppState;
use crate::diagnosis::{run_check, CheckReport, CheckRequest};

/// Runs the DKIM and custom-domain checks for the query parameters.
///
/// Accepts `dkim_domain`, `custom_domain` and `custom_domain_ssl`; missing
/// parameters produce an empty list for that check.
pub async fn check_handler(
    State(state): State<AppState>,
    Query(request): Query<CheckRequest>,
) -> Json<CheckReport> {
    log::info!(
        "Check requested: dkim_domain={:?} custom_domain={:?} ssl={}",
        request.dkim_domain,
        request.custom_domain,
        request.ssl_enabled()
    );
    let report = run_check(&*state.client, &request).await;
    log::debug!(
        "Check finished with {} DKIM and {} custom-domain findings",
        report.dkim.len(),
        report.custom_domain.len()
    );
    Json(report)
}

pub async fn health_handler() -> &'static str {
    "ok"
}
