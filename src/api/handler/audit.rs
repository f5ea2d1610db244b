use crate::api::error::ApiError;
use crate::config::Config;
use crate::models::{
    AppState, AuditReport, AuditResponse, AuditStatus, ParamsRunAudit, PerformanceTrace,
};
use crate::services::{Auditor, SettlePolicy, TraceSource};
use crate::utils::archive_report;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::Utc;
use log::info;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Server settle policy with per-request overrides applied.
pub fn settle_policy(
    config: &Config,
    settle_ms: Option<u64>,
    expected_entry_types: Option<usize>,
) -> SettlePolicy {
    let mut policy = config.settle.clone();
    if let Some(ms) = settle_ms {
        policy.delay = Duration::from_millis(ms);
    }
    if expected_entry_types.is_some() {
        policy.expected_entry_types = expected_entry_types;
    }
    policy
}

pub fn overlay_url(id: &Uuid) -> String {
    format!("/audit/{}/overlay", id)
}

pub fn completed_response(report: AuditReport) -> AuditResponse {
    AuditResponse {
        status: AuditStatus::Completed,
        message: format!("Performance audit completed with score {}/100", report.score),
        timestamp: report.timestamp.to_rfc3339(),
        overlay_url: Some(overlay_url(&report.id)),
        report: Some(report),
    }
}

/// Rejection for an audit request that does not name its page.
pub fn missing_url_response(message: &str) -> (StatusCode, Json<AuditResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(AuditResponse {
            status: AuditStatus::Error,
            message: message.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            report: None,
            overlay_url: None,
        }),
    )
}

pub async fn finalize_report(state: &AppState, report: &AuditReport) {
    if let Some(dir) = &state.config.report_dir {
        archive_report(dir, report).await;
    }
}

pub async fn run_audit_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ParamsRunAudit>,
    Json(trace): Json<PerformanceTrace>,
) -> (StatusCode, Json<AuditResponse>) {
    info!("Started audit handler for url: {}", trace.url);

    if trace.url.trim().is_empty() {
        return missing_url_response("Trace is missing the page url");
    }

    let policy = settle_policy(&state.config, params.settle_ms, params.expected_entry_types);
    let auditor = Auditor::new(Arc::new(TraceSource::new(trace)))
        .with_policy(policy)
        .with_sink(Arc::new(state.overlays.clone()));

    let report = auditor.run_audit().await;
    finalize_report(&state, &report).await;

    (StatusCode::OK, Json(completed_response(report)))
}

pub async fn get_overlay_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, ApiError> {
    state
        .overlays
        .get(&id)
        .map(Html)
        .ok_or(ApiError::OverlayNotFound(id))
}

pub async fn dismiss_overlay_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.overlays.dismiss(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::OverlayNotFound(id))
    }
}
