use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use layoff_trends::error::AppError;
use layoff_trends::pipeline::{LayoffReport, ReportKind};
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;

#[derive(Debug, Deserialize)]
pub(crate) struct LayoffReportRequest {
    pub(crate) csv: String,
    #[serde(default)]
    pub(crate) reports: Vec<String>,
}

pub(crate) fn layoff_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/layoffs/report", post(layoff_report_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn layoff_report_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<LayoffReportRequest>,
) -> Result<Json<LayoffReport>, AppError> {
    let LayoffReportRequest { csv, reports } = payload;
    let reports = reports
        .iter()
        .map(|slug| slug.parse::<ReportKind>())
        .collect::<Result<Vec<_>, _>>()?;

    let reader = Cursor::new(csv.into_bytes());
    let report = state.pipeline.run_reader(reader, &reports)?;

    Ok(Json(report))
}
