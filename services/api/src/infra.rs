use layoff_trends::pipeline::{LayoffPipeline, ReportKind};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) pipeline: Arc<LayoffPipeline>,
}

pub(crate) fn parse_report(raw: &str) -> Result<ReportKind, String> {
    raw.parse::<ReportKind>().map_err(|err| {
        let known = ReportKind::ordered()
            .iter()
            .map(|kind| kind.slug())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{err} (expected one of: {known})")
    })
}
