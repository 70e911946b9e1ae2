use metrics_exporter_prometheus::PrometheusHandle;
use recruit_insights::config::AnalyticsConfig;
use recruit_insights::workflows::recruiting::DashboardService;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn dashboard_service(config: &AnalyticsConfig) -> Arc<DashboardService> {
    Arc::new(DashboardService::new(config))
}
