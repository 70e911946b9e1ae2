use std::sync::Arc;
use std::time::Duration;

use axum::response::Response;
use axum::Router;
use serde_json::Value;

use crate::config::AnalyticsConfig;
use crate::workflows::recruiting::{dashboard_router, DashboardService};

pub(super) const PIPELINE_EXPORT: &str = "\
candidate_id,application_date,offer_date,application_year,application_month,department,level,position,source,process_state,offer_accepted,hiring_duration_days,recruitment_cost
c-001,2024-01-08,2024-02-01,2024,2024-01,Engineering,Senior,Backend Engineer,Referral,Offer accepted,true,24,1800
c-002,2024-01-19,,2024,2024-01,Engineering,Junior,QA Analyst,LinkedIn,Interview,,,
c-003,2024-02-02,2024-03-04,2024,2024-02,Sales,Mid,Account Executive,LinkedIn,Offer accepted,true,31,950
c-004,2024-02-14,2024-03-01,2024,2024-02,Sales,Mid,Account Executive,Job board,Offer declined,false,,400
c-005,2023-11-03,2023-12-05,2023,2023-11,Engineering,Senior,Data Engineer,Referral,Offer accepted,true,32,2100
c-006,2023-12-12,,2023,2023-12,,Junior,Support Agent,Job board,Screening,,,
";

pub(super) fn analytics_config() -> AnalyticsConfig {
    AnalyticsConfig {
        report_cache_ttl: Duration::from_secs(60),
        report_cache_entries: 8,
        ..AnalyticsConfig::default()
    }
}

pub(super) fn build_service() -> Arc<DashboardService> {
    Arc::new(DashboardService::new(&analytics_config()))
}

pub(super) fn router_with_service(service: Arc<DashboardService>) -> Router {
    dashboard_router(service)
}

pub(super) fn request_body(csv: &str, selection: Value) -> axum::body::Body {
    let payload = serde_json::json!({
        "csv": csv,
        "selection": selection,
    });
    axum::body::Body::from(serde_json::to_vec(&payload).expect("serialize request"))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
