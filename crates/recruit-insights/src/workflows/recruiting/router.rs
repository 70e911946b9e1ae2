use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::export::EXPORT_FILE_NAME;
use super::selection::FilterSelection;
use super::service::{DashboardService, ServiceError};

/// Uploaded export plus the filters to apply to it.
#[derive(Debug, Deserialize)]
pub struct DashboardRequest {
    pub csv: String,
    #[serde(default)]
    pub selection: FilterSelection,
}

/// Router builder exposing the dashboard computations over HTTP.
pub fn dashboard_router(service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/v1/recruiting/report", post(report_handler))
        .route("/api/v1/recruiting/options", post(options_handler))
        .route("/api/v1/recruiting/export", post(export_handler))
        .with_state(service)
}

pub(crate) async fn report_handler(
    State(service): State<Arc<DashboardService>>,
    axum::Json(request): axum::Json<DashboardRequest>,
) -> Response {
    match service.report(request.csv.as_bytes(), &request.selection) {
        Ok(report) => (StatusCode::OK, axum::Json(report.as_ref())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn options_handler(
    State(service): State<Arc<DashboardService>>,
    axum::Json(request): axum::Json<DashboardRequest>,
) -> Response {
    match service.options(request.csv.as_bytes()) {
        Ok(options) => (StatusCode::OK, axum::Json(options)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_handler(
    State(service): State<Arc<DashboardService>>,
    axum::Json(request): axum::Json<DashboardRequest>,
) -> Response {
    match service.export(request.csv.as_bytes(), &request.selection) {
        Ok(bytes) => {
            let disposition = format!("attachment; filename=\"{EXPORT_FILE_NAME}\"");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: ServiceError) -> Response {
    let status = match error {
        ServiceError::Import(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
