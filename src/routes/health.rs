//! Health check endpoints

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
    pub active_sessions: usize,
    pub pdf_to_docx: String,
    pub page_size: (i64, i64),
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        service: "docdesk-server",
        active_sessions: state.sessions().session_count().await,
        pdf_to_docx: state.conversions().converter_name().to_string(),
        page_size: state.conversions().page_size().dimensions(),
    })
}
