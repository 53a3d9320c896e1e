//! Session API Routes
//!
//! JSON access to the same workspace operations the desk offers.
//!
//! Endpoints:
//! - POST   /api/v1/sessions                              - Create a session
//! - DELETE /api/v1/sessions/:session_id                  - End a session
//! - GET    /api/v1/sessions/:session_id/files            - List entries
//! - POST   /api/v1/sessions/:session_id/files            - Multipart upload
//! - GET    /api/v1/sessions/:session_id/files/:name      - Download one entry
//! - DELETE /api/v1/sessions/:session_id/files/:name      - Delete one entry
//! - POST   /api/v1/sessions/:session_id/files/:name/convert
//! - POST   /api/v1/sessions/:session_id/convert          - Batch convert by kind
//! - GET    /api/v1/sessions/:session_id/archive          - ZIP of the filtered entries

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::uploads::read_uploads;
use super::{attachment, DownloadQuery};
use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::workspace::{BatchReport, DocumentKind, EntryView, FileFilter, SessionError, Workspace};

// ============================================================================
// Router
// ============================================================================

/// Create the session API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/:session_id", delete(end_session))
        .route("/:session_id/files", get(list_files).post(upload_files))
        .route(
            "/:session_id/files/:name",
            get(download_file).delete(delete_file),
        )
        .route("/:session_id/files/:name/convert", post(convert_file))
        .route("/:session_id/convert", post(convert_batch))
        .route("/:session_id/archive", get(download_archive))
}

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub desk_url: String,
}

#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    filter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KindQuery {
    kind: String,
}

#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub filter: FileFilter,
    pub total: usize,
    pub files: Vec<EntryView>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub uploaded: usize,
    pub rejected: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub source: String,
    pub derived: String,
}

/// The filter named by `?filter=`, or the workspace's own when absent
fn resolve_filter(query: &FilterQuery, ws: &Workspace) -> Result<FileFilter> {
    match query.filter.as_deref() {
        Some(param) => FileFilter::from_param(param)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown filter: {}", param))),
        None => Ok(ws.filter()),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/sessions
async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.sessions().create_session().await;

    (
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id: session.id,
            created_at: session.created_at,
            desk_url: format!("/w/{}", session.id),
        }),
    )
}

/// DELETE /api/v1/sessions/:session_id
async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode> {
    let id = Uuid::parse_str(&session_id).map_err(|_| SessionError::NotFound(session_id.clone()))?;
    state.sessions().end_session(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:session_id/files?filter=
async fn list_files(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<FileListResponse>> {
    let session = state.session(&session_id).await?;
    let ws = session.lock().await;
    let filter = resolve_filter(&query, &ws)?;

    Ok(Json(FileListResponse {
        filter,
        total: ws.len(),
        files: ws.listing(filter),
    }))
}

/// POST /api/v1/sessions/:session_id/files
async fn upload_files(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let session = state.session(&session_id).await?;
    let batch = read_uploads(multipart).await?;

    let uploaded = session.lock().await.ingest(batch.accepted);

    tracing::info!(
        session_id = %session.id,
        uploaded = uploaded,
        rejected = batch.rejected.len(),
        "Upload processed"
    );

    Ok(Json(UploadResponse {
        uploaded,
        rejected: batch.rejected,
    }))
}

/// GET /api/v1/sessions/:session_id/files/:name?as=
async fn download_file(
    State(state): State<AppState>,
    Path((session_id, name)): Path<(String, String)>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response> {
    let session = state.session(&session_id).await?;
    let ws = session.lock().await;
    let entry = ws.require(&name)?;

    attachment(
        entry.data.clone(),
        "application/octet-stream",
        query.file_name(&entry.name),
    )
}

/// DELETE /api/v1/sessions/:session_id/files/:name
async fn delete_file(
    State(state): State<AppState>,
    Path((session_id, name)): Path<(String, String)>,
) -> Result<StatusCode> {
    let session = state.session(&session_id).await?;
    session.lock().await.delete(&name)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:session_id/files/:name/convert
async fn convert_file(
    State(state): State<AppState>,
    Path((session_id, name)): Path<(String, String)>,
) -> Result<Json<ConvertResponse>> {
    let session = state.session(&session_id).await?;
    let derived = session
        .lock()
        .await
        .convert(&name, state.conversions())
        .await?;

    Ok(Json(ConvertResponse {
        source: name,
        derived,
    }))
}

/// POST /api/v1/sessions/:session_id/convert?kind=pdf|word
async fn convert_batch(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<KindQuery>,
) -> Result<Json<BatchReport>> {
    let kind = DocumentKind::from_param(&query.kind)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown document kind: {}", query.kind)))?;
    let session = state.session(&session_id).await?;

    let report = session
        .lock()
        .await
        .convert_all(kind, state.conversions())
        .await;

    Ok(Json(report))
}

/// GET /api/v1/sessions/:session_id/archive?filter=
async fn download_archive(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<FilterQuery>,
) -> Result<Response> {
    let session = state.session(&session_id).await?;
    let ws = session.lock().await;
    let filter = resolve_filter(&query, &ws)?;

    match ws.export(filter)? {
        Some(archive) => attachment(archive.data, "application/zip", archive.file_name),
        None => Err(AppError::NotFound(format!(
            "No {} files to export",
            filter.label().to_lowercase()
        ))),
    }
}
