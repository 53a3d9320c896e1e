//! Desk routes
//!
//! The server-rendered interface. Actions follow post/redirect/get: each
//! POST runs against the session's workspace, queues notices and redirects
//! back to the desk, which drains them on render.
//!
//! Endpoints:
//! - GET  /                                 - Start a session
//! - GET  /w/:session_id                    - Desk page (`?filter=all|word|pdf`)
//! - POST /w/:session_id/upload             - Multipart upload
//! - POST /w/:session_id/convert            - Batch convert (`?kind=pdf|word`)
//! - GET  /w/:session_id/archive            - ZIP of the filtered entries
//! - POST /w/:session_id/files/:name/convert
//! - POST /w/:session_id/files/:name/delete
//! - GET  /w/:session_id/files/:name/download (`?as=new-name`)
//! - GET  /w/:session_id/files/:name/preview
//! - GET  /w/:session_id/files/:name/text

use axum::{
    extract::{Multipart, Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use super::uploads::read_uploads;
use super::{attachment, DownloadQuery};
use crate::error::{AppError, Result};
use crate::html::{
    render_desk, render_pdf_preview, render_text_preview, render_word_preview, DeskView,
};
use crate::state::AppState;
use crate::workspace::{DocumentKind, FileFilter, Notice, NoticeLevel, Session};

/// Create the desk router, mounted under `/w`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:session_id", get(show_desk))
        .route("/:session_id/upload", post(upload))
        .route("/:session_id/convert", post(convert_batch))
        .route("/:session_id/archive", get(download_archive))
        .route("/:session_id/files/:name/convert", post(convert_one))
        .route("/:session_id/files/:name/delete", post(delete_one))
        .route("/:session_id/files/:name/download", get(download_one))
        .route("/:session_id/files/:name/preview", get(preview))
        .route("/:session_id/files/:name/text", get(text_preview))
}

#[derive(Debug, Deserialize)]
pub struct DeskQuery {
    filter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KindQuery {
    kind: String,
}

fn desk_redirect(session: &Session) -> Redirect {
    Redirect::to(&format!("/w/{}", session.id))
}

/// GET /
///
/// Every visit to the root starts a fresh workspace.
pub async fn start_session(State(state): State<AppState>) -> Redirect {
    let session = state.sessions().create_session().await;
    desk_redirect(&session)
}

/// GET /w/:session_id
async fn show_desk(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<DeskQuery>,
) -> Response {
    let session = match state.session(&session_id).await {
        Ok(session) => session,
        Err(_) => {
            tracing::debug!(session_id = %session_id, "Unknown session, starting over");
            return Redirect::to("/").into_response();
        }
    };

    let mut ws = session.lock().await;

    if let Some(param) = query.filter.as_deref() {
        match FileFilter::from_param(param) {
            Some(filter) => ws.set_filter(filter),
            None => ws.notify(NoticeLevel::Warning, format!("Unknown filter: {}", param)),
        }
    }

    let filter = ws.filter();
    let view = DeskView {
        session_id: session.id.to_string(),
        filter,
        entries: ws.listing(filter),
        notices: ws.drain_notices(),
        total: ws.len(),
        has_pdf: ws.contains_kind(DocumentKind::Pdf),
        has_word: ws.contains_kind(DocumentKind::Word),
    };

    Html(render_desk(&view)).into_response()
}

/// POST /w/:session_id/upload
async fn upload(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    multipart: Multipart,
) -> Result<Redirect> {
    let session = state.session(&session_id).await?;
    let batch = read_uploads(multipart).await?;

    let mut ws = session.lock().await;
    for name in &batch.rejected {
        ws.notify(
            NoticeLevel::Warning,
            format!("Skipped {}: only PDF and Word (.docx) files are accepted", name),
        );
    }

    let rejected = batch.rejected.len();
    let uploaded = ws.ingest(batch.accepted);
    if uploaded > 0 {
        ws.notify(
            NoticeLevel::Success,
            format!("{} file(s) uploaded successfully", uploaded),
        );
    }

    tracing::info!(
        session_id = %session.id,
        uploaded = uploaded,
        rejected = rejected,
        "Upload processed"
    );

    Ok(desk_redirect(&session))
}

/// POST /w/:session_id/convert?kind=pdf|word
async fn convert_batch(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<KindQuery>,
) -> Result<Redirect> {
    let kind = DocumentKind::from_param(&query.kind)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown document kind: {}", query.kind)))?;
    let session = state.session(&session_id).await?;

    let mut ws = session.lock().await;
    let report = ws.convert_all(kind, state.conversions()).await;

    for failure in &report.failed {
        ws.notify(
            NoticeLevel::Error,
            format!("Could not convert {}: {}", failure.name, failure.message),
        );
    }

    let message = match kind {
        DocumentKind::Pdf => format!(
            "Word conversion completed for {} file(s)",
            report.converted_count()
        ),
        DocumentKind::Word => format!(
            "PDF conversion completed for {} Word document(s)",
            report.converted_count()
        ),
    };
    ws.notify(NoticeLevel::Success, message);

    Ok(desk_redirect(&session))
}

/// POST /w/:session_id/files/:name/convert
async fn convert_one(
    State(state): State<AppState>,
    Path((session_id, name)): Path<(String, String)>,
) -> Result<Redirect> {
    let session = state.session(&session_id).await?;
    let mut ws = session.lock().await;

    match ws.convert(&name, state.conversions()).await {
        Ok(derived) => ws.notify(
            NoticeLevel::Success,
            format!("Conversion completed: {}", derived),
        ),
        Err(e) => ws.notify(NoticeLevel::Error, e.to_string()),
    }

    Ok(desk_redirect(&session))
}

/// POST /w/:session_id/files/:name/delete
async fn delete_one(
    State(state): State<AppState>,
    Path((session_id, name)): Path<(String, String)>,
) -> Result<Redirect> {
    let session = state.session(&session_id).await?;
    let mut ws = session.lock().await;

    match ws.delete(&name) {
        Ok(entry) => ws.notify(
            NoticeLevel::Success,
            format!("File {} deleted", entry.name),
        ),
        Err(e) => ws.notify(NoticeLevel::Error, e.to_string()),
    }

    Ok(desk_redirect(&session))
}

/// GET /w/:session_id/files/:name/download?as=
async fn download_one(
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

/// GET /w/:session_id/files/:name/preview
async fn preview(
    State(state): State<AppState>,
    Path((session_id, name)): Path<(String, String)>,
) -> Result<Html<String>> {
    let session = state.session(&session_id).await?;
    let sid = session.id.to_string();
    let ws = session.lock().await;
    let entry = ws.require(&name)?;

    let html = match entry.kind {
        DocumentKind::Pdf => render_pdf_preview(&sid, &entry.name, &entry.data),
        DocumentKind::Word => match ws.word_paragraphs(&name, state.conversions()).await {
            Ok(paragraphs) => render_word_preview(&sid, &entry.name, &paragraphs, &[]),
            Err(e) => {
                tracing::warn!(file_name = %name, error = %e, "Word preview failed");
                let notice = Notice {
                    level: NoticeLevel::Error,
                    message: format!("Could not show Word content: {}", e),
                };
                render_word_preview(&sid, &entry.name, &[], &[notice])
            }
        },
    };

    Ok(Html(html))
}

/// GET /w/:session_id/files/:name/text
async fn text_preview(
    State(state): State<AppState>,
    Path((session_id, name)): Path<(String, String)>,
) -> Result<Html<String>> {
    let session = state.session(&session_id).await?;
    let sid = session.id.to_string();
    let ws = session.lock().await;
    ws.require(&name)?;

    let (text, notices) = match ws.pdf_text(&name, state.conversions()).await {
        Ok(text) => (text, Vec::new()),
        Err(e) => {
            tracing::warn!(file_name = %name, error = %e, "Text preview failed");
            let notice = Notice {
                level: NoticeLevel::Error,
                message: format!("Could not extract text from the PDF: {}", e),
            };
            (String::new(), vec![notice])
        }
    };

    Ok(Html(render_text_preview(&sid, &name, &text, &notices)))
}

/// GET /w/:session_id/archive
///
/// Archives the entries matching the workspace's current filter.
async fn download_archive(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Response> {
    let session = state.session(&session_id).await?;
    let mut ws = session.lock().await;
    let filter = ws.filter();

    match ws.export(filter)? {
        Some(archive) => attachment(archive.data, "application/zip", archive.file_name),
        None => {
            ws.notify(
                NoticeLevel::Info,
                format!("No {} files to download.", filter.label().to_lowercase()),
            );
            Ok(desk_redirect(&session).into_response())
        }
    }
}
