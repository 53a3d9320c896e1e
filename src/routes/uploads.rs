//! Multipart intake shared by the desk and the JSON API

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;

use crate::error::{AppError, Result};
use crate::workspace::is_supported_upload;

/// Files read from one multipart request
#[derive(Debug, Default)]
pub struct UploadBatch {
    /// Name and content of every accepted file, in submission order
    pub accepted: Vec<(String, Bytes)>,
    /// Names skipped for carrying an unsupported extension
    pub rejected: Vec<String>,
}

/// Read every file part of a multipart body.
///
/// Parts without a file name (plain form fields, or an empty file input)
/// are ignored.
pub async fn read_uploads(mut multipart: Multipart) -> Result<UploadBatch> {
    let mut batch = UploadBatch::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Invalid multipart body", e))?
    {
        let file_name = match field.file_name().map(base_name) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };

        if !is_supported_upload(&file_name) {
            tracing::debug!(file_name = %file_name, "Skipping unsupported upload");
            batch.rejected.push(file_name);
            continue;
        }

        let data = field.bytes().await.map_err(|e| {
            tracing::error!("Failed to read file data: {}", e);
            multipart_error(&format!("Failed to read {}", file_name), e)
        })?;

        tracing::debug!(file_name = %file_name, size = data.len(), "Read upload");
        batch.accepted.push((file_name, data));
    }

    Ok(batch)
}

/// Map a multipart failure to 413 when the body limit was hit, 400 otherwise
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    let message = format!("{}: {}", context, err.body_text());
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::BadRequest(message)
    }
}

/// Strip any client-side directory from a submitted file name
fn base_name(name: &str) -> &str {
    name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("report.pdf"), "report.pdf");
        assert_eq!(base_name("C:\\docs\\report.pdf"), "report.pdf");
        assert_eq!(base_name("a/b/notes.docx"), "notes.docx");
    }
}
