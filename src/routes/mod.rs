//! Route modules for the DocDesk server

pub mod api;
pub mod desk;
pub mod health;
pub mod uploads;

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
};
use serde::Deserialize;

use crate::error::{AppError, Result};

/// `?as=` override of the download name
#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    #[serde(rename = "as")]
    pub download_as: Option<String>,
}

impl DownloadQuery {
    /// The requested name, or `stored` when none (or a blank one) was given
    pub fn file_name<'a>(&'a self, stored: &'a str) -> &'a str {
        self.download_as
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(stored)
    }
}

/// Respond with `data` as a file download
pub(crate) fn attachment(
    data: impl Into<Body>,
    content_type: &str,
    file_name: &str,
) -> Result<Response> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, content_disposition(file_name))
        .body(data.into())
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// `attachment` disposition with an ASCII fallback and the RFC 5987 UTF-8 name
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c == ' ' || c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(file_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_name_override() {
        let query = DownloadQuery {
            download_as: Some("  final.pdf ".to_string()),
        };
        assert_eq!(query.file_name("draft.pdf"), "final.pdf");

        let blank = DownloadQuery {
            download_as: Some("   ".to_string()),
        };
        assert_eq!(blank.file_name("draft.pdf"), "draft.pdf");
        assert_eq!(DownloadQuery::default().file_name("draft.pdf"), "draft.pdf");
    }

    #[test]
    fn test_content_disposition() {
        assert_eq!(
            content_disposition("report.pdf"),
            "attachment; filename=\"report.pdf\"; filename*=UTF-8''report.pdf"
        );
        assert_eq!(
            content_disposition("año \"1\".docx"),
            "attachment; filename=\"a_o _1_.docx\"; filename*=UTF-8''a%C3%B1o%20%221%22.docx"
        );
    }
}
