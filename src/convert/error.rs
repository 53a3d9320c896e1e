//! Conversion error types
//!
//! Every collaborator failure (converter, reader, builder, extractor) is
//! reported through one error type so callers can inspect it uniformly.

use thiserror::Error;

/// Broad failure category shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A PDF → Word or Word → PDF conversion failed
    Conversion,
    /// Text extraction for a preview failed
    Extraction,
    /// The entry acted upon is no longer in the workspace
    NotFound,
}

/// Conversion error type
#[derive(Debug, Error)]
pub enum ConversionError {
    /// PDF to Word converter failed
    #[error("PDF to Word conversion failed: {0}")]
    PdfToDocx(String),

    /// Word reading or PDF building failed
    #[error("Word to PDF conversion failed: {0}")]
    DocxToPdf(String),

    /// PDF text extraction failed
    #[error("Text extraction failed: {0}")]
    Extraction(String),

    /// Scratch file handling failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Blocking task could not be joined
    #[error("Task join error: {0}")]
    Task(String),
}

impl ConversionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ConversionError::Extraction(_) => FailureKind::Extraction,
            _ => FailureKind::Conversion,
        }
    }
}

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConversionError>;

/// Render a caught panic payload as a message
pub(crate) fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "parser panicked".to_string()
    }
}
