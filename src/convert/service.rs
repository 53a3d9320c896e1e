//! Conversion service
//!
//! Single entry point used by the workspace for every collaborator call.
//! CPU-bound work runs on the blocking pool; every method returns a
//! `Result` so callers handle failures the same way.

use std::sync::Arc;

use axum::body::Bytes;

use super::docx::read_paragraphs;
use super::error::{ConversionError, Result};
use super::extract::extract_text;
use super::pdf_to_docx::{CommandConverter, PdfToDocx, TextLayoutConverter};
use super::pdf_writer::{build_pdf, PageSize};
use super::scratch::ScratchPair;
use crate::config::ConversionConfig;

#[derive(Clone)]
pub struct ConversionService {
    pdf_to_docx: Arc<dyn PdfToDocx>,
    page_size: PageSize,
}

impl ConversionService {
    pub fn new(pdf_to_docx: Arc<dyn PdfToDocx>, page_size: PageSize) -> Self {
        Self {
            pdf_to_docx,
            page_size,
        }
    }

    /// Pick the PDF → Word converter from configuration
    pub fn from_config(config: &ConversionConfig) -> Self {
        let converter: Arc<dyn PdfToDocx> = match config
            .pdf_to_docx_command
            .as_deref()
            .and_then(CommandConverter::from_template)
        {
            Some(command) => Arc::new(command),
            None => Arc::new(TextLayoutConverter),
        };

        tracing::info!(
            converter = %converter.name(),
            page_size = ?config.page_size,
            "Conversion service configured"
        );

        Self::new(converter, config.page_size)
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Name of the configured PDF → Word converter
    pub fn converter_name(&self) -> &str {
        self.pdf_to_docx.name()
    }

    /// PDF → DOCX through a scratch file pair that is removed on every path
    pub async fn pdf_to_docx(&self, pdf: Bytes) -> Result<Vec<u8>> {
        let scratch = ScratchPair::with_input(&pdf, "pdf", "docx")?;

        self.pdf_to_docx
            .convert(scratch.input(), scratch.output())
            .await?;

        let docx = scratch.read_output().map_err(|e| {
            ConversionError::PdfToDocx(format!("converter output unreadable: {}", e))
        })?;

        tracing::debug!(
            converter = %self.pdf_to_docx.name(),
            input_size = pdf.len(),
            output_size = docx.len(),
            "PDF converted to DOCX"
        );

        Ok(docx)
    }

    /// DOCX → PDF: non-empty paragraphs re-laid out as plain text
    pub async fn docx_to_pdf(&self, docx: Bytes) -> Result<Vec<u8>> {
        let page_size = self.page_size;

        tokio::task::spawn_blocking(move || {
            let paragraphs = read_paragraphs(&docx).map_err(ConversionError::DocxToPdf)?;
            let flowables: Vec<String> = paragraphs
                .into_iter()
                .filter(|p| !p.trim().is_empty())
                .collect();
            build_pdf(page_size, &flowables)
        })
        .await
        .map_err(|e| ConversionError::Task(e.to_string()))?
    }

    /// Non-empty paragraph texts of a Word document, for preview
    pub async fn docx_paragraphs(&self, docx: Bytes) -> Result<Vec<String>> {
        tokio::task::spawn_blocking(move || {
            let paragraphs = read_paragraphs(&docx).map_err(ConversionError::Extraction)?;
            Ok(paragraphs
                .into_iter()
                .filter(|p| !p.trim().is_empty())
                .collect())
        })
        .await
        .map_err(|e| ConversionError::Task(e.to_string()))?
    }

    /// Plain text of every PDF page, for preview
    pub async fn pdf_text(&self, pdf: Bytes) -> Result<String> {
        tokio::task::spawn_blocking(move || extract_text(&pdf))
            .await
            .map_err(|e| ConversionError::Task(e.to_string()))?
    }
}

impl Default for ConversionService {
    fn default() -> Self {
        Self::new(Arc::new(TextLayoutConverter), PageSize::Letter)
    }
}
