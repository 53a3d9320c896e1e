//! Workspace actions that call into the conversion service

use axum::body::Bytes;

use super::error::{Result, WorkspaceError};
use super::store::Workspace;
use super::types::{BatchFailure, BatchReport, DocumentKind, FileEntry};
use crate::convert::{ConversionError, ConversionService};

impl Workspace {
    /// Convert one entry and store the result under its derived name.
    ///
    /// On failure the workspace is left untouched.
    pub async fn convert(&mut self, name: &str, service: &ConversionService) -> Result<String> {
        let source = self.require(name)?.clone();

        let converted = match source.kind {
            DocumentKind::Pdf => service.pdf_to_docx(source.data.clone()).await,
            DocumentKind::Word => service.docx_to_pdf(source.data.clone()).await,
        };

        let data = converted.map_err(|e| {
            tracing::warn!(file_name = %name, error = %e, "Conversion failed");
            WorkspaceError::from(e)
        })?;

        let entry = FileEntry::converted(&source, Bytes::from(data));
        let derived = entry.name.clone();

        tracing::info!(
            source = %source.name,
            derived = %derived,
            size = entry.size(),
            "Conversion stored"
        );

        self.insert(entry);
        Ok(derived)
    }

    /// Convert every entry of `kind`; individual failures do not stop the
    /// batch.
    pub async fn convert_all(
        &mut self,
        kind: DocumentKind,
        service: &ConversionService,
    ) -> BatchReport {
        let mut report = BatchReport::default();

        for name in self.names_of_kind(kind) {
            match self.convert(&name, service).await {
                Ok(derived) => report.converted.push(derived),
                Err(e) => report.failed.push(BatchFailure {
                    name,
                    message: e.to_string(),
                }),
            }
        }

        tracing::info!(
            kind = kind.label(),
            converted = report.converted.len(),
            failed = report.failed.len(),
            "Batch conversion finished"
        );

        report
    }

    /// Non-empty paragraph texts of a Word entry
    pub async fn word_paragraphs(
        &self,
        name: &str,
        service: &ConversionService,
    ) -> Result<Vec<String>> {
        let entry = self.require(name)?;
        Ok(service.docx_paragraphs(entry.data.clone()).await?)
    }

    /// Text of every page of a PDF entry
    pub async fn pdf_text(&self, name: &str, service: &ConversionService) -> Result<String> {
        let entry = self.require(name)?;
        if entry.kind != DocumentKind::Pdf {
            return Err(ConversionError::Extraction(format!("{} is not a PDF", name)).into());
        }
        Ok(service.pdf_text(entry.data.clone()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::docx::docx_bytes;
    use crate::convert::{build_pdf, FailureKind, PageSize, PdfToDocx};
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::Arc;

    /// Accepts anything that looks like a PDF and emits a fixed document
    struct StubConverter;

    #[async_trait]
    impl PdfToDocx for StubConverter {
        fn name(&self) -> &str {
            "stub"
        }

        async fn convert(&self, input: &Path, output: &Path) -> crate::convert::Result<()> {
            let data = std::fs::read(input)?;
            if !data.starts_with(b"%PDF") {
                return Err(ConversionError::PdfToDocx("not a PDF".to_string()));
            }
            std::fs::write(output, docx_bytes(&["converted"]))?;
            Ok(())
        }
    }

    fn stub_service() -> ConversionService {
        ConversionService::new(Arc::new(StubConverter), PageSize::Letter)
    }

    fn pdf(text: &str) -> Bytes {
        Bytes::from(build_pdf(PageSize::Letter, &[text.to_string()]).unwrap())
    }

    #[tokio::test]
    async fn test_convert_pdf_to_word_name() {
        let service = stub_service();
        let mut ws = Workspace::new();
        ws.ingest(vec![("report.pdf".to_string(), pdf("Report"))]);

        let derived = ws.convert("report.pdf", &service).await.unwrap();
        assert_eq!(derived, "report.docx");

        let entry = ws.get("report.docx").unwrap();
        assert_eq!(entry.kind, DocumentKind::Word);
        assert_eq!(entry.source_name, "report.pdf");
        assert!(ws.get("report.pdf").is_some());
    }

    #[tokio::test]
    async fn test_convert_word_to_pdf_and_overwrite() {
        let service = ConversionService::default();
        let mut ws = Workspace::new();
        ws.ingest(vec![(
            "letter.docx".to_string(),
            Bytes::from(docx_bytes(&["Dear reader"])),
        )]);

        assert_eq!(ws.convert("letter.docx", &service).await.unwrap(), "letter.pdf");
        let first = ws.get("letter.pdf").unwrap().created_at;

        ws.convert("letter.docx", &service).await.unwrap();
        assert_eq!(ws.len(), 2);
        assert!(ws.get("letter.pdf").unwrap().created_at >= first);
        assert!(ws.get("letter.pdf").unwrap().data.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_batch_isolates_failures() {
        let service = stub_service();
        let mut ws = Workspace::new();
        ws.ingest(vec![
            ("one.pdf".to_string(), pdf("one")),
            ("two.pdf".to_string(), pdf("two")),
            ("broken.pdf".to_string(), Bytes::from_static(b"garbage")),
            ("three.pdf".to_string(), pdf("three")),
        ]);

        let report = ws.convert_all(DocumentKind::Pdf, &service).await;
        assert_eq!(report.converted_count(), 3);
        let failed: Vec<&str> = report.failed.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(failed, vec!["broken.pdf"]);
        assert!(ws.get("broken.docx").is_none());
        assert!(ws.get("broken.pdf").is_some());
        assert_eq!(ws.len(), 7);
    }

    #[tokio::test]
    async fn test_failed_conversion_leaves_workspace_unchanged() {
        let service = ConversionService::default();
        let mut ws = Workspace::new();
        ws.ingest(vec![("bad.docx".to_string(), Bytes::from_static(b"nope"))]);

        let err = ws.convert("bad.docx", &service).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Conversion);
        assert_eq!(ws.len(), 1);
    }

    #[tokio::test]
    async fn test_convert_missing_is_not_found() {
        let service = stub_service();
        let mut ws = Workspace::new();
        let err = ws.convert("ghost.pdf", &service).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::NotFound);
    }

    #[tokio::test]
    async fn test_pdf_text_preview() {
        let service = stub_service();
        let mut ws = Workspace::new();
        ws.ingest(vec![
            ("a.pdf".to_string(), pdf("Preview me")),
            ("b.pdf".to_string(), Bytes::from_static(b"broken")),
        ]);

        assert!(ws.pdf_text("a.pdf", &service).await.unwrap().contains("Preview me"));
        let err = ws.pdf_text("b.pdf", &service).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Extraction);
    }
}
