//! Workspace types

use axum::body::Bytes;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Document Kind
// ============================================================================

/// Kind of a stored document, decided by file extension only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Word,
}

impl DocumentKind {
    /// `.pdf` (any case) is a PDF; every other name is treated as Word
    pub fn from_file_name(name: &str) -> Self {
        if name.to_lowercase().ends_with(".pdf") {
            DocumentKind::Pdf
        } else {
            DocumentKind::Word
        }
    }

    /// Extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Word => "docx",
        }
    }

    /// The kind a conversion of this kind produces
    pub fn converted(self) -> Self {
        match self {
            DocumentKind::Pdf => DocumentKind::Word,
            DocumentKind::Word => DocumentKind::Pdf,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Word => "WORD",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "word" | "docx" => Some(DocumentKind::Word),
            _ => None,
        }
    }
}

/// Name a converted entry is stored under: the source name with its last
/// extension replaced by the target kind's extension.
///
/// `report.pdf` → `report.docx`, `Scan.PDF` → `Scan.docx`,
/// `notes` → `notes.pdf`.
pub fn derived_name(source_name: &str, target: DocumentKind) -> String {
    let stem = match source_name.rfind('.') {
        Some(idx) if idx > 0 => &source_name[..idx],
        _ => source_name,
    };
    format!("{}.{}", stem, target.extension())
}

/// Whether an upload name carries one of the accepted extensions
pub fn is_supported_upload(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.ends_with(".pdf") || lower.ends_with(".docx")
}

// ============================================================================
// Filter
// ============================================================================

/// Display filter for listings and batch export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFilter {
    #[default]
    All,
    Word,
    Pdf,
}

impl FileFilter {
    pub fn matches(self, kind: DocumentKind) -> bool {
        match self {
            FileFilter::All => true,
            FileFilter::Word => kind == DocumentKind::Word,
            FileFilter::Pdf => kind == DocumentKind::Pdf,
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "all" => Some(FileFilter::All),
            "word" | "docx" => Some(FileFilter::Word),
            "pdf" => Some(FileFilter::Pdf),
            _ => None,
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            FileFilter::All => "all",
            FileFilter::Word => "word",
            FileFilter::Pdf => "pdf",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileFilter::All => "All",
            FileFilter::Word => "Word (.docx)",
            FileFilter::Pdf => "PDF (.pdf)",
        }
    }

    /// Default download name of the batch archive
    pub fn archive_name(self) -> &'static str {
        match self {
            FileFilter::All => "documentos.zip",
            FileFilter::Word => "documentos_word.zip",
            FileFilter::Pdf => "documentos_pdf.zip",
        }
    }
}

// ============================================================================
// Entries
// ============================================================================

/// One stored file, original upload or conversion output
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub data: Bytes,
    pub kind: DocumentKind,
    pub created_at: DateTime<Utc>,
    /// Upload this entry was derived from (its own name for uploads)
    pub source_name: String,
}

impl FileEntry {
    pub fn uploaded(name: impl Into<String>, data: Bytes) -> Self {
        let name = name.into();
        Self {
            kind: DocumentKind::from_file_name(&name),
            source_name: name.clone(),
            name,
            data,
            created_at: Utc::now(),
        }
    }

    pub fn converted(source: &FileEntry, data: Bytes) -> Self {
        let kind = source.kind.converted();
        Self {
            name: derived_name(&source.name, kind),
            data,
            kind,
            created_at: Utc::now(),
            source_name: source.name.clone(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn view(&self) -> EntryView {
        EntryView {
            name: self.name.clone(),
            kind: self.kind,
            size: self.size(),
            size_label: format_size(self.size()),
            created_at: format_timestamp(self.created_at),
            source_name: self.source_name.clone(),
        }
    }
}

/// Display metadata for one listed entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    pub name: String,
    pub kind: DocumentKind,
    pub size: usize,
    pub size_label: String,
    pub created_at: String,
    pub source_name: String,
}

/// `N B` below 1 KiB, `X.Y KB` below 1 MiB, `X.Y MB` above
pub fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Local time as `YYYY-MM-DD HH:MM:SS`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

// ============================================================================
// Notices
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Status message shown on the next render of the desk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// One entry a batch conversion could not convert
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub name: String,
    pub message: String,
}

/// Outcome of a batch conversion
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Derived names of the stored conversions
    pub converted: Vec<String>,
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn converted_count(&self) -> usize {
        self.converted.len()
    }
}
