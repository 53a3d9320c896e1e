//! Document conversion
//!
//! Thin wrappers around the document collaborators:
//!
//! - PDF → Word through a path-based [`PdfToDocx`] converter and a
//!   [`ScratchPair`] of temporary files
//! - Word → PDF by reading paragraph text (docx-rs) and laying it out again
//!   (lopdf)
//! - PDF text extraction (pdf-extract) for previews

pub(crate) mod docx;
mod error;
mod extract;
mod pdf_to_docx;
mod pdf_writer;
mod scratch;
mod service;

pub use docx::{build_docx, read_paragraphs, write_docx};
pub use error::{ConversionError, FailureKind, Result};
pub use extract::{extract_pages, extract_text};
pub use pdf_to_docx::{CommandConverter, PdfToDocx, TextLayoutConverter};
pub use pdf_writer::{build_pdf, PageSize};
pub use scratch::ScratchPair;
pub use service::ConversionService;
