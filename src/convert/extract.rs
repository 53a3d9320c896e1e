//! PDF text extraction via pdf-extract
//!
//! pdf-extract (and its font parsers) can panic on malformed input, so every
//! call is wrapped in `catch_unwind` and surfaced as an extraction error.

use super::error::{panic_message, ConversionError, Result};

/// Extract the text of each page, in page order
pub fn extract_pages(pdf_bytes: &[u8]) -> Result<Vec<String>> {
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
    }));

    match outcome {
        Ok(Ok(pages)) => {
            tracing::debug!(
                pages = pages.len(),
                size = pdf_bytes.len(),
                "Extracted PDF text"
            );
            Ok(pages)
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "PDF text extraction failed");
            Err(ConversionError::Extraction(e.to_string()))
        }
        Err(payload) => {
            let msg = panic_message(payload);
            tracing::error!(error = %msg, "PDF text extraction panicked");
            Err(ConversionError::Extraction(format!(
                "malformed PDF ({})",
                msg
            )))
        }
    }
}

/// Concatenate all pages' text, each page followed by a blank line
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String> {
    let pages = extract_pages(pdf_bytes)?;
    Ok(join_pages(&pages))
}

pub(crate) fn join_pages(pages: &[String]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(page);
        text.push_str("\n\n");
    }
    text
}
