//! Word document access via docx-rs
//!
//! Reading is lossy on purpose: only the text of top-level paragraphs is kept
//! (runs and hyperlinks); tables, images and styling are dropped.

use std::io::{Seek, Write};

use docx_rs::{BreakType, DocumentChild, Docx, Paragraph, ParagraphChild, Run, RunChild};

use super::error::panic_message;

/// Read the ordered paragraph texts of a .docx file.
///
/// Empty paragraphs are kept so callers can decide how to treat them.
pub fn read_paragraphs(docx_bytes: &[u8]) -> Result<Vec<String>, String> {
    let parsed = std::panic::catch_unwind(|| docx_rs::read_docx(docx_bytes))
        .map_err(|payload| format!("malformed DOCX ({})", panic_message(payload)))?;
    let docx = parsed.map_err(|e| format!("Failed to parse DOCX: {}", e))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .collect();

    tracing::debug!(
        paragraphs = paragraphs.len(),
        size = docx_bytes.len(),
        "Read DOCX paragraphs"
    );

    Ok(paragraphs)
}

fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        match child {
            ParagraphChild::Run(run) => push_run_text(run, &mut text),
            ParagraphChild::Hyperlink(link) => {
                for link_child in &link.children {
                    if let ParagraphChild::Run(run) = link_child {
                        push_run_text(run, &mut text);
                    }
                }
            }
            _ => {}
        }
    }
    text
}

fn push_run_text(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}

/// Build a Word document with one paragraph per text block and a page
/// break between pages.
pub fn build_docx(pages: &[Vec<String>]) -> Docx {
    let mut docx = Docx::new();
    for (index, blocks) in pages.iter().enumerate() {
        if index > 0 {
            docx = docx.add_paragraph(
                Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
            );
        }
        for block in blocks {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(block)));
        }
    }
    docx
}

/// Serialize a document to any seekable writer
pub fn write_docx<W: Write + Seek>(docx: Docx, writer: W) -> Result<(), String> {
    docx.build()
        .pack(writer)
        .map_err(|e| format!("Failed to write DOCX: {}", e))
}

#[cfg(test)]
pub(crate) fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let blocks: Vec<String> = paragraphs.iter().map(|p| p.to_string()).collect();
    let mut cursor = std::io::Cursor::new(Vec::new());
    write_docx(build_docx(&[blocks]), &mut cursor).unwrap();
    cursor.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_paragraphs_in_order() {
        let bytes = docx_bytes(&["Title", "", "Body text"]);
        let paragraphs = read_paragraphs(&bytes).unwrap();
        assert_eq!(paragraphs, vec!["Title", "", "Body text"]);
    }

    #[test]
    fn test_page_break_paragraph_is_empty() {
        let pages = vec![vec!["one".to_string()], vec!["two".to_string()]];
        let mut cursor = std::io::Cursor::new(Vec::new());
        write_docx(build_docx(&pages), &mut cursor).unwrap();

        let paragraphs = read_paragraphs(cursor.get_ref()).unwrap();
        let texts: Vec<&str> = paragraphs
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(read_paragraphs(b"PK\x03\x04 not really a zip").is_err());
    }
}
