//! PDF → Word converters
//!
//! Converters work on paths, not buffers: the caller provides an input file
//! and an output path to write. Two implementations are provided:
//!
//! - [`TextLayoutConverter`]: in-process, rebuilds the text flow of each page
//!   as Word paragraphs.
//! - [`CommandConverter`]: delegates to an external program such as
//!   `pdf2docx` through an argument template.

use std::path::Path;

use async_trait::async_trait;

use super::docx::{build_docx, write_docx};
use super::error::{ConversionError, Result};
use super::extract::extract_pages;

/// Path-based PDF to Word converter
#[async_trait]
pub trait PdfToDocx: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Read the PDF at `input` and write a .docx to `output`
    async fn convert(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Converts each page's text into Word paragraphs
#[derive(Debug, Default, Clone)]
pub struct TextLayoutConverter;

#[async_trait]
impl PdfToDocx for TextLayoutConverter {
    fn name(&self) -> &str {
        "text-layout"
    }

    async fn convert(&self, input: &Path, output: &Path) -> Result<()> {
        let input = input.to_path_buf();
        let output = output.to_path_buf();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let pdf_bytes = std::fs::read(&input)?;
            let pages = extract_pages(&pdf_bytes)
                .map_err(|e| ConversionError::PdfToDocx(e.to_string()))?;

            let blocks: Vec<Vec<String>> = pages.iter().map(|page| text_blocks(page)).collect();
            let file = std::fs::File::create(&output)?;
            write_docx(build_docx(&blocks), file).map_err(ConversionError::PdfToDocx)?;

            tracing::debug!(
                pages = blocks.len(),
                paragraphs = blocks.iter().map(Vec::len).sum::<usize>(),
                "Rebuilt PDF text as DOCX"
            );
            Ok(())
        })
        .await
        .map_err(|e| ConversionError::Task(e.to_string()))?
    }
}

/// Split page text into blocks separated by blank lines, joining the lines
/// inside a block with spaces
pub(crate) fn text_blocks(page: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in page.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join(" "));
    }
    blocks
}

/// Runs an external converter program.
///
/// The template is split on whitespace; `{input}` and `{output}` are
/// replaced by the scratch paths, e.g. `pdf2docx convert {input} {output}`.
#[derive(Debug, Clone)]
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
}

impl CommandConverter {
    pub fn from_template(template: &str) -> Option<Self> {
        let mut parts = template.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    fn expand_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();
        self.args
            .iter()
            .map(|arg| arg.replace("{input}", &input).replace("{output}", &output))
            .collect()
    }
}

#[async_trait]
impl PdfToDocx for CommandConverter {
    fn name(&self) -> &str {
        &self.program
    }

    async fn convert(&self, input: &Path, output: &Path) -> Result<()> {
        let args = self.expand_args(input, output);

        tracing::debug!(program = %self.program, args = ?args, "Running external converter");

        // Kill the program when the request is dropped
        let result = tokio::process::Command::new(&self.program)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                ConversionError::PdfToDocx(format!("failed to start {}: {}", self.program, e))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(ConversionError::PdfToDocx(format!(
                "{} exited with {}: {}",
                self.program,
                result.status,
                stderr.trim()
            )));
        }

        if !output.exists() {
            return Err(ConversionError::PdfToDocx(format!(
                "{} produced no output file",
                self.program
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::docx::read_paragraphs;
    use crate::convert::pdf_writer::{build_pdf, PageSize};

    #[test]
    fn test_text_blocks() {
        let page = "First line\ncontinues here\n\n  Second block  \n\n\n";
        assert_eq!(
            text_blocks(page),
            vec!["First line continues here", "Second block"]
        );
        assert!(text_blocks("\n \n").is_empty());
    }

    #[test]
    fn test_command_template() {
        let converter = CommandConverter::from_template("pdf2docx convert {input} {output}").unwrap();
        assert_eq!(converter.name(), "pdf2docx");
        let args = converter.expand_args(Path::new("/tmp/a.pdf"), Path::new("/tmp/b.docx"));
        assert_eq!(args, vec!["convert", "/tmp/a.pdf", "/tmp/b.docx"]);

        assert!(CommandConverter::from_template("   ").is_none());
    }

    #[tokio::test]
    async fn test_text_layout_converter_writes_docx() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("in.pdf");
        let output = dir.path().join("out.docx");
        let pdf = build_pdf(PageSize::Letter, &["Hello converter".to_string()]).unwrap();
        std::fs::write(&input, pdf).unwrap();

        TextLayoutConverter.convert(&input, &output).await.unwrap();

        let paragraphs = read_paragraphs(&std::fs::read(&output).unwrap()).unwrap();
        assert!(paragraphs.iter().any(|p| p.contains("Hello converter")));
    }

    #[tokio::test]
    async fn test_text_layout_converter_rejects_garbage() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("in.pdf");
        let output = dir.path().join("out.docx");
        std::fs::write(&input, b"not a pdf").unwrap();

        let err = TextLayoutConverter.convert(&input, &output).await.unwrap_err();
        assert!(matches!(err, ConversionError::PdfToDocx(_)));
    }

    #[tokio::test]
    async fn test_missing_program_is_conversion_error() {
        let converter = CommandConverter::from_template("docdesk-no-such-program {input} {output}").unwrap();
        let err = converter
            .convert(Path::new("/tmp/in.pdf"), Path::new("/tmp/out.docx"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConversionError::PdfToDocx(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_converter_copies_output() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("in.pdf");
        let output = dir.path().join("out.docx");
        std::fs::write(&input, b"payload").unwrap();

        let converter = CommandConverter::from_template("cp {input} {output}").unwrap();
        converter.convert(&input, &output).await.unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), b"payload");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_converter_nonzero_exit() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("in.pdf");
        let output = dir.path().join("out.docx");
        std::fs::write(&input, b"%PDF").unwrap();

        let converter = CommandConverter::from_template("false {input} {output}").unwrap();
        let err = converter.convert(&input, &output).await.unwrap_err();

        match err {
            ConversionError::PdfToDocx(msg) => assert!(msg.starts_with("false exited with")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_converter_without_output_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("in.pdf");
        let output = dir.path().join("out.docx");
        std::fs::write(&input, b"%PDF").unwrap();

        let converter = CommandConverter::from_template("true {input} {output}").unwrap();
        let err = converter.convert(&input, &output).await.unwrap_err();

        match err {
            ConversionError::PdfToDocx(msg) => assert_eq!(msg, "true produced no output file"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dropped_conversion_stops_program() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("in.pdf");
        let output = dir.path().join("out.docx");
        std::fs::write(&input, b"%PDF").unwrap();

        let converter = CommandConverter {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                "sleep 1; touch \"$0\"".to_string(),
                "{output}".to_string(),
            ],
        };

        let pending = converter.convert(&input, &output);
        let timed_out =
            tokio::time::timeout(std::time::Duration::from_millis(200), pending).await;
        assert!(timed_out.is_err());

        tokio::time::sleep(std::time::Duration::from_millis(1500)).await;
        assert!(!output.exists());
    }
}
