//! Scratch files for path-based converters
//!
//! A `ScratchPair` owns a private temporary directory holding the input and
//! output paths of one conversion. Dropping the pair removes the directory
//! and both files, whichever way the conversion ended.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::error::Result;

pub struct ScratchPair {
    dir: TempDir,
    input: PathBuf,
    output: PathBuf,
}

impl ScratchPair {
    /// Create the pair and write `input_data` to the input path
    pub fn with_input(input_data: &[u8], input_ext: &str, output_ext: &str) -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("docdesk-").tempdir()?;
        let input = dir.path().join(format!("source.{}", input_ext));
        let output = dir.path().join(format!("converted.{}", output_ext));

        std::fs::write(&input, input_data)?;

        tracing::debug!(
            dir = %dir.path().display(),
            size = input_data.len(),
            "Created conversion scratch pair"
        );

        Ok(Self { dir, input, output })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Read whatever the converter wrote to the output path
    pub fn read_output(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.output)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_removed_on_drop() {
        let pair = ScratchPair::with_input(b"%PDF-1.4", "pdf", "docx").unwrap();
        let dir = pair.dir().to_path_buf();
        assert_eq!(std::fs::read(pair.input()).unwrap(), b"%PDF-1.4");

        std::fs::write(pair.output(), b"out").unwrap();
        assert_eq!(pair.read_output().unwrap(), b"out");

        drop(pair);
        assert!(!dir.exists());
    }

    #[test]
    fn test_missing_output_is_an_error() {
        let pair = ScratchPair::with_input(b"data", "pdf", "docx").unwrap();
        assert!(pair.read_output().is_err());
    }
}
