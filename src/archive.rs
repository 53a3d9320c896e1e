//! Batch export as a ZIP archive
//!
//! One deflate-compressed member per entry, named after the entry. No
//! directories, no manifest.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::workspace::FileEntry;

/// A finished archive ready for download
#[derive(Debug, Clone)]
pub struct BatchArchive {
    pub file_name: &'static str,
    pub data: Vec<u8>,
    pub members: usize,
}

/// Write `entries` into an in-memory ZIP
pub fn build_zip<'a, I>(entries: I) -> zip::result::ZipResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a FileEntry>,
{
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in entries {
        writer.start_file(entry.name.as_str(), options)?;
        writer.write_all(&entry.data)?;
    }

    Ok(writer.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn test_members_match_entries() {
        let entries = vec![
            FileEntry::uploaded("a.pdf", Bytes::from_static(b"%PDF-a")),
            FileEntry::uploaded("b.docx", Bytes::from_static(b"PK-b")),
        ];

        let data = build_zip(&entries).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 2);

        for entry in &entries {
            let mut member = archive.by_name(&entry.name).unwrap();
            assert_eq!(member.compression(), CompressionMethod::Deflated);
            let mut content = Vec::new();
            member.read_to_end(&mut content).unwrap();
            assert_eq!(content, entry.data.as_ref());
        }
    }
}
