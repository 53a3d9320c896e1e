//! Workspace file table
//!
//! Insertion-ordered map from entry name to entry. Overwriting a name keeps
//! its original position, deleting removes it; entries themselves are never
//! modified in place.

use axum::body::Bytes;

use super::error::{Result, WorkspaceError};
use super::types::{DocumentKind, EntryView, FileEntry, FileFilter, Notice, NoticeLevel};
use crate::archive::{build_zip, BatchArchive};

#[derive(Debug, Default)]
pub struct Workspace {
    entries: Vec<FileEntry>,
    filter: FileFilter,
    notices: Vec<Notice>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Table
    // ========================================================================

    /// Insert or silently overwrite an entry under its name
    pub fn insert(&mut self, entry: FileEntry) {
        match self.position(&entry.name) {
            Some(idx) => self.entries[idx] = entry,
            None => self.entries.push(entry),
        }
    }

    /// Add uploaded files; returns how many were stored
    pub fn ingest<I>(&mut self, uploads: I) -> usize
    where
        I: IntoIterator<Item = (String, Bytes)>,
    {
        let mut count = 0;
        for (name, data) in uploads {
            tracing::debug!(file_name = %name, size = data.len(), "Ingesting upload");
            self.insert(FileEntry::uploaded(name, data));
            count += 1;
        }
        count
    }

    pub fn get(&self, name: &str) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Look up an entry or fail with `NotFound`
    pub fn require(&self, name: &str) -> Result<&FileEntry> {
        self.get(name)
            .ok_or_else(|| WorkspaceError::NotFound(name.to_string()))
    }

    pub fn delete(&mut self, name: &str) -> Result<FileEntry> {
        let idx = self
            .position(name)
            .ok_or_else(|| WorkspaceError::NotFound(name.to_string()))?;
        Ok(self.entries.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_kind(&self, kind: DocumentKind) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    /// Names of all entries of `kind`, in listing order
    pub fn names_of_kind(&self, kind: DocumentKind) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.name.clone())
            .collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    // ========================================================================
    // Filtering & Listing
    // ========================================================================

    pub fn filter(&self) -> FileFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: FileFilter) {
        self.filter = filter;
    }

    /// Entries matching `filter`, in insertion order
    pub fn list(&self, filter: FileFilter) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter().filter(move |e| filter.matches(e.kind))
    }

    pub fn listing(&self, filter: FileFilter) -> Vec<EntryView> {
        self.list(filter).map(FileEntry::view).collect()
    }

    // ========================================================================
    // Batch Export
    // ========================================================================

    /// Archive of the entries matching `filter`; `None` when nothing matches
    pub fn export(&self, filter: FileFilter) -> Result<Option<BatchArchive>> {
        let members = self.list(filter).count();
        if members == 0 {
            return Ok(None);
        }

        let data = build_zip(self.list(filter)).map_err(|e| WorkspaceError::Archive(e.to_string()))?;

        tracing::info!(
            filter = filter.as_param(),
            members = members,
            size = data.len(),
            "Built batch archive"
        );

        Ok(Some(BatchArchive {
            file_name: filter.archive_name(),
            data,
            members,
        }))
    }

    // ========================================================================
    // Notices
    // ========================================================================

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }

    /// Take all pending notices
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
