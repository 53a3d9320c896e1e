//! Workspace error types

use thiserror::Error;

use crate::convert::{ConversionError, FailureKind};

#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// Entry is not (or no longer) in the workspace
    #[error("File not found: {0}")]
    NotFound(String),

    /// A collaborator failed while acting on an entry
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Batch export could not be written
    #[error("Archive error: {0}")]
    Archive(String),
}

impl WorkspaceError {
    pub fn kind(&self) -> FailureKind {
        match self {
            WorkspaceError::NotFound(_) => FailureKind::NotFound,
            WorkspaceError::Conversion(e) => e.kind(),
            WorkspaceError::Archive(_) => FailureKind::Conversion,
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkspaceError>;
