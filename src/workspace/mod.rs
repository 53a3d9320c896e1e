//! Document workspace
//!
//! Session-scoped state of the desk: the file table, the display filter and
//! pending notices, plus the actions that ingest, convert, list, delete and
//! export entries.

mod actions;
mod error;
mod session;
mod store;
mod types;

pub use error::{Result, WorkspaceError};
pub use session::{Session, SessionError, SessionManager};
pub use store::Workspace;
pub use types::{
    derived_name, format_size, format_timestamp, is_supported_upload, BatchFailure, BatchReport,
    DocumentKind, EntryView, FileEntry, FileFilter, Notice, NoticeLevel,
};
