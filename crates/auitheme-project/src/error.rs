use std::path::PathBuf;

use crate::kind::TemplateKind;

/// Errors that can occur while editing, saving or loading a project.
///
/// Decoding project bytes never fails; malformed input degrades to default
/// field values instead.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// Section framing error while encoding.
    #[error("section error: {0}")]
    Section(#[from] auitheme_section::SectionError),

    /// Failed to read or write a project file.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The project file exceeds the configured size limit.
    #[error("project file too large ({size} bytes, max {max}): {path}")]
    FileTooLarge { path: PathBuf, size: u64, max: usize },

    /// A record name must not be empty.
    #[error("{kind} name must not be empty")]
    EmptyName { kind: TemplateKind },

    /// Another record of the same kind already uses this name.
    #[error("{kind} name must be unique: {name:?} is already used")]
    DuplicateName { kind: TemplateKind, name: String },

    /// No record of this kind exists at the given index.
    #[error("no {kind} at index {index} (have {len})")]
    IndexOutOfRange {
        kind: TemplateKind,
        index: usize,
        len: usize,
    },

    /// The string does not name a template kind.
    #[error("unknown template kind: {0}")]
    InvalidKind(String),
}

pub type Result<T> = std::result::Result<T, ProjectError>;
