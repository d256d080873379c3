//! Error type shared by every /proc reader.
//!
//! Each failure says which file was involved and, for layout problems, which
//! label or position was expected.

use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ProcError>;

#[derive(Debug, thiserror::Error)]
pub enum ProcError {
    /// The file or directory could not be opened or read, typically because
    /// the process exited or permissions are missing.
    #[error("{} is unavailable: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but the expected label or position is missing.
    #[error("field '{field}' not found in {}", path.display())]
    FieldNotFound { path: PathBuf, field: String },

    /// A field was located but its value is not a valid number.
    #[error("failed to parse field '{field}' in {}: '{value}'", path.display())]
    Parse {
        path: PathBuf,
        field: String,
        value: String,
    },

    /// Listing the process-information root failed part way through.
    #[error("enumeration of {} failed: {source}", path.display())]
    Enumeration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `cpu` line in the stat file carries too few counters.
    #[error("cpu line '{label}' in {} is truncated", path.display())]
    CpuLine { path: PathBuf, label: String },
}

impl ProcError {
    /// True when the underlying resource was missing or unreadable, as opposed
    /// to present but malformed.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ProcError::Unavailable { .. })
    }

    pub(crate) fn field_not_found(path: impl Into<PathBuf>, field: impl Into<String>) -> Self {
        ProcError::FieldNotFound {
            path: path.into(),
            field: field.into(),
        }
    }

    pub(crate) fn parse(
        path: impl Into<PathBuf>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        ProcError::Parse {
            path: path.into(),
            field: field.into(),
            value: value.into(),
        }
    }
}
