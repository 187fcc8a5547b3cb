//! Error types for notebook ingress and egress
//!
//! Provides error handling for:
//! - Read operations (file → Notebook)
//! - Write operations (Notebook → file)

use std::path::{Path, PathBuf};

/// Errors while reading or writing a notebook file
#[derive(Debug, thiserror::Error)]
pub enum NotebookError {
    /// IO error during file read or temp file creation
    #[error("io error on {path}: {source}")]
    Io {
        /// File that could not be accessed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Notebook JSON is malformed or does not match the nbformat 4 layout
    #[error("invalid notebook {path}: {source}")]
    Parse {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Notebook uses a pre-4 nbformat layout (worksheets, prompt numbers)
    #[error("unsupported nbformat {major} in {path} (need 4 or later)")]
    UnsupportedVersion {
        /// File with the old layout
        path: PathBuf,
        /// Major format version found
        major: u32,
    },

    /// Notebook could not be serialized back to JSON
    #[error("serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Serialized notebook is not valid UTF-8
    #[error("serialized notebook is not valid UTF-8: {0}")]
    Encoding(#[source] std::string::FromUtf8Error),

    /// Temp file could not be moved over the target
    #[error("failed to replace {path}: {source}")]
    Persist {
        /// Target file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl NotebookError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create parse error for path
    pub fn parse_error(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Path the error refers to, if any
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. }
            | Self::Parse { path, .. }
            | Self::UnsupportedVersion { path, .. }
            | Self::Persist { path, .. } => Some(path),
            Self::Serialize(_) | Self::Encoding(_) => None,
        }
    }
}

/// Result type alias for notebook operations
pub type NotebookResult<T> = Result<T, NotebookError>;
