//! Error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::base::PathKey;

/// Failure reading or writing a snapshot file.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] postcard::Error),
    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] postcard::Error),
    #[error("not a symbol table snapshot (bad header)")]
    BadMagic,
    #[error("snapshot contains {0:?} more than once")]
    DuplicatePath(PathKey),
    #[error("snapshot contains a non-root entry with an empty path")]
    EmptyPath,
    #[error("snapshot has no root entry")]
    MissingRoot,
}

/// Failure reported by a source parser for one file.
#[derive(Debug, Error)]
#[error("failed to parse {path}: {source}")]
pub struct ParseError {
    pub path: PathBuf,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl ParseError {
    pub fn new(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Failure while loading or rebuilding the table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Failure reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}
