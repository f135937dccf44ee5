//! Error types for the unit core

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the unit registry
#[derive(Debug, Error)]
pub enum UnitError {
    #[error("Unit kind already registered: {kind}")]
    DuplicateKind { kind: String },

    #[error("Unknown unit kind: {kind}")]
    UnknownKind { kind: String },

    #[error("Failed to decode {kind} unit: {reason}")]
    Decode { kind: String, reason: String },

    #[error("Record has no data for {kind} unit {name}")]
    MissingData { kind: String, name: String },

    #[error("Unit entry has no string `{key}` key")]
    MissingKind { key: &'static str },
}

/// Errors raised while scanning a directory tree
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Scan root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path {} is outside the scan root", .0.display())]
    OutsideRoot(PathBuf),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ScanError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
