//! Defines custom error types for the application.

use std::path::PathBuf;
use thiserror::Error;

/// Error type returned when a text rewrite cannot proceed.
#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Usage: update-anchors ANCHOR1 file1.md ANCHOR2 file2.md ...\n       Use '-' as filename to read from stdin")]
    Usage,

    #[error("{} not found", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("Update for anchor '{0}' specifies both 'file' and 'content'. Please choose one.")]
    AmbiguousContentSource(String),

    #[error("Update for anchor '{0}' specifies neither 'file' nor 'content'.")]
    NoContent(String),

    #[error("Failed to parse manifest: {0}")]
    ManifestParse(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PatchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
