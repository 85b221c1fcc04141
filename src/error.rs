// src/error.rs
use ora_core::{EncodeError, FlattenError, ManifestError, TableError};
use ora_traits::{InvalidCompressionLevel, RenderError};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort an export. No variant is retried; the first
/// error ends the export and leaves whatever was already written in place.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Invalid export configuration: {0}")]
    Config(String),

    #[error("Layer tree cannot be exported: {0}")]
    Flatten(#[from] FlattenError),

    #[error("Vector path cannot be exported: {0}")]
    Encode(#[from] EncodeError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Geometry table error: {0}")]
    Table(#[from] TableError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Filesystem error at '{}': {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Scene error: {0}")]
    Scene(String),
}

impl ExportError {
    /// Wraps an OS error with the path it happened on.
    pub fn fs(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| ExportError::Filesystem { path, source }
    }
}

impl From<InvalidCompressionLevel> for ExportError {
    fn from(e: InvalidCompressionLevel) -> Self {
        ExportError::Config(e.to_string())
    }
}

impl From<zip::result::ZipError> for ExportError {
    fn from(e: zip::result::ZipError) -> Self {
        ExportError::Archive(e.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Scene(e.to_string())
    }
}
