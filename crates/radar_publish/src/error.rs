//! Error types for publishing.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for publish operations.
pub type PublishResult<T> = Result<T, PublishError>;

/// Errors that can occur while publishing a radar.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Unknown publisher: {name} (available: {available})")]
    UnknownPublisher { name: String, available: String },

    #[error("Blip '{blip}' is placed in unknown ring '{ring}'")]
    UnknownRing { blip: String, ring: String },

    #[error("Blip '{blip}' is placed in unknown quadrant '{quadrant}'")]
    UnknownQuadrant { blip: String, quadrant: String },

    #[error("Publisher {0} does not support previews")]
    PreviewUnsupported(String),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl PublishError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PublishError::Io {
            path: path.into(),
            source,
        }
    }
}
