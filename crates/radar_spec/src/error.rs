//! Error types for radar ingestion.

use std::path::PathBuf;
use thiserror::Error;

use crate::models::{Quadrant, Ring};

/// Result type alias for radar operations.
pub type RadarResult<T> = Result<T, RadarError>;

/// Broad category of a [`RadarError`], used by callers to pick a diagnostic
/// or an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Ring or quadrant cardinality violated.
    Validation,
    /// The radar directory layout is wrong.
    Structural,
    /// A spec or blip document is malformed or incomplete.
    Parse,
    /// Reading from the filesystem failed.
    Io,
}

/// Errors that can occur while loading a radar.
#[derive(Error, Debug)]
pub enum RadarError {
    #[error("No radar spec found in {0} (expected specs.yml or specs.yaml)")]
    SpecNotFound(PathBuf),

    #[error("Radar must have between 3 and 4 rings, found {}: {}", .0.len(), ring_names(.0))]
    InvalidRings(Vec<Ring>),

    #[error("Radar must have 4 quadrants, found {}: {}", .0.len(), quadrant_names(.0))]
    InvalidQuadrants(Vec<Quadrant>),

    #[error("Quadrant order must list each quadrant position exactly once: {0}")]
    InvalidQuadrantOrder(String),

    #[error("Path {0} must be a directory")]
    NotADirectory(PathBuf),

    #[error("Invalid document {path}: {message}")]
    InvalidFormat { path: PathBuf, message: String },

    #[error("Missing required field `{field}` in {path}")]
    MissingField { path: PathBuf, field: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl RadarError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RadarError::InvalidRings(_)
            | RadarError::InvalidQuadrants(_)
            | RadarError::InvalidQuadrantOrder(_) => ErrorKind::Validation,
            RadarError::SpecNotFound(_) | RadarError::NotADirectory(_) => ErrorKind::Structural,
            RadarError::InvalidFormat { .. } | RadarError::MissingField { .. } => ErrorKind::Parse,
            RadarError::Io { .. } | RadarError::Walk(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RadarError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_format(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        RadarError::InvalidFormat {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

fn ring_names(rings: &[Ring]) -> String {
    rings
        .iter()
        .map(|r| format!("{} ({})", r.name, r.id))
        .collect::<Vec<_>>()
        .join(", ")
}

fn quadrant_names(quadrants: &[Quadrant]) -> String {
    quadrants
        .iter()
        .map(|q| format!("{} ({})", q.name, q.id))
        .collect::<Vec<_>>()
        .join(", ")
}
