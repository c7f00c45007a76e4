use std::{result, sync::Arc};

use read_fonts::ReadError;

/// Error types for axis resolution.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no font found for family '{family}'")]
    NoMatchingFace { family: String },

    #[error("no font covers {0:?}")]
    NoFallbackFace(String),

    #[error("unknown axis: {0}")]
    UnknownAxis(String),

    #[error("failed to instantiate {face}: {source}")]
    InstantiationFailed {
        face: String,
        #[source]
        source: Arc<BackendError>,
    },

    #[error("invalid range for {tag} axis (min {min}, default {default}, max {max})")]
    InvalidAxisRange { tag: String, min: f32, default: f32, max: f32 },

    #[error("axis {0} listed more than once")]
    DuplicateAxis(String),

    #[error("invalid axis tag: {0:?}")]
    InvalidTag(String),

    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),
}

/// Failures reported by an instantiation backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("no font data loaded for face")]
    NoFontData,

    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("missing required table '{0}'")]
    MissingTable(&'static str),

    #[error("not a variable font (no fvar table)")]
    NotVariableFont,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = result::Result<T, Error>;
