//! Error types for pavement node generation, export and rendering.

use std::path::PathBuf;
use thiserror::Error;

use crate::pavement::PavementType;

/// Result type alias for pavement operations.
pub type PavementResult<T> = Result<T, PavementError>;

/// Errors surfaced at the boundary where they occur.
///
/// Validation errors are raised before generation runs; the generator itself
/// has no failure path.
#[derive(Debug, Error)]
pub enum PavementError {
    /// A thickness is missing, non-numeric, zero, negative or not finite.
    #[error("invalid thickness for layer '{layer}': {value}")]
    InvalidThickness {
        /// Name of the offending layer.
        layer: String,
        /// The rejected value (NaN when the input was missing or non-numeric).
        value: f64,
    },

    /// The number of thicknesses does not match the layer table.
    #[error("{pavement} pavement expects {expected} layer thicknesses, got {found}")]
    LayerCountMismatch {
        pavement: PavementType,
        expected: usize,
        found: usize,
    },

    /// Pavement type name not recognised.
    #[error("unknown pavement type: '{0}' (expected flexible, rigid or semi-rigid)")]
    UnknownPavementType(String),

    /// X-profile is empty, unordered or contains non-finite values.
    #[error("invalid x-profile: {0}")]
    InvalidProfile(String),

    /// Malformed request or render configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The destination could not be opened or written.
    #[error("failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The diagram could not be produced.
    #[error("render failed: {0}")]
    RenderFailure(String),
}

impl PavementError {
    /// Create an invalid thickness error.
    #[must_use]
    pub fn invalid_thickness(layer: impl Into<String>, value: f64) -> Self {
        Self::InvalidThickness {
            layer: layer.into(),
            value,
        }
    }

    /// Create a write failure carrying the destination path.
    #[must_use]
    pub fn write_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailure {
            path: path.into(),
            source,
        }
    }

    /// Name of the offending layer, when the error concerns one.
    pub fn layer(&self) -> Option<&str> {
        match self {
            Self::InvalidThickness { layer, .. } => Some(layer),
            _ => None,
        }
    }
}
