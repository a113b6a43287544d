//! Error types for generator operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generator operations
#[derive(Debug)]
pub enum GenError {
    /// World seed failed schema or cross-reference validation
    InvalidSeed {
        /// Description of what is wrong with the seed
        reason: String,
    },

    /// Tile catalog failed its build-time checks
    ///
    /// Raised for asymmetric adjacency declarations, references to tiles
    /// absent from the catalog mode, or nonpositive weights.
    TileCatalog {
        /// Description of the offending declaration
        reason: String,
    },

    /// The caller cancelled generation through the cancel token
    ///
    /// No map is produced; the partially collapsed grid is discarded.
    Cancelled,

    /// Failed to read a world seed file from disk
    SeedRead {
        /// Path to the seed file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to parse a world seed file as JSON
    SeedParse {
        /// Path to the seed file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Failed to serialize the generated map
    MapEncode {
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Failed to write the generated map to disk
    MapWrite {
        /// Path where the write was attempted
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to export the PNG preview
    PreviewExport {
        /// Path where the export was attempted
        path: PathBuf,
        /// Underlying image error
        source: image::ImageError,
    },
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSeed { reason } => {
                write!(f, "Invalid world seed: {reason}")
            }
            Self::TileCatalog { reason } => {
                write!(f, "Tile catalog error: {reason}")
            }
            Self::Cancelled => {
                write!(f, "Generation cancelled by caller")
            }
            Self::SeedRead { path, source } => {
                write!(f, "Failed to read seed '{}': {source}", path.display())
            }
            Self::SeedParse { path, source } => {
                write!(f, "Failed to parse seed '{}': {source}", path.display())
            }
            Self::MapEncode { source } => {
                write!(f, "Failed to encode map: {source}")
            }
            Self::MapWrite { path, source } => {
                write!(f, "Failed to write map to '{}': {source}", path.display())
            }
            Self::PreviewExport { path, source } => {
                write!(
                    f,
                    "Failed to export preview to '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for GenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SeedRead { source, .. } | Self::MapWrite { source, .. } => Some(source),
            Self::SeedParse { source, .. } | Self::MapEncode { source } => Some(source),
            Self::PreviewExport { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generator results
pub type Result<T> = std::result::Result<T, GenError>;

/// Create an invalid-seed error
pub fn invalid_seed(reason: impl Into<String>) -> GenError {
    GenError::InvalidSeed {
        reason: reason.into(),
    }
}
