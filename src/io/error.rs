//! Error types for image pipelines around the subdivision engine

use std::fmt;
use std::path::PathBuf;

/// Main error type for all quadtree rendering operations
#[derive(Debug)]
pub enum QuadError {
    /// Failed to load or decode a source image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to encode or save an output image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Source image cannot be subdivided
    InvalidSourceData {
        /// Description of what's wrong with the source
        reason: String,
    },

    /// The frontier ran dry while the driver still had iterations left
    ///
    /// Every split pushes four regions for the one it pops, so this signals a
    /// broken driver invariant rather than a property of the input.
    EmptyFrontier {
        /// Iteration that attempted the extraction
        iteration: usize,
    },
}

impl fmt::Display for QuadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::EmptyFrontier { iteration } => {
                write!(f, "Frontier is empty at iteration {iteration}")
            }
        }
    }
}

impl std::error::Error for QuadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for quadtree results
pub type Result<T> = std::result::Result<T, QuadError>;

impl From<image::ImageError> for QuadError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for QuadError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> QuadError {
    QuadError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an error for a CLI target that is neither a supported image nor a directory
pub fn invalid_target(target: &std::path::Path, reason: &str) -> QuadError {
    QuadError::InvalidParameter {
        parameter: "target",
        value: target.display().to_string(),
        reason: reason.to_string(),
    }
}
