//! Envelope error types.

use std::path::PathBuf;

use thiserror::Error;
use udt_xml::XmlError;

/// Project file read or write error.
#[derive(Debug, Error)]
pub enum ProjectIoError {
    /// File I/O error.
    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Temp file could not be renamed over the target.
    #[error("failed to replace {target_path} with {temp_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The path lacks the suffix the caller insisted on.
    #[error("{path} does not carry the required .{expected} suffix")]
    SuffixMismatch {
        path: PathBuf,
        expected: &'static str,
    },

    /// The path's suffix names no known format.
    #[error("cannot tell the format of {path}: expected a .udt or .xml suffix")]
    UnknownSuffix { path: PathBuf },

    /// The file decompressed fine but its XML did not parse or resolve.
    #[error("invalid project document")]
    Codec {
        #[from]
        source: XmlError,
    },
}

/// Result type alias for envelope operations.
pub type Result<T> = std::result::Result<T, ProjectIoError>;
