//! Unified error type for loading, encoding, and writing icon assets.

use std::path::PathBuf;
use std::time::Duration;

use crate::format::ImageFormat;
use crate::policy::OutputFormat;

/// Boxed codec-specific error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Crate-wide result alias.
pub type Result<T, E = FaviconError> = core::result::Result<T, E>;

/// Unified error type for icon generation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FaviconError {
    /// Reading or writing a file failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source recognized but the decoder rejected its content.
    #[error("decode error ({format:?}): {source}")]
    Decode {
        format: ImageFormat,
        #[source]
        source: BoxError,
    },

    /// Format not recognized from magic bytes or extension.
    #[error("unrecognized image format")]
    UnrecognizedFormat,

    /// Format recognized but no decoder is compiled in for it.
    #[error("format {0:?} not supported (codec not compiled in)")]
    UnsupportedFormat(ImageFormat),

    /// Output format has no encoder compiled in.
    #[error("output format {0} not supported (encoder not compiled in)")]
    UnsupportedOutput(OutputFormat),

    /// Encoder rejected the bitmap.
    #[error("encode error ({format}): {source}")]
    Encode {
        format: OutputFormat,
        #[source]
        source: BoxError,
    },

    /// Packing frames into the ICO container failed.
    #[error("ICO packaging failed: {0}")]
    Package(#[source] BoxError),

    /// Input validation failed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Resource limit exceeded.
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// External tool is not installed or not on `PATH`.
    #[error("{0} not found; install it or point the optimizer at another binary")]
    ToolNotFound(String),

    /// External tool exited unsuccessfully.
    #[error("{program} failed on {} ({status}): {stderr}", path.display())]
    ToolFailed {
        program: String,
        path: PathBuf,
        status: String,
        stderr: String,
    },

    /// External tool did not finish within its time budget.
    #[error("{program} timed out after {after:?} on {}", path.display())]
    Timeout {
        program: String,
        path: PathBuf,
        after: Duration,
    },

    /// Operation cancelled via a [`Stop`](crate::Stop) token.
    #[error("operation cancelled")]
    Cancelled,
}

impl FaviconError {
    /// Wrap a decoder-specific error.
    pub fn from_codec<E>(format: ImageFormat, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        FaviconError::Decode {
            format,
            source: Box::new(error),
        }
    }

    /// Wrap an encoder-specific error.
    pub fn encode_failed<E>(format: OutputFormat, error: E) -> Self
    where
        E: Into<BoxError>,
    {
        FaviconError::Encode {
            format,
            source: error.into(),
        }
    }

    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FaviconError::Io {
            path: path.into(),
            source,
        }
    }
}
