//! Error types for galleries, previews and sessions.

use looks_ops::FilterError;
use looks_tools::ToolError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for gallery operations.
pub type GalleryResult<T> = Result<T, GalleryError>;

/// Gallery, cache and session errors.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// A gallery needs at least one look.
    #[error("gallery has no looks")]
    Empty,

    /// Two looks share a name, so previews would share a cache key.
    #[error("duplicate look name: {name}")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// A configured look name is not a known preset.
    #[error("unknown look: {name}")]
    UnknownLook {
        /// Name from the configuration.
        name: String,
    },

    /// The configured initial look is past the end of the gallery.
    #[error("initial look {index} out of range (gallery has {len})")]
    InitialOutOfRange {
        /// Requested index.
        index: usize,
        /// Gallery length.
        len: usize,
    },

    /// A pick, highlight or preview index is past the end of the gallery.
    #[error("index {index} out of range (gallery has {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Gallery length.
        len: usize,
    },

    /// No base image has been set.
    #[error("no base image")]
    NoBaseImage,

    /// A filter failed to render.
    #[error("render failed: {0}")]
    Render(#[from] FilterError),

    /// The render this request was waiting on panicked.
    #[error("render of '{name}' was abandoned")]
    Abandoned {
        /// Look name.
        name: String,
    },

    /// Tool or parameter table error.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Config file not found.
    #[error("config file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched.
        path: PathBuf,
    },

    /// I/O error reading a config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GalleryError {
    /// Returns `true` when retrying the same request may succeed.
    ///
    /// Render failures on unsupported input and a missing base image both
    /// clear up once a suitable image is set. An abandoned render left no
    /// in-flight entry behind, so the next request renders afresh.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Render(e) => e.is_retryable(),
            Self::NoBaseImage | Self::Abandoned { .. } => true,
            _ => false,
        }
    }
}
