//! Error types for robots-exclusion.

use std::sync::Arc;

use thiserror::Error;

/// Error type for robots-exclusion operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error while reading a robots.txt stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input the grammar cannot tokenize
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A parse handler rejected an event
    #[error("handler error: {0}")]
    Handler(String),

    /// Invalid path pattern in an allow/disallow directive
    #[error("invalid path pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Resource URI with no robots.txt origin
    #[error("invalid resource URI: {0}")]
    InvalidUri(String),

    /// Download error
    #[error("download error: {0}")]
    Download(String),

    /// Service used before start or after stop
    #[error("service not running")]
    NotRunning,

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure of a load shared between coalesced callers
    #[error("{0}")]
    Shared(Arc<Error>),
}

/// Result type alias for robots-exclusion operations.
pub type Result<T> = std::result::Result<T, Error>;
