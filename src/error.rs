//! Error handling for the system monitor.

use std::path::PathBuf;

/// A specialized `Result` type for system monitor operations.
pub type Result<T> = std::result::Result<T, SystemError>;

/// The main error type for system monitor operations.
///
/// None of these are fatal to the daemon: the periodic loops log them and
/// try again on the next tick.
#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    /// A counter or sensor file could not be opened or read
    #[error("Cannot read {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A counter file was readable but its contents made no sense
    #[error("Malformed source {}: {reason}", path.display())]
    MalformedSource { path: PathBuf, reason: String },

    /// The snapshot file could not be written
    #[error("Unable to write to {}: {source}", path.display())]
    SinkUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Web server error
    #[error("Web server error: {0}")]
    WebServer(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SystemError {
    /// Create a new source-unavailable error
    pub fn source_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create a new malformed-source error
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedSource {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new sink error
    pub fn sink_unwritable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SinkUnwritable {
            path: path.into(),
            source,
        }
    }

    /// Create a new web server error
    pub fn web_server_error(msg: impl Into<String>) -> Self {
        Self::WebServer(msg.into())
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
