//! Data-source error types.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by a [`DataSource`](super::DataSource) backend.
///
/// The fetch layer collapses these into a single message-carrying
/// [`FetchError`](crate::fetch::FetchError); the variants exist so the CLI
/// and logs can say what actually went wrong.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP transport error (connect, timeout, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected shape.
    #[error("malformed response: {0}")]
    Parse(String),

    /// Snapshot file could not be read or written.
    #[error("snapshot {}: {source}", path.display())]
    SnapshotIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot document is not valid JSON of the expected shape.
    #[error("invalid snapshot: {0}")]
    SnapshotFormat(#[from] serde_json::Error),

    /// Backend could not be reached in time, or at all.
    #[error("{0}")]
    Unavailable(String),
}
