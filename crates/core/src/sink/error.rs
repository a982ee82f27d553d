//! Error types for the sink module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting a document.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Payload could not be serialized to JSON.
    #[error("Failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Gzip compression or decompression failed.
    #[error("Gzip stream error: {0}")]
    Compression(#[source] std::io::Error),

    /// Failed to create the target directory.
    #[error("Failed to create directory: {path}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the target file.
    #[error("Failed to write file: {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Request to the object store failed.
    #[error("Object store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Object store answered with a non-success status.
    #[error("Object store rejected {key}: {status} - {message}")]
    Rejected {
        key: String,
        status: u16,
        message: String,
    },

    /// Request signing failed.
    #[error("Failed to sign object store request: {0}")]
    Signing(String),

    /// Backend is missing required configuration.
    #[error("Sink not configured: {0}")]
    NotConfigured(String),
}
