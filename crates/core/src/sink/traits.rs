//! Trait definitions for the sink module.

use async_trait::async_trait;
use serde_json::Value;

use super::error::SinkError;
use super::types::OutputPath;

/// Destination for fetched documents.
///
/// Implementations must be safe to share across concurrent workers.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Returns the name of this sink implementation.
    fn name(&self) -> &str;

    /// Gzip-compresses `payload` as JSON and stores it at `path`.
    async fn write(&self, path: &OutputPath, payload: &Value) -> Result<(), SinkError>;
}
