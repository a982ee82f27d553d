//! In-memory sink for testing.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::sink::{encode_gzip_json, OutputPath, Sink, SinkError};

/// Sink that keeps every written document in memory.
///
/// Payloads go through the same gzip encoding as the real sinks, so a
/// document that cannot be serialized fails here too.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    documents: Arc<RwLock<HashMap<String, Value>>>,
    /// Paths (as displayed) whose write fails.
    failing: Arc<RwLock<HashSet<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make writes to `path` fail.
    pub async fn fail_on(&self, path: &OutputPath) {
        self.failing.write().await.insert(path.to_string());
    }

    /// Document written at `path`, if any.
    pub async fn get(&self, path: &OutputPath) -> Option<Value> {
        self.documents.read().await.get(&path.to_string()).cloned()
    }

    /// Every written path, sorted.
    pub async fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.documents.read().await.keys().cloned().collect();
        paths.sort();
        paths
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl Sink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    async fn write(&self, path: &OutputPath, payload: &Value) -> Result<(), SinkError> {
        let key = path.to_string();
        if self.failing.read().await.contains(&key) {
            return Err(SinkError::WriteFailed {
                path: path.relative_path(),
                source: std::io::Error::other("mock write failure"),
            });
        }
        encode_gzip_json(payload)?;
        self.documents.write().await.insert(key, payload.clone());
        Ok(())
    }
}
