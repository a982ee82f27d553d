//! Local file system sink.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use super::config::DiskSinkConfig;
use super::encode::encode_gzip_json;
use super::error::SinkError;
use super::traits::Sink;
use super::types::OutputPath;
use crate::metrics;

/// Writes gzip JSON documents below a root directory.
pub struct DiskSink {
    root: PathBuf,
}

impl DiskSink {
    pub fn new(config: DiskSinkConfig) -> Self {
        Self { root: config.root }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute (or root-relative) location of `path` on disk.
    pub fn target(&self, path: &OutputPath) -> PathBuf {
        self.root.join(path.relative_path())
    }
}

#[async_trait]
impl Sink for DiskSink {
    fn name(&self) -> &str {
        "disk"
    }

    async fn write(&self, path: &OutputPath, payload: &Value) -> Result<(), SinkError> {
        let bytes = encode_gzip_json(payload)?;
        let target = self.target(path);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| SinkError::DirectoryCreationFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        fs::write(&target, &bytes)
            .await
            .map_err(|e| SinkError::WriteFailed {
                path: target.clone(),
                source: e,
            })?;

        debug!(path = %target.display(), bytes = bytes.len(), "Wrote document");
        metrics::FILES_WRITTEN.with_label_values(&["disk"]).inc();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::decode_gzip_json;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DiskSink::with_root(temp_dir.path());
        let path = OutputPath::new("./game_data/2017-10-04/", "TORvsWPG.json.gz");
        let payload = json!({"gameData": {"teams": {"away": {"abbreviation": "TOR"}}}});

        sink.write(&path, &payload).await.unwrap();

        let written = temp_dir.path().join("game_data/2017-10-04/TORvsWPG.json.gz");
        assert!(written.exists());
        let bytes = std::fs::read(&written).unwrap();
        let decoded: Value = decode_gzip_json(&bytes).unwrap();
        assert_eq!(decoded, payload);
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let sink = DiskSink::with_root(temp_dir.path());
        let path = OutputPath::awards();

        sink.write(&path, &json!({"version": 1})).await.unwrap();
        sink.write(&path, &json!({"version": 2})).await.unwrap();

        let bytes = std::fs::read(sink.target(&path)).unwrap();
        let decoded: Value = decode_gzip_json(&bytes).unwrap();
        assert_eq!(decoded["version"], 2);
    }

    #[tokio::test]
    async fn test_write_fails_when_root_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let sink = DiskSink::with_root(&blocker);
        let result = sink.write(&OutputPath::awards(), &json!({})).await;
        assert!(matches!(
            result,
            Err(SinkError::DirectoryCreationFailed { .. })
        ));
    }

    #[test]
    fn test_default_config_root() {
        let sink = DiskSink::new(DiskSinkConfig::default());
        assert_eq!(sink.root(), Path::new("."));
        assert_eq!(
            sink.target(&OutputPath::draft(2001)),
            PathBuf::from("./draft_data/2001_draft.json.gz")
        );
    }
}
