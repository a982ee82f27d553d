//! Sink module for persisting fetched documents.
//!
//! Every document is serialized to JSON, gzip-compressed, and handed to one
//! of two mutually exclusive backends:
//!
//! - [`DiskSink`] writes under a local root, creating directories as needed
//! - [`ObjectStoreSink`] PUTs to an S3-compatible bucket with
//!   `Content-Type: application/json` and `Content-Encoding: gzip`, signed
//!   with AWS Signature Version 4 when credentials are configured
//!
//! Failures are returned to the caller as-is; sinks never retry.

mod config;
mod disk;
mod encode;
mod error;
mod object_store;
mod sigv4;
mod traits;
mod types;

pub use config::{DiskSinkConfig, ObjectStoreConfig, SinkBackend, SinkConfig};
pub use disk::DiskSink;
pub use encode::{decode_gzip_json, encode_gzip_json};
pub use error::SinkError;
pub use object_store::ObjectStoreSink;
pub use sigv4::{AwsCredentials, SigV4Signer};
pub use traits::Sink;
pub use types::OutputPath;

/// Factory function to create the configured sink backend.
pub fn create_sink(config: &SinkConfig) -> Result<Box<dyn Sink>, SinkError> {
    match config.backend {
        SinkBackend::Disk => Ok(Box::new(DiskSink::new(config.disk.clone()))),
        SinkBackend::ObjectStore => {
            let store_config = config.object_store.clone().ok_or_else(|| {
                SinkError::NotConfigured(
                    "[sink.object_store] must be set when using the object_store backend"
                        .to_string(),
                )
            })?;
            Ok(Box::new(ObjectStoreSink::new(store_config)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_sink_disk() {
        let sink = create_sink(&SinkConfig::default()).unwrap();
        assert_eq!(sink.name(), "disk");
    }

    #[test]
    fn test_create_sink_object_store() {
        let config = SinkConfig {
            backend: SinkBackend::ObjectStore,
            disk: DiskSinkConfig::default(),
            object_store: Some(ObjectStoreConfig::new("http://localhost:9000", "nhl")),
        };
        let sink = create_sink(&config).unwrap();
        assert_eq!(sink.name(), "object_store");
    }

    #[test]
    fn test_create_sink_object_store_missing_section() {
        let config = SinkConfig {
            backend: SinkBackend::ObjectStore,
            disk: DiskSinkConfig::default(),
            object_store: None,
        };
        assert!(matches!(
            create_sink(&config),
            Err(SinkError::NotConfigured(_))
        ));
    }
}
