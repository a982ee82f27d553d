//! Configuration for the sink module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::sigv4::AwsCredentials;

/// Which backend receives written documents.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SinkBackend {
    #[default]
    Disk,
    ObjectStore,
}

/// Sink configuration (`[sink]` section).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SinkConfig {
    #[serde(default)]
    pub backend: SinkBackend,
    #[serde(default)]
    pub disk: DiskSinkConfig,
    /// Required when `backend = "object_store"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_store: Option<ObjectStoreConfig>,
}

/// Local disk backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiskSinkConfig {
    /// Directory the relative output paths are resolved against.
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

impl Default for DiskSinkConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// S3-compatible object store configuration.
///
/// With `access_key_id` and `secret_access_key` set, every PUT is signed
/// with AWS Signature Version 4. Otherwise `bearer_token` is sent if set,
/// and the request goes out unauthenticated if neither is.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObjectStoreConfig {
    /// Endpoint URL (e.g., "https://s3.us-east-1.amazonaws.com").
    pub endpoint: String,
    /// Bucket name.
    pub bucket: String,
    /// Region used in the signature scope (default: "us-east-1").
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
    /// Session token of temporary credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    /// Bearer token sent with every PUT when no AWS keys are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl ObjectStoreConfig {
    /// Unauthenticated config with default region and timeout.
    pub fn new(endpoint: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            region: default_region(),
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            bearer_token: None,
            timeout_secs: default_timeout(),
        }
    }

    /// AWS credentials, when both halves of the key pair are set.
    pub fn credentials(&self) -> Option<AwsCredentials> {
        let access_key_id = non_empty(&self.access_key_id)?;
        let secret_access_key = non_empty(&self.secret_access_key)?;
        Some(AwsCredentials {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            session_token: non_empty(&self.session_token).map(str::to_string),
        })
    }

    /// Fills missing AWS credentials from the standard `AWS_ACCESS_KEY_ID`,
    /// `AWS_SECRET_ACCESS_KEY`, `AWS_SESSION_TOKEN` and `AWS_REGION`
    /// environment variables.
    pub fn with_env_credentials(self) -> Self {
        self.with_credentials_from(|name| std::env::var(name).ok())
    }

    /// Like [`ObjectStoreConfig::with_env_credentials`], reading variables
    /// through `lookup`. Explicitly configured keys are kept as they are.
    pub fn with_credentials_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if self.credentials().is_some() {
            return self;
        }
        let (Some(access_key_id), Some(secret_access_key)) = (
            lookup("AWS_ACCESS_KEY_ID").filter(|v| !v.is_empty()),
            lookup("AWS_SECRET_ACCESS_KEY").filter(|v| !v.is_empty()),
        ) else {
            return self;
        };
        self.access_key_id = Some(access_key_id);
        self.secret_access_key = Some(secret_access_key);
        self.session_token = lookup("AWS_SESSION_TOKEN").filter(|v| !v.is_empty());
        if let Some(region) = lookup("AWS_REGION").filter(|v| !v.is_empty()) {
            if self.region == default_region() {
                self.region = region;
            }
        }
        self
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_timeout() -> u32 {
    30
}
