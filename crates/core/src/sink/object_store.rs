//! S3-compatible object store sink.
//!
//! Documents are uploaded with a single HTTP `PUT` to
//! `<endpoint>/<bucket>/<key>` (path-style addressing). Requests are signed
//! with AWS Signature Version 4 when credentials are configured, which is
//! what AWS S3, MinIO and most S3 gateways expect. Bearer tokens and
//! anonymous PUTs remain available for gateways and presigned endpoints.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{AUTHORIZATION, CONTENT_ENCODING, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;
use tracing::debug;

use super::config::ObjectStoreConfig;
use super::encode::encode_gzip_json;
use super::error::SinkError;
use super::sigv4::{amz_date, encode_path_segment, sha256_hex, SigV4Signer};
use super::traits::Sink;
use super::types::OutputPath;
use crate::metrics;

const JSON: &str = "application/json";
const GZIP: &str = "gzip";

/// How uploads authenticate.
#[derive(Debug, Clone)]
enum Auth {
    SigV4(SigV4Signer),
    Bearer(String),
    Anonymous,
}

/// Uploads gzip JSON documents to a bucket.
pub struct ObjectStoreSink {
    client: Client,
    endpoint: Url,
    bucket: String,
    auth: Auth,
}

impl ObjectStoreSink {
    /// Create a new object store sink.
    pub fn new(config: ObjectStoreConfig) -> Result<Self, SinkError> {
        if config.endpoint.trim().is_empty() {
            return Err(SinkError::NotConfigured(
                "object store endpoint is required".to_string(),
            ));
        }
        if config.bucket.trim().is_empty() {
            return Err(SinkError::NotConfigured(
                "object store bucket is required".to_string(),
            ));
        }
        let endpoint = Url::parse(config.endpoint.trim_end_matches('/')).map_err(|e| {
            SinkError::NotConfigured(format!(
                "invalid object store endpoint {:?}: {e}",
                config.endpoint
            ))
        })?;

        let auth = match (config.credentials(), config.bearer_token.as_deref()) {
            (Some(credentials), _) => Auth::SigV4(SigV4Signer::new(credentials, config.region.clone())),
            (None, Some(token)) if !token.is_empty() => Auth::Bearer(token.to_string()),
            _ => Auth::Anonymous,
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            bucket: config.bucket,
            auth,
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Whether uploads carry an AWS Signature Version 4.
    pub fn is_signed(&self) -> bool {
        matches!(self.auth, Auth::SigV4(_))
    }

    fn object_url(&self, key: &str) -> Result<Url, SinkError> {
        let encoded_key = key
            .trim_start_matches('/')
            .split('/')
            .map(encode_path_segment)
            .collect::<Vec<_>>()
            .join("/");
        let url = format!(
            "{}/{}/{}",
            self.endpoint.as_str().trim_end_matches('/'),
            encode_path_segment(&self.bucket),
            encoded_key
        );
        Url::parse(&url).map_err(|e| SinkError::NotConfigured(format!("invalid object URL {url:?}: {e}")))
    }

    fn authenticate(
        &self,
        request: RequestBuilder,
        url: &Url,
        body: &[u8],
    ) -> Result<RequestBuilder, SinkError> {
        match &self.auth {
            Auth::Anonymous => Ok(request),
            Auth::Bearer(token) => Ok(request.bearer_auth(token)),
            Auth::SigV4(signer) => {
                let now = Utc::now();
                let date = amz_date(now);
                let payload_hash = sha256_hex(body);
                let host = host_header(url)?;

                let mut headers = vec![
                    ("content-encoding", GZIP),
                    ("content-type", JSON),
                    ("host", host.as_str()),
                    ("x-amz-content-sha256", payload_hash.as_str()),
                    ("x-amz-date", date.as_str()),
                ];
                if let Some(token) = signer.session_token() {
                    headers.push(("x-amz-security-token", token));
                }
                let authorization =
                    signer.authorization("PUT", url.path(), &headers, &payload_hash, now)?;

                let mut request = request
                    .header("x-amz-content-sha256", payload_hash.as_str())
                    .header("x-amz-date", date.as_str())
                    .header(AUTHORIZATION, authorization);
                if let Some(token) = signer.session_token() {
                    request = request.header("x-amz-security-token", token);
                }
                Ok(request)
            }
        }
    }
}

/// `Host` header value as the HTTP client sends it.
fn host_header(url: &Url) -> Result<String, SinkError> {
    let host = url
        .host_str()
        .ok_or_else(|| SinkError::NotConfigured(format!("object store URL has no host: {url}")))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

#[async_trait]
impl Sink for ObjectStoreSink {
    fn name(&self) -> &str {
        "object_store"
    }

    async fn write(&self, path: &OutputPath, payload: &Value) -> Result<(), SinkError> {
        let bytes = encode_gzip_json(payload)?;
        let key = path.object_key();
        let size = bytes.len();
        let url = self.object_url(&key)?;

        let request = self
            .client
            .put(url.clone())
            .header(CONTENT_TYPE, JSON)
            .header(CONTENT_ENCODING, GZIP);
        let request = self.authenticate(request, &url, &bytes)?;

        let response = request.body(bytes).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Rejected {
                key,
                status: status.as_u16(),
                message: body,
            });
        }

        debug!(bucket = %self.bucket, key = %key, bytes = size, "Uploaded document");
        metrics::FILES_WRITTEN
            .with_label_values(&["object_store"])
            .inc();
        Ok(())
    }
}
