use serde::{Deserialize, Serialize};

use crate::api::ApiConfig;
use crate::scraper::ScraperConfig;
use crate::season::AvailabilityPolicy;
use crate::sink::{DiskSinkConfig, SinkBackend, SinkConfig};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub sink: SinkConfig,
    #[serde(default)]
    pub seasons: SeasonsConfig,
    #[serde(default)]
    pub scraper: ScraperConfig,
}

/// Season validation settings (`[seasons]` section).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SeasonsConfig {
    #[serde(default)]
    pub availability_policy: AvailabilityPolicy,
}

/// Sanitized config for logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub api: ApiConfig,
    pub sink: SanitizedSinkConfig,
    pub seasons: SeasonsConfig,
    pub scraper: ScraperConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSinkConfig {
    pub backend: SinkBackend,
    pub disk: DiskSinkConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_store: Option<SanitizedObjectStoreConfig>,
}

/// Sanitized object store config (keys and bearer token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedObjectStoreConfig {
    pub endpoint: String,
    pub bucket: String,
    pub region: String,
    pub aws_credentials_configured: bool,
    pub bearer_token_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            api: config.api.clone(),
            sink: SanitizedSinkConfig {
                backend: config.sink.backend,
                disk: config.sink.disk.clone(),
                object_store: config
                    .sink
                    .object_store
                    .as_ref()
                    .map(|s| SanitizedObjectStoreConfig {
                        endpoint: s.endpoint.clone(),
                        bucket: s.bucket.clone(),
                        region: s.region.clone(),
                        aws_credentials_configured: s.credentials().is_some(),
                        bearer_token_configured: s
                            .bearer_token
                            .as_ref()
                            .is_some_and(|t| !t.is_empty()),
                        timeout_secs: s.timeout_secs,
                    }),
            },
            seasons: config.seasons,
            scraper: config.scraper.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, "https://statsapi.web.nhl.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.sink.backend, SinkBackend::Disk);
        assert_eq!(
            config.seasons.availability_policy,
            AvailabilityPolicy::SeptemberCutover
        );
        assert_eq!(config.scraper.list_concurrency, 40);
    }

    #[test]
    fn test_deserialize_object_store_config() {
        let toml = r#"
[sink]
backend = "object_store"

[sink.object_store]
endpoint = "https://s3.us-east-1.amazonaws.com"
bucket = "nhl-stats"
region = "us-west-2"
access_key_id = "AKIDEXAMPLE"
secret_access_key = "secret"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.sink.backend, SinkBackend::ObjectStore);
        let store = config.sink.object_store.unwrap();
        assert_eq!(store.bucket, "nhl-stats");
        assert_eq!(store.region, "us-west-2");
        assert_eq!(store.timeout_secs, 30);
        assert!(store.credentials().is_some());
    }

    #[test]
    fn test_deserialize_strict_policy() {
        let toml = r#"
[seasons]
availability_policy = "strict"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.seasons.availability_policy, AvailabilityPolicy::Strict);
    }

    #[test]
    fn test_unknown_policy_fails() {
        let toml = r#"
[seasons]
availability_policy = "whenever"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_sanitized_config_hides_token() {
        let toml = r#"
[sink.object_store]
endpoint = "http://localhost:9000"
bucket = "nhl"
bearer_token = "super-secret"
access_key_id = "AKIDEXAMPLE"
secret_access_key = "very-secret-key"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let sanitized = SanitizedConfig::from(&config);

        let store = sanitized.sink.object_store.as_ref().unwrap();
        assert!(store.bearer_token_configured);
        assert!(store.aws_credentials_configured);
        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("super-secret"));
        assert!(!json.contains("very-secret-key"));
        assert!(!json.contains("AKIDEXAMPLE"));
    }
}
