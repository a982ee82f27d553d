use super::{types::Config, ConfigError};
use crate::sink::SinkBackend;

/// Validate configuration
/// Currently validates:
/// - API base URL is set and the timeout is not 0
/// - Worker pools have at least one slot
/// - The object store backend has an endpoint, a bucket, a region and a
///   complete AWS key pair if any
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.api.base_url.trim().is_empty() {
        return Err(invalid("api.base_url cannot be empty"));
    }
    if config.api.timeout_secs == 0 {
        return Err(invalid("api.timeout_secs cannot be 0"));
    }

    if config.scraper.list_concurrency == 0 {
        return Err(invalid("scraper.list_concurrency cannot be 0"));
    }
    if config.scraper.detail_concurrency == 0 {
        return Err(invalid("scraper.detail_concurrency cannot be 0"));
    }

    if config.sink.backend == SinkBackend::ObjectStore {
        let Some(store) = &config.sink.object_store else {
            return Err(invalid(
                "sink.object_store must be set when sink.backend is \"object_store\"",
            ));
        };
        if store.endpoint.trim().is_empty() {
            return Err(invalid("sink.object_store.endpoint cannot be empty"));
        }
        if store.bucket.trim().is_empty() {
            return Err(invalid("sink.object_store.bucket cannot be empty"));
        }
        if store.timeout_secs == 0 {
            return Err(invalid("sink.object_store.timeout_secs cannot be 0"));
        }
        if store.access_key_id.is_some() != store.secret_access_key.is_some() {
            return Err(invalid(
                "sink.object_store.access_key_id and secret_access_key must be set together",
            ));
        }
        if store.region.trim().is_empty() {
            return Err(invalid("sink.object_store.region cannot be empty"));
        }
    }

    Ok(())
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::ValidationError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::ObjectStoreConfig;

    fn object_store(endpoint: &str, bucket: &str) -> ObjectStoreConfig {
        ObjectStoreConfig::new(endpoint, bucket)
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_zero_concurrency_fails() {
        let mut config = Config::default();
        config.scraper.detail_concurrency = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_empty_base_url_fails() {
        let mut config = Config::default();
        config.api.base_url = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_timeout_fails() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_object_store_requires_section() {
        let mut config = Config::default();
        config.sink.backend = SinkBackend::ObjectStore;
        assert!(validate_config(&config).is_err());

        config.sink.object_store = Some(object_store("http://localhost:9000", ""));
        assert!(validate_config(&config).is_err());

        config.sink.object_store = Some(object_store("http://localhost:9000", "nhl"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_object_store_half_key_pair_fails() {
        let mut config = Config::default();
        config.sink.backend = SinkBackend::ObjectStore;
        let mut store = object_store("https://s3.amazonaws.com", "nhl");
        store.access_key_id = Some("AKID".to_string());
        config.sink.object_store = Some(store.clone());
        assert!(validate_config(&config).is_err());

        store.secret_access_key = Some("secret".to_string());
        config.sink.object_store = Some(store);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_object_store_section_ignored_for_disk() {
        let mut config = Config::default();
        config.sink.object_store = Some(object_store("", ""));
        assert!(validate_config(&config).is_ok());
    }
}
