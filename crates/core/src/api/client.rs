//! reqwest-backed stats API client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::endpoints::Endpoint;
use super::{ApiError, StatsApi};
use crate::metrics;
use crate::season::Season;

/// Stats API client configuration (`[api]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL (default: https://statsapi.web.nhl.com).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// User-Agent header sent with every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: None,
        }
    }
}

fn default_base_url() -> String {
    "https://statsapi.web.nhl.com".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Stats API client.
///
/// Holds one pooled `reqwest::Client`; share it behind an `Arc` rather than
/// building one per request.
pub struct StatsApiClient {
    client: Client,
    base_url: String,
}

impl StatsApiClient {
    /// Create a new stats API client.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let user_agent = config
            .user_agent
            .unwrap_or_else(|| format!("nhlscrape/{}", env!("CARGO_PKG_VERSION")));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, endpoint: Endpoint<'_>) -> Result<Value, ApiError> {
        let label = endpoint.label();
        let started = Instant::now();
        let result = self.fetch(&endpoint).await;

        metrics::API_REQUEST_DURATION
            .with_label_values(&[label])
            .observe(started.elapsed().as_secs_f64());
        metrics::API_REQUESTS
            .with_label_values(&[label, if result.is_ok() { "success" } else { "error" }])
            .inc();

        result
    }

    async fn fetch(&self, endpoint: &Endpoint<'_>) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        let query = endpoint.query();

        debug!(url = %url, query = ?query, "Stats API request");

        let response = self.client.get(&url).query(&query).send().await?;

        let status = response.status();
        if status == 404 {
            return Err(ApiError::NotFound(url));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        response.json().await.map_err(|e| {
            ApiError::ParseError(format!("Failed to parse {} response: {}", endpoint.label(), e))
        })
    }
}

#[async_trait]
impl StatsApi for StatsApiClient {
    async fn roster(&self, season: Season) -> Result<Value, ApiError> {
        self.get(Endpoint::Roster(season)).await
    }

    async fn schedule(&self, season: Season) -> Result<Value, ApiError> {
        self.get(Endpoint::Schedule(season)).await
    }

    async fn resource(&self, link: &str) -> Result<Value, ApiError> {
        self.get(Endpoint::Resource(link)).await
    }

    async fn player_stats(
        &self,
        link: &str,
        stat_type: &str,
        season: Season,
    ) -> Result<Value, ApiError> {
        self.get(Endpoint::PlayerStats {
            link,
            stat_type,
            season,
        })
        .await
    }

    async fn draft(&self, year: i32) -> Result<Value, ApiError> {
        self.get(Endpoint::Draft(year)).await
    }

    async fn awards(&self) -> Result<Value, ApiError> {
        self.get(Endpoint::Awards).await
    }

    async fn stat_types(&self) -> Result<Value, ApiError> {
        self.get(Endpoint::StatTypes).await
    }

    async fn standings_types(&self) -> Result<Value, ApiError> {
        self.get(Endpoint::StandingsTypes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "https://statsapi.web.nhl.com");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = StatsApiClient::new(ApiConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
