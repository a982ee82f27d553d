//! Mock stats API for testing.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::api::{ApiError, StatsApi};
use crate::season::Season;

/// A recorded API request for test assertions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordedApiRequest {
    Roster { season: Season },
    Schedule { season: Season },
    Resource { link: String },
    PlayerStats {
        link: String,
        stat_type: String,
        season: Season,
    },
    Draft { year: i32 },
    Awards,
    StatTypes,
    StandingsTypes,
}

/// Mock implementation of the StatsApi trait.
///
/// Provides controllable behavior for testing:
/// - Serve canned documents per season, link or year
/// - Track requests for assertions
/// - Fail chosen requests with a 500
///
/// Rosters and schedules that were not configured come back empty, so a
/// full historical sweep works without setting up every season. Other
/// unconfigured requests answer 404.
///
/// # Example
///
/// ```rust,ignore
/// use nhlscrape_core::testing::{fixtures, MockStatsApi, RecordedApiRequest};
///
/// let api = MockStatsApi::new();
/// api.set_draft(2017, fixtures::draft_document(2017)).await;
/// api.fail_on(RecordedApiRequest::Draft { year: 2018 }).await;
/// ```
#[derive(Debug)]
pub struct MockStatsApi {
    rosters: Arc<RwLock<HashMap<Season, Value>>>,
    schedules: Arc<RwLock<HashMap<Season, Value>>>,
    resources: Arc<RwLock<HashMap<String, Value>>>,
    player_stats: Arc<RwLock<HashMap<(String, String, Season), Value>>>,
    drafts: Arc<RwLock<HashMap<i32, Value>>>,
    awards: Arc<RwLock<Option<Value>>>,
    stat_types: Arc<RwLock<Value>>,
    standings_types: Arc<RwLock<Value>>,
    /// Requests answered with a 500.
    failing: Arc<RwLock<HashSet<RecordedApiRequest>>>,
    requests: Arc<RwLock<Vec<RecordedApiRequest>>>,
}

impl Default for MockStatsApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStatsApi {
    pub fn new() -> Self {
        Self {
            rosters: Arc::new(RwLock::new(HashMap::new())),
            schedules: Arc::new(RwLock::new(HashMap::new())),
            resources: Arc::new(RwLock::new(HashMap::new())),
            player_stats: Arc::new(RwLock::new(HashMap::new())),
            drafts: Arc::new(RwLock::new(HashMap::new())),
            awards: Arc::new(RwLock::new(None)),
            stat_types: Arc::new(RwLock::new(json!([]))),
            standings_types: Arc::new(RwLock::new(json!([]))),
            failing: Arc::new(RwLock::new(HashSet::new())),
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub async fn set_roster(&self, season: Season, document: Value) {
        self.rosters.write().await.insert(season, document);
    }

    pub async fn set_schedule(&self, season: Season, document: Value) {
        self.schedules.write().await.insert(season, document);
    }

    /// Document served for a link, e.g. a player profile or a game feed.
    pub async fn set_resource(&self, link: &str, document: Value) {
        self.resources
            .write()
            .await
            .insert(link.to_string(), document);
    }

    pub async fn set_player_stats(
        &self,
        link: &str,
        stat_type: &str,
        season: Season,
        document: Value,
    ) {
        self.player_stats
            .write()
            .await
            .insert((link.to_string(), stat_type.to_string(), season), document);
    }

    pub async fn set_draft(&self, year: i32, document: Value) {
        self.drafts.write().await.insert(year, document);
    }

    pub async fn set_awards(&self, document: Value) {
        *self.awards.write().await = Some(document);
    }

    pub async fn set_stat_types(&self, document: Value) {
        *self.stat_types.write().await = document;
    }

    pub async fn set_standings_types(&self, document: Value) {
        *self.standings_types.write().await = document;
    }

    /// Make every matching request fail with a 500.
    pub async fn fail_on(&self, request: RecordedApiRequest) {
        self.failing.write().await.insert(request);
    }

    // =========================================================================
    // Assertions
    // =========================================================================

    pub async fn recorded_requests(&self) -> Vec<RecordedApiRequest> {
        self.requests.read().await.clone()
    }

    /// Number of times `request` was made.
    pub async fn request_count(&self, request: &RecordedApiRequest) -> usize {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| *r == request)
            .count()
    }

    pub async fn clear_recorded(&self) {
        self.requests.write().await.clear();
    }

    async fn record(&self, request: RecordedApiRequest) -> Result<(), ApiError> {
        let fails = self.failing.read().await.contains(&request);
        self.requests.write().await.push(request);
        if fails {
            return Err(ApiError::Status {
                status: 500,
                message: "mock failure".to_string(),
            });
        }
        Ok(())
    }
}

fn not_found(what: impl Into<String>) -> ApiError {
    ApiError::NotFound(what.into())
}

#[async_trait]
impl StatsApi for MockStatsApi {
    async fn roster(&self, season: Season) -> Result<Value, ApiError> {
        self.record(RecordedApiRequest::Roster { season }).await?;
        Ok(self
            .rosters
            .read()
            .await
            .get(&season)
            .cloned()
            .unwrap_or_else(|| json!({"teams": []})))
    }

    async fn schedule(&self, season: Season) -> Result<Value, ApiError> {
        self.record(RecordedApiRequest::Schedule { season }).await?;
        Ok(self
            .schedules
            .read()
            .await
            .get(&season)
            .cloned()
            .unwrap_or_else(|| json!({"dates": []})))
    }

    async fn resource(&self, link: &str) -> Result<Value, ApiError> {
        self.record(RecordedApiRequest::Resource {
            link: link.to_string(),
        })
        .await?;
        self.resources
            .read()
            .await
            .get(link)
            .cloned()
            .ok_or_else(|| not_found(link))
    }

    async fn player_stats(
        &self,
        link: &str,
        stat_type: &str,
        season: Season,
    ) -> Result<Value, ApiError> {
        self.record(RecordedApiRequest::PlayerStats {
            link: link.to_string(),
            stat_type: stat_type.to_string(),
            season,
        })
        .await?;
        self.player_stats
            .read()
            .await
            .get(&(link.to_string(), stat_type.to_string(), season))
            .cloned()
            .ok_or_else(|| not_found(format!("{link}/stats {stat_type} {season}")))
    }

    async fn draft(&self, year: i32) -> Result<Value, ApiError> {
        self.record(RecordedApiRequest::Draft { year }).await?;
        self.drafts
            .read()
            .await
            .get(&year)
            .cloned()
            .ok_or_else(|| not_found(format!("draft {year}")))
    }

    async fn awards(&self) -> Result<Value, ApiError> {
        self.record(RecordedApiRequest::Awards).await?;
        self.awards
            .read()
            .await
            .clone()
            .ok_or_else(|| not_found("awards"))
    }

    async fn stat_types(&self) -> Result<Value, ApiError> {
        self.record(RecordedApiRequest::StatTypes).await?;
        Ok(self.stat_types.read().await.clone())
    }

    async fn standings_types(&self) -> Result<Value, ApiError> {
        self.record(RecordedApiRequest::StandingsTypes).await?;
        Ok(self.standings_types.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_lists_are_empty() {
        let api = MockStatsApi::new();
        let season = Season::starting(1950);

        assert_eq!(api.roster(season).await.unwrap(), json!({"teams": []}));
        assert_eq!(api.schedule(season).await.unwrap(), json!({"dates": []}));
        assert!(matches!(
            api.resource("/api/v1/people/1").await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_fail_on_is_recorded() {
        let api = MockStatsApi::new();
        api.set_draft(2001, json!({"drafts": []})).await;
        api.fail_on(RecordedApiRequest::Draft { year: 2001 }).await;

        assert!(matches!(
            api.draft(2001).await,
            Err(ApiError::Status { status: 500, .. })
        ));
        assert_eq!(
            api.request_count(&RecordedApiRequest::Draft { year: 2001 }).await,
            1
        );
    }
}
