//! Client for the public NHL stats API.
//!
//! Responses are returned as untyped JSON: the upstream shapes are not
//! versioned, and callers only pick out the handful of fields they need.

mod client;
mod endpoints;

pub use client::{ApiConfig, StatsApiClient};
pub use endpoints::Endpoint;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::season::Season;

/// Errors that can occur when talking to the stats API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Read access to the stats API endpoints used by the scraper.
///
/// Implemented by [`StatsApiClient`] and by the mock in `testing`.
#[async_trait]
pub trait StatsApi: Send + Sync {
    /// Every team with its roster for one season.
    async fn roster(&self, season: Season) -> Result<Value, ApiError>;

    /// Every scheduled game from September 1st of the season's start year to
    /// July 1st of its end year.
    async fn schedule(&self, season: Season) -> Result<Value, ApiError>;

    /// A resource addressed by an API link such as `/api/v1/people/8471214`.
    async fn resource(&self, link: &str) -> Result<Value, ApiError>;

    /// Stat block of a player (by API link) for one season.
    async fn player_stats(
        &self,
        link: &str,
        stat_type: &str,
        season: Season,
    ) -> Result<Value, ApiError>;

    /// Draft picks for one year.
    async fn draft(&self, year: i32) -> Result<Value, ApiError>;

    /// Every award.
    async fn awards(&self) -> Result<Value, ApiError>;

    /// Enumeration of stat types.
    async fn stat_types(&self) -> Result<Value, ApiError>;

    /// Enumeration of standings types.
    async fn standings_types(&self) -> Result<Value, ApiError>;
}
