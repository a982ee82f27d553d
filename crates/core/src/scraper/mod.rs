//! The fetch pipeline.
//!
//! A [`Scraper`] owns the player and game indexes and shares one API client
//! and one sink across every worker. Construction walks every historical
//! season to fill the indexes; the detail operations then fan out over them.
//!
//! ```rust,ignore
//! let (scraper, report) = Scraper::build(api, sink, config, policy).await?;
//! let draft = scraper.fetch_draft_data(Some("20172018")).await?;
//! ```

mod config;
mod details;
mod enumerations;
mod lists;

pub use config::ScraperConfig;
pub use enumerations::{fetch_standings_types, fetch_stat_types};

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::api::StatsApi;
use crate::error::ScrapeError;
use crate::index::{GameIndex, Indexes, PlayerIndex};
use crate::report::ListReport;
use crate::season::{historical_seasons, AvailabilityPolicy};
use crate::sink::Sink;

/// Fetches NHL data and hands every document to a [`Sink`].
pub struct Scraper {
    api: Arc<dyn StatsApi>,
    sink: Arc<dyn Sink>,
    config: ScraperConfig,
    policy: AvailabilityPolicy,
    today: NaiveDate,
    indexes: Indexes,
    stat_types: Vec<String>,
    standings_types: Vec<String>,
}

impl Scraper {
    /// Creates a scraper with empty indexes. Call [`Scraper::prepare`] (or use
    /// [`Scraper::build`]) before running the detail operations.
    pub fn new(
        api: Arc<dyn StatsApi>,
        sink: Arc<dyn Sink>,
        config: ScraperConfig,
        policy: AvailabilityPolicy,
    ) -> Self {
        Self {
            api,
            sink,
            config,
            policy,
            today: Local::now().date_naive(),
            indexes: Indexes::default(),
            stat_types: Vec::new(),
            standings_types: Vec::new(),
        }
    }

    /// Pins the date used for season and draft-year validation.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Creates a scraper, loads the enumerations and indexes every
    /// historical season.
    pub async fn build(
        api: Arc<dyn StatsApi>,
        sink: Arc<dyn Sink>,
        config: ScraperConfig,
        policy: AvailabilityPolicy,
    ) -> Result<(Self, ListReport), ScrapeError> {
        let mut scraper = Self::new(api, sink, config, policy);
        let report = scraper.prepare().await?;
        Ok((scraper, report))
    }

    /// Loads the enumerations and indexes every season from 1917-18 up to the
    /// latest one the availability policy accepts as of [`Scraper::today`].
    ///
    /// Enumeration failures are returned; per-season failures end up in the
    /// report.
    pub async fn prepare(&mut self) -> Result<ListReport, ScrapeError> {
        self.load_enumerations().await?;
        Ok(self.index_seasons(historical_seasons(self.today, self.policy)).await)
    }

    pub fn players(&self) -> &PlayerIndex {
        &self.indexes.players
    }

    pub fn games(&self) -> &GameIndex {
        &self.indexes.games
    }

    pub fn indexes(&self) -> &Indexes {
        &self.indexes
    }

    /// Stat type display names, as loaded by [`Scraper::prepare`].
    pub fn stat_types(&self) -> &[String] {
        &self.stat_types
    }

    /// Standings type names, as loaded by [`Scraper::prepare`].
    pub fn standings_types(&self) -> &[String] {
        &self.standings_types
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }
}
