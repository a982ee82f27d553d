//! Index building: one roster unit and one schedule unit per season.

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use super::Scraper;
use crate::error::ScrapeError;
use crate::index::{
    create_index_system, parse_roster, parse_schedule, IndexHandle, IndexUpdate,
};
use crate::report::{failure, ListReport, UnitFailure};
use crate::season::Season;

/// Updates buffered between the list workers and the index writer.
const INDEX_CHANNEL_BUFFER: usize = 1024;

#[derive(Debug, Clone, Copy)]
enum ListUnit {
    Roster(Season),
    Schedule(Season),
}

impl ListUnit {
    fn operation(&self) -> &'static str {
        match self {
            Self::Roster(_) => "roster",
            Self::Schedule(_) => "schedule",
        }
    }

    fn season(&self) -> Season {
        match self {
            Self::Roster(season) | Self::Schedule(season) => *season,
        }
    }
}

impl Scraper {
    /// Fetches rosters and schedules for `seasons` and folds them into the
    /// indexes.
    ///
    /// Each season is validated first; a season that fails validation, a
    /// failed request and an unusable document each fail only their own unit.
    pub async fn index_seasons<I>(&mut self, seasons: I) -> ListReport
    where
        I: IntoIterator<Item = Season>,
    {
        let seasons: Vec<Season> = seasons.into_iter().collect();
        let concurrency = self.config.list_concurrency.max(1);
        info!(seasons = seasons.len(), concurrency, "Indexing seasons");

        let (handle, writer) =
            create_index_system(std::mem::take(&mut self.indexes), INDEX_CHANNEL_BUFFER);

        let this: &Self = self;
        let units = seasons
            .iter()
            .flat_map(|&season| [ListUnit::Roster(season), ListUnit::Schedule(season)]);

        let fetch = async move {
            let failures: Vec<Vec<UnitFailure>> = stream::iter(units)
                .map(|unit| {
                    let handle = handle.clone();
                    async move { this.run_list_unit(unit, &handle).await }
                })
                .buffer_unordered(concurrency)
                .collect()
                .await;
            // Last sender goes here, which lets the writer finish.
            drop(handle);
            failures
        };

        let (failures, indexes) = tokio::join!(fetch, writer.run());
        self.indexes = indexes;

        let report = ListReport {
            seasons: seasons.len(),
            players: self.indexes.players.len(),
            dates: self.indexes.games.len(),
            failures: failures.into_iter().flatten().collect(),
        };
        info!(
            seasons = report.seasons,
            players = report.players,
            dates = report.dates,
            failures = report.failures.len(),
            "Indexing finished"
        );
        report
    }

    async fn run_list_unit(&self, unit: ListUnit, handle: &IndexHandle) -> Vec<UnitFailure> {
        let season = unit.season();
        let result = match unit {
            ListUnit::Roster(_) => self.index_roster(season, handle).await,
            ListUnit::Schedule(_) => self.index_schedule(season, handle).await,
        };

        let label = format!("{} {season}", unit.operation());
        match result {
            Ok(partial) => partial
                .into_iter()
                .map(|f| UnitFailure {
                    unit: format!("{label} {}", f.unit),
                    error: f.error,
                })
                .collect(),
            Err(e) => vec![failure(unit.operation(), label, &e)],
        }
    }

    async fn index_roster(
        &self,
        season: Season,
        handle: &IndexHandle,
    ) -> Result<Vec<UnitFailure>, ScrapeError> {
        season.validate(self.today, self.policy)?;
        let document = self.api.roster(season).await?;
        let parsed = parse_roster(&document)?;

        debug!(%season, players = parsed.players.len(), "Roster fetched");
        for player in parsed.players {
            handle
                .record(IndexUpdate::Player {
                    name: player.full_name,
                    link: player.link,
                    season,
                })
                .await;
        }
        Ok(parsed.failures)
    }

    async fn index_schedule(
        &self,
        season: Season,
        handle: &IndexHandle,
    ) -> Result<Vec<UnitFailure>, ScrapeError> {
        season.validate(self.today, self.policy)?;
        let document = self.api.schedule(season).await?;
        let parsed = parse_schedule(&document)?;

        debug!(%season, games = parsed.games.len(), "Schedule fetched");
        for game in parsed.games {
            handle
                .record(IndexUpdate::Game {
                    date: game.date,
                    link: game.link,
                })
                .await;
        }
        Ok(parsed.failures)
    }
}
