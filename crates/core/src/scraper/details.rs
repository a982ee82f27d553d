//! Detail operations: players, games, draft and awards.

use std::collections::HashSet;
use std::future::Future;

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use serde_json::Value;
use tracing::{debug, info};

use super::Scraper;
use crate::error::ScrapeError;
use crate::index::PlayerEntry;
use crate::report::BatchReport;
use crate::season::{draft_years, validate_draft_year, Season, SeasonError};
use crate::sink::OutputPath;

impl Scraper {
    /// Writes one merged profile + stat block document per (player, season).
    ///
    /// `players` restricts the batch to the given names, all of which must be
    /// in the player index. Repeated names are fetched once. `stat_type`
    /// defaults to [`ScraperConfig::default_stat_type`](super::ScraperConfig).
    pub async fn fetch_player_data(
        &self,
        players: Option<&[String]>,
        stat_type: Option<&str>,
    ) -> Result<BatchReport, ScrapeError> {
        let stat_type = stat_type.unwrap_or(self.config.default_stat_type.as_str());

        let selected: Vec<(&str, &PlayerEntry)> = match players {
            Some(names) => {
                let mut seen = HashSet::new();
                names
                    .iter()
                    .filter(|name| seen.insert(name.as_str()))
                    .map(|name| {
                        self.indexes
                            .players
                            .get(name)
                            .map(|entry| (name.as_str(), entry))
                            .ok_or_else(|| ScrapeError::UnknownPlayer(name.clone()))
                    })
                    .collect::<Result<_, _>>()?
            }
            None => self
                .indexes
                .players
                .iter()
                .map(|(name, entry)| (name.as_str(), entry))
                .collect(),
        };

        info!(players = selected.len(), stat_type, "Fetching player data");
        let report = self
            .fan_out(selected, |(name, entry)| {
                self.fetch_player(name, entry, stat_type)
            })
            .await;
        log_batch("player", &report);
        Ok(report)
    }

    /// Writes every game scheduled between `start` and `end` (inclusive).
    ///
    /// With a `team` abbreviation only games involving that team are
    /// written; the others are fetched and counted as skipped.
    pub async fn fetch_game_data(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        team: Option<&str>,
    ) -> Result<BatchReport, ScrapeError> {
        if start > end {
            return Err(ScrapeError::InvalidDateRange { start, end });
        }

        let dates: Vec<(NaiveDate, &[String])> = self
            .indexes
            .games
            .range(start..=end)
            .map(|(date, links)| (*date, links.as_slice()))
            .collect();

        info!(%start, %end, dates = dates.len(), team, "Fetching game data");
        let report = self
            .fan_out(dates, |(date, links)| self.fetch_games_on(date, links, team))
            .await;
        log_batch("game", &report);
        Ok(report)
    }

    /// Writes the draft of one year, or of every year since 1995.
    ///
    /// `season` may be a season token or a bare year; only its first four
    /// characters are used. A single requested year fails as a whole; the
    /// full sweep collects per-year failures in the report.
    pub async fn fetch_draft_data(&self, season: Option<&str>) -> Result<BatchReport, ScrapeError> {
        let Some(token) = season else {
            let years: Vec<i32> = draft_years(self.today).collect();
            info!(years = years.len(), "Fetching every draft");
            let report = self
                .fan_out(years, |year| async move {
                    let mut report = BatchReport {
                        attempted: 1,
                        ..Default::default()
                    };
                    match self.fetch_draft_year(year).await {
                        Ok(()) => report.written += 1,
                        Err(e) => report.record_failure("draft", format!("draft {year}"), &e),
                    }
                    report
                })
                .await;
            log_batch("draft", &report);
            return Ok(report);
        };

        let year = draft_year_from_token(token)?;
        validate_draft_year(year, self.today)?;
        self.fetch_draft_year(year).await?;
        Ok(BatchReport {
            attempted: 1,
            written: 1,
            ..Default::default()
        })
    }

    /// Writes the awards document.
    pub async fn fetch_awards(&self) -> Result<(), ScrapeError> {
        let document = self.api.awards().await?;
        self.sink.write(&OutputPath::awards(), &document).await?;
        info!("Awards written");
        Ok(())
    }

    /// Runs `unit` over `items` on the detail pool and merges the reports.
    async fn fan_out<T, F, Fut>(&self, items: Vec<T>, unit: F) -> BatchReport
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = BatchReport>,
    {
        let reports: Vec<BatchReport> = stream::iter(items)
            .map(unit)
            .buffer_unordered(self.config.detail_concurrency.max(1))
            .collect()
            .await;

        reports
            .into_iter()
            .fold(BatchReport::default(), |mut total, report| {
                total.merge(report);
                total
            })
    }

    async fn fetch_player(&self, name: &str, entry: &PlayerEntry, stat_type: &str) -> BatchReport {
        let mut report = BatchReport::default();
        let mut profile_cache = None;

        for &season in &entry.seasons {
            report.attempted += 1;
            match self
                .fetch_player_season(entry, stat_type, season, &mut profile_cache)
                .await
            {
                Ok(()) => report.written += 1,
                Err(e) => report.record_failure("player", format!("{name} {season}"), &e),
            }
        }
        report
    }

    async fn fetch_player_season(
        &self,
        entry: &PlayerEntry,
        stat_type: &str,
        season: Season,
        profile_cache: &mut Option<Value>,
    ) -> Result<(), ScrapeError> {
        let mut document = self.player_profile(&entry.link, profile_cache).await?;
        let stats = self.api.player_stats(&entry.link, stat_type, season).await?;

        let block = stats
            .pointer("/stats/0")
            .and_then(Value::as_object)
            .ok_or_else(|| ScrapeError::missing("stats[0]"))?;
        let profile = document
            .as_object_mut()
            .ok_or_else(|| ScrapeError::missing("player profile object"))?;
        for (key, value) in block {
            profile.insert(key.clone(), value.clone());
        }

        let position = document
            .pointer("/people/0/primaryPosition/type")
            .and_then(Value::as_str)
            .ok_or_else(|| ScrapeError::missing("people[0].primaryPosition.type"))?;
        let full_name = document
            .pointer("/people/0/fullName")
            .and_then(Value::as_str)
            .ok_or_else(|| ScrapeError::missing("people[0].fullName"))?;

        let path = OutputPath::player_season(stat_type, position, full_name, season);
        self.sink.write(&path, &document).await?;
        debug!(%path, "Player season written");
        Ok(())
    }

    async fn player_profile(
        &self,
        link: &str,
        cache: &mut Option<Value>,
    ) -> Result<Value, ScrapeError> {
        if !self.config.cache_player_profiles {
            return Ok(self.api.resource(link).await?);
        }

        if let Some(profile) = cache.as_ref() {
            return Ok(profile.clone());
        }
        let profile = self.api.resource(link).await?;
        *cache = Some(profile.clone());
        Ok(profile)
    }

    async fn fetch_games_on(
        &self,
        date: NaiveDate,
        links: &[String],
        team: Option<&str>,
    ) -> BatchReport {
        let mut report = BatchReport::default();
        for link in links {
            report.attempted += 1;
            match self.fetch_game(date, link, team).await {
                Ok(true) => report.written += 1,
                Ok(false) => report.skipped += 1,
                Err(e) => report.record_failure("game", format!("{date} {link}"), &e),
            }
        }
        report
    }

    /// Returns whether the game was written.
    async fn fetch_game(
        &self,
        date: NaiveDate,
        link: &str,
        team: Option<&str>,
    ) -> Result<bool, ScrapeError> {
        let document = self.api.resource(link).await?;

        let away = document
            .pointer("/gameData/teams/away/abbreviation")
            .and_then(Value::as_str)
            .ok_or_else(|| ScrapeError::missing("gameData.teams.away.abbreviation"))?;
        let home = document
            .pointer("/gameData/teams/home/abbreviation")
            .and_then(Value::as_str)
            .ok_or_else(|| ScrapeError::missing("gameData.teams.home.abbreviation"))?;

        if let Some(team) = team {
            if !team.eq_ignore_ascii_case(away) && !team.eq_ignore_ascii_case(home) {
                debug!(%date, away, home, team, "Game filtered out");
                return Ok(false);
            }
        }

        let path = OutputPath::game(date, away, home);
        self.sink.write(&path, &document).await?;
        debug!(%path, "Game written");
        Ok(true)
    }

    async fn fetch_draft_year(&self, year: i32) -> Result<(), ScrapeError> {
        let document = self.api.draft(year).await?;
        let path = OutputPath::draft(year);
        self.sink.write(&path, &document).await?;
        debug!(%path, "Draft written");
        Ok(())
    }
}

/// Starting year of a season token or bare year, e.g. `"20172018"` → 2017.
fn draft_year_from_token(token: &str) -> Result<i32, SeasonError> {
    let prefix = token.get(..4).unwrap_or(token);
    if prefix.len() != 4 || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SeasonError::InvalidToken(token.to_string()));
    }
    prefix
        .parse()
        .map_err(|_| SeasonError::InvalidToken(token.to_string()))
}

fn log_batch(operation: &str, report: &BatchReport) {
    info!(
        operation,
        attempted = report.attempted,
        written = report.written,
        skipped = report.skipped,
        failures = report.failures.len(),
        "Batch finished"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_year_from_token() {
        assert_eq!(draft_year_from_token("20172018").unwrap(), 2017);
        assert_eq!(draft_year_from_token("1995").unwrap(), 1995);
        assert!(matches!(
            draft_year_from_token("95"),
            Err(SeasonError::InvalidToken(_))
        ));
        assert!(matches!(
            draft_year_from_token("abcd1234"),
            Err(SeasonError::InvalidToken(_))
        ));
    }
}
