//! Season tokens and data-availability rules.
//!
//! A season is identified by the pair of calendar years it spans and is
//! written as an 8-digit token, e.g. `20172018`. The NHL stats API only has
//! data from the 1917-18 season onwards, and a season counts as recorded only
//! once it has started.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// First season start year with recorded NHL data.
pub const FIRST_SEASON_START: i32 = 1917;

/// First season end year with recorded NHL data.
pub const FIRST_SEASON_END: i32 = 1918;

/// First draft year the stats API serves.
pub const FIRST_DRAFT_YEAR: i32 = 1995;

/// Month (1-based) from which the upcoming season is walked when building
/// the historical indexes.
const INDEX_CUTOVER_MONTH: u32 = 10;

/// Month (1-based) from which the upcoming season passes validation under
/// [`AvailabilityPolicy::SeptemberCutover`].
const VALIDATION_CUTOVER_MONTH: u32 = 9;

/// Errors raised when a season or draft year cannot be requested.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeasonError {
    /// The season starts before the NHL recorded data.
    #[error("Season {start}-{end} is before the NHL started recording data")]
    OutOfRange { start: i32, end: i32 },

    /// The season has not been played yet.
    #[error("NHL data for season {start}-{end} not yet recorded")]
    NotYetRecorded { start: i32, end: i32 },

    /// The token is not two consecutive 4-digit years.
    #[error("Invalid season token: {0:?}")]
    InvalidToken(String),

    /// No draft data exists for the year.
    #[error("No NHL draft data available for {0}")]
    DraftUnavailable(i32),
}

/// Rule deciding when the upcoming season becomes requestable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityPolicy {
    /// A season is available only once its end year is not in the future
    /// and its start year is in the past.
    Strict,
    /// From September onwards the season starting this year is available.
    #[default]
    SeptemberCutover,
}

/// One NHL season, spanning `start_year` and `start_year + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Season {
    start: i32,
}

impl Season {
    /// Season starting in `start_year`.
    pub fn starting(start_year: i32) -> Self {
        Self { start: start_year }
    }

    /// Season spanning the given years; they must be consecutive.
    pub fn from_years(start_year: i32, end_year: i32) -> Result<Self, SeasonError> {
        if start_year.checked_add(1) != Some(end_year) {
            return Err(SeasonError::InvalidToken(format!("{start_year}{end_year}")));
        }
        Ok(Self::starting(start_year))
    }

    pub fn start_year(&self) -> i32 {
        self.start
    }

    pub fn end_year(&self) -> i32 {
        self.start.saturating_add(1)
    }

    /// The 8-digit token used by the stats API.
    pub fn token(&self) -> String {
        self.to_string()
    }

    /// Checks the season against recorded history as of `today`.
    pub fn validate(&self, today: NaiveDate, policy: AvailabilityPolicy) -> Result<(), SeasonError> {
        validate_years(self.start_year(), self.end_year(), today, policy)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:04}", self.start_year(), self.end_year())
    }
}

impl FromStr for Season {
    type Err = SeasonError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || SeasonError::InvalidToken(token.to_string());

        if token.len() != 8 || !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let start: i32 = token[..4].parse().map_err(|_| invalid())?;
        let end: i32 = token[4..].parse().map_err(|_| invalid())?;

        Self::from_years(start, end).map_err(|_| invalid())
    }
}

impl TryFrom<String> for Season {
    type Error = SeasonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Season> for String {
    fn from(season: Season) -> Self {
        season.token()
    }
}

/// Lazy, restartable sequence of seasons.
///
/// Yields `(start_year, start_year + 1)` up through `(end_year - 1, end_year)`.
#[derive(Debug, Clone)]
pub struct Seasons {
    next_start: i32,
    last_end: i32,
}

impl Iterator for Seasons {
    type Item = Season;

    fn next(&mut self) -> Option<Season> {
        let end = self.next_start.checked_add(1)?;
        if end > self.last_end {
            return None;
        }
        let season = Season::starting(self.next_start);
        self.next_start = end;
        Some(season)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (i64::from(self.last_end) - i64::from(self.next_start)).max(0);
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Seasons {}

/// Every season between two years; see [`Seasons`].
pub fn generate_seasons(start_year: i32, end_year: i32) -> Seasons {
    Seasons {
        next_start: start_year,
        last_end: end_year,
    }
}

/// Validates a `(start_year, end_year)` pair against recorded history.
pub fn validate_years(
    start_year: i32,
    end_year: i32,
    today: NaiveDate,
    policy: AvailabilityPolicy,
) -> Result<(), SeasonError> {
    if start_year < FIRST_SEASON_START || end_year < FIRST_SEASON_END {
        return Err(SeasonError::OutOfRange {
            start: start_year,
            end: end_year,
        });
    }

    let current_year = today.year();
    let after_cutover = today.month() >= VALIDATION_CUTOVER_MONTH;

    let not_yet = match policy {
        AvailabilityPolicy::SeptemberCutover if after_cutover => {
            end_year > current_year + 1 || start_year > current_year
        }
        _ => end_year > current_year || start_year >= current_year,
    };

    if not_yet {
        return Err(SeasonError::NotYetRecorded {
            start: start_year,
            end: end_year,
        });
    }

    Ok(())
}

/// Last end year walked when building the historical indexes.
///
/// Under [`AvailabilityPolicy::SeptemberCutover`] the season that just
/// started is included from October. [`AvailabilityPolicy::Strict`] never
/// walks a season still in progress.
pub fn latest_end_year(today: NaiveDate, policy: AvailabilityPolicy) -> i32 {
    match policy {
        AvailabilityPolicy::SeptemberCutover if today.month() >= INDEX_CUTOVER_MONTH => {
            today.year() + 1
        }
        _ => today.year(),
    }
}

/// Every season from 1917-18 up to the latest one `policy` accepts as of
/// `today`.
pub fn historical_seasons(today: NaiveDate, policy: AvailabilityPolicy) -> Seasons {
    generate_seasons(FIRST_SEASON_START, latest_end_year(today, policy))
}

/// Validates a draft year.
pub fn validate_draft_year(year: i32, today: NaiveDate) -> Result<(), SeasonError> {
    if year < FIRST_DRAFT_YEAR || year > today.year() {
        return Err(SeasonError::DraftUnavailable(year));
    }
    Ok(())
}

/// Every draft year from 1995 through the current year.
pub fn draft_years(today: NaiveDate) -> impl Iterator<Item = i32> + Clone {
    generate_seasons(FIRST_DRAFT_YEAR, today.year() + 1).map(|s| s.start_year())
}

/// Date window of the season in progress: September 1st of its start year
/// through `today`.
pub fn current_season_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start_year = if today.month() >= VALIDATION_CUTOVER_MONTH {
        today.year()
    } else {
        today.year() - 1
    };
    let start = NaiveDate::from_ymd_opt(start_year, 9, 1).unwrap_or(today);
    (start, today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_generate_seasons_yields_consecutive_pairs() {
        let tokens: Vec<String> = generate_seasons(1917, 1920).map(|s| s.token()).collect();
        assert_eq!(tokens, vec!["19171918", "19181919", "19191920"]);
    }

    #[test]
    fn test_generate_seasons_is_restartable() {
        let seasons = generate_seasons(2000, 2003);
        let first: Vec<Season> = seasons.clone().collect();
        let second: Vec<Season> = seasons.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_generate_seasons_empty_range() {
        assert_eq!(generate_seasons(2000, 2000).count(), 0);
        assert_eq!(generate_seasons(2001, 2000).count(), 0);
        assert_eq!(generate_seasons(2000, 2000).len(), 0);
    }

    #[test]
    fn test_parse_token() {
        let season: Season = "20172018".parse().unwrap();
        assert_eq!(season.start_year(), 2017);
        assert_eq!(season.end_year(), 2018);
        assert_eq!(season.to_string(), "20172018");
    }

    #[test]
    fn test_parse_rejects_malformed_tokens() {
        for token in ["2017", "2017201", "20172019", "2017-2018", "abcdefgh", ""] {
            assert!(
                matches!(token.parse::<Season>(), Err(SeasonError::InvalidToken(_))),
                "token {token:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_seasons_order_by_start_year() {
        let mut seasons = vec![Season::starting(2001), Season::starting(1999)];
        seasons.sort();
        assert_eq!(seasons[0].token(), "19992000");
    }

    #[test]
    fn test_serde_uses_token() {
        let json = serde_json::to_string(&Season::starting(1990)).unwrap();
        assert_eq!(json, "\"19901991\"");
        let back: Season = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Season::starting(1990));
    }

    #[test]
    fn test_validate_before_recorded_history() {
        let today = date(2018, 3, 1);
        for (start, end) in [(1916, 1917), (1900, 1950), (1950, 1917), (1917, 1917)] {
            assert!(matches!(
                validate_years(start, end, today, AvailabilityPolicy::Strict),
                Err(SeasonError::OutOfRange { .. })
            ));
        }
        let season: Season = "19161917".parse().unwrap();
        assert!(matches!(
            season.validate(today, AvailabilityPolicy::SeptemberCutover),
            Err(SeasonError::OutOfRange { start: 1916, end: 1917 })
        ));
    }

    #[test]
    fn test_validate_future_season() {
        let season: Season = "30013002".parse().unwrap();
        for policy in [AvailabilityPolicy::Strict, AvailabilityPolicy::SeptemberCutover] {
            assert!(matches!(
                season.validate(date(2018, 3, 1), policy),
                Err(SeasonError::NotYetRecorded { .. })
            ));
        }
    }

    #[test]
    fn test_validate_first_season() {
        assert!(validate_years(1917, 1918, date(2018, 3, 1), AvailabilityPolicy::Strict).is_ok());
    }

    #[test]
    fn test_strict_policy_rejects_season_in_progress() {
        let today = date(2017, 11, 15);
        assert!(validate_years(2016, 2017, today, AvailabilityPolicy::Strict).is_ok());
        assert!(matches!(
            validate_years(2017, 2018, today, AvailabilityPolicy::Strict),
            Err(SeasonError::NotYetRecorded { .. })
        ));
    }

    #[test]
    fn test_september_cutover_allows_upcoming_season() {
        let today = date(2017, 9, 1);
        assert!(validate_years(2017, 2018, today, AvailabilityPolicy::SeptemberCutover).is_ok());
        assert!(matches!(
            validate_years(2018, 2019, today, AvailabilityPolicy::SeptemberCutover),
            Err(SeasonError::NotYetRecorded { .. })
        ));
    }

    #[test]
    fn test_september_cutover_before_september_matches_strict() {
        let today = date(2017, 8, 31);
        assert!(validate_years(2016, 2017, today, AvailabilityPolicy::SeptemberCutover).is_ok());
        assert!(matches!(
            validate_years(2017, 2018, today, AvailabilityPolicy::SeptemberCutover),
            Err(SeasonError::NotYetRecorded { .. })
        ));
    }

    #[test]
    fn test_generate_seasons_at_extreme_bounds() {
        assert_eq!(generate_seasons(i32::MAX - 1, i32::MAX).count(), 1);
        assert_eq!(generate_seasons(i32::MAX, i32::MAX).count(), 0);
        assert_eq!(generate_seasons(i32::MIN, i32::MIN + 2).count(), 2);

        let wide = generate_seasons(i32::MIN, i32::MAX);
        let expected = usize::try_from(u32::MAX).unwrap_or(usize::MAX);
        assert_eq!(wide.size_hint(), (expected, Some(expected)));

        assert_eq!(Season::starting(i32::MAX).end_year(), i32::MAX);
        assert!(Season::from_years(i32::MAX, i32::MAX).is_err());
    }

    #[test]
    fn test_latest_end_year_october_cutover() {
        let policy = AvailabilityPolicy::SeptemberCutover;
        assert_eq!(latest_end_year(date(2018, 9, 30), policy), 2018);
        assert_eq!(latest_end_year(date(2018, 10, 1), policy), 2019);
    }

    #[test]
    fn test_latest_end_year_strict_skips_season_in_progress() {
        let policy = AvailabilityPolicy::Strict;
        assert_eq!(latest_end_year(date(2018, 10, 15), policy), 2018);
        assert_eq!(latest_end_year(date(2018, 12, 31), policy), 2018);

        let today = date(2018, 10, 15);
        for season in historical_seasons(today, policy) {
            assert!(season.validate(today, policy).is_ok(), "{season} should be valid");
        }
    }

    #[test]
    fn test_historical_seasons_bounds() {
        let seasons: Vec<Season> =
            historical_seasons(date(2018, 3, 1), AvailabilityPolicy::SeptemberCutover).collect();
        assert_eq!(seasons.first().unwrap().token(), "19171918");
        assert_eq!(seasons.last().unwrap().token(), "20172018");
        assert_eq!(seasons.len(), 101);
    }

    #[test]
    fn test_validate_draft_year() {
        let today = date(2018, 3, 1);
        assert!(validate_draft_year(1995, today).is_ok());
        assert!(validate_draft_year(2018, today).is_ok());
        assert_eq!(
            validate_draft_year(1994, today),
            Err(SeasonError::DraftUnavailable(1994))
        );
        assert_eq!(
            validate_draft_year(2019, today),
            Err(SeasonError::DraftUnavailable(2019))
        );
    }

    #[test]
    fn test_draft_years_span() {
        let years: Vec<i32> = draft_years(date(2018, 3, 1)).collect();
        assert_eq!(years.first(), Some(&1995));
        assert_eq!(years.last(), Some(&2018));
    }

    #[test]
    fn test_current_season_window() {
        assert_eq!(
            current_season_window(date(2018, 2, 10)),
            (date(2017, 9, 1), date(2018, 2, 10))
        );
        assert_eq!(
            current_season_window(date(2018, 10, 5)),
            (date(2018, 9, 1), date(2018, 10, 5))
        );
    }
}
