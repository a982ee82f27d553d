//! Extraction of index entries from roster and schedule documents.

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::ScrapeError;
use crate::flatten::flatten_value;
use crate::report::{failure, UnitFailure};

/// One roster line: who, and where their profile lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterPlayer {
    pub full_name: String,
    pub link: String,
}

/// Players found in a roster document, plus the teams that were skipped.
#[derive(Debug, Clone, Default)]
pub struct ParsedRoster {
    pub players: Vec<RosterPlayer>,
    pub failures: Vec<UnitFailure>,
}

/// One scheduled game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledGame {
    pub date: NaiveDate,
    pub link: String,
}

/// Games found in a schedule document, plus the entries that were skipped.
#[derive(Debug, Clone, Default)]
pub struct ParsedSchedule {
    pub games: Vec<ScheduledGame>,
    pub failures: Vec<UnitFailure>,
}

/// Parses a `/api/v1/teams?expand=team.roster` document.
///
/// A team whose roster is missing or contains an unusable record is skipped
/// as a whole and reported in [`ParsedRoster::failures`]; only a missing
/// `teams` array fails the document.
pub fn parse_roster(document: &Value) -> Result<ParsedRoster, ScrapeError> {
    let teams = document
        .get("teams")
        .and_then(Value::as_array)
        .ok_or_else(|| ScrapeError::missing("teams"))?;

    let mut parsed = ParsedRoster::default();
    for (position, team) in teams.iter().enumerate() {
        match parse_team_roster(team) {
            Ok(players) => parsed.players.extend(players),
            Err(e) => parsed
                .failures
                .push(failure("roster", format!("team {}", team_label(team, position)), &e)),
        }
    }
    Ok(parsed)
}

fn parse_team_roster(team: &Value) -> Result<Vec<RosterPlayer>, ScrapeError> {
    let roster = team
        .pointer("/roster/roster")
        .and_then(Value::as_array)
        .ok_or_else(|| ScrapeError::missing("roster.roster"))?;

    roster
        .iter()
        .map(|record| {
            let flattened =
                flatten_value(record).ok_or_else(|| ScrapeError::missing("roster entry"))?;
            let full_name = flattened
                .get("person.fullName")
                .and_then(Value::as_str)
                .ok_or_else(|| ScrapeError::missing("person.fullName"))?;
            let link = flattened
                .get("person.link")
                .and_then(Value::as_str)
                .ok_or_else(|| ScrapeError::missing("person.link"))?;
            Ok(RosterPlayer {
                full_name: full_name.to_string(),
                link: link.to_string(),
            })
        })
        .collect()
}

fn team_label(team: &Value, position: usize) -> String {
    team.get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| team.get("id").map(|id| id.to_string()))
        .unwrap_or_else(|| format!("#{position}"))
}

/// Parses a `/api/v1/schedule` document.
///
/// Games without a link and dates that are not ISO dates are reported in
/// [`ParsedSchedule::failures`]; a missing `dates` array fails the document.
pub fn parse_schedule(document: &Value) -> Result<ParsedSchedule, ScrapeError> {
    let dates = document
        .get("dates")
        .and_then(Value::as_array)
        .ok_or_else(|| ScrapeError::missing("dates"))?;

    let mut parsed = ParsedSchedule::default();
    for day in dates {
        let Some(raw_date) = day.get("date").and_then(Value::as_str) else {
            parsed
                .failures
                .push(failure("schedule", "schedule entry".to_string(), &ScrapeError::missing("date")));
            continue;
        };
        let date = match NaiveDate::parse_from_str(raw_date, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                parsed
                    .failures
                    .push(failure("schedule", format!("date {raw_date}"), &e));
                continue;
            }
        };

        let games = day.get("games").and_then(Value::as_array);
        for (position, game) in games.into_iter().flatten().enumerate() {
            let link = flatten_value(game)
                .and_then(|flattened| flattened.get("link").and_then(Value::as_str).map(str::to_string));
            match link {
                Some(link) => parsed.games.push(ScheduledGame { date, link }),
                None => parsed.failures.push(failure(
                    "schedule",
                    format!("game #{position} on {raw_date}"),
                    &ScrapeError::missing("link"),
                )),
            }
        }
    }
    Ok(parsed)
}
