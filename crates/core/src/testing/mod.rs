//! Testing utilities and mock implementations.
//!
//! [`MockStatsApi`] and [`MemorySink`] stand in for the stats API and the
//! sink so the whole pipeline can run without network or disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use nhlscrape_core::testing::{fixtures, MemorySink, MockStatsApi};
//!
//! let api = MockStatsApi::new();
//! let leafs = fixtures::roster_team(10, "Toronto Maple Leafs", &[("Auston Matthews", 8479318)]);
//! api.set_roster(season, fixtures::roster_document(vec![leafs])).await;
//! let sink = MemorySink::new();
//! ```

mod memory_sink;
mod mock_stats_api;

pub use memory_sink::MemorySink;
pub use mock_stats_api::{MockStatsApi, RecordedApiRequest};

/// Test fixtures shaped like the stats API responses.
pub mod fixtures {
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    /// API link of a player id.
    pub fn person_link(id: u32) -> String {
        format!("/api/v1/people/{}", id)
    }

    /// API link of a game id.
    pub fn game_link(id: u64) -> String {
        format!("/api/v1/game/{}/feed/live", id)
    }

    /// One team of a roster document, with (full name, player id) pairs.
    pub fn roster_team(id: u32, name: &str, players: &[(&str, u32)]) -> Value {
        let roster: Vec<Value> = players
            .iter()
            .map(|(full_name, player_id)| {
                json!({
                    "person": {"id": player_id, "fullName": full_name, "link": person_link(*player_id)},
                    "jerseyNumber": "00",
                    "position": {"code": "C", "type": "Forward"}
                })
            })
            .collect();
        json!({
            "id": id,
            "name": name,
            "roster": {"roster": roster, "link": format!("/api/v1/teams/{}/roster", id)}
        })
    }

    /// `/api/v1/teams?expand=team.roster` document.
    pub fn roster_document(teams: Vec<Value>) -> Value {
        json!({"copyright": "NHL and the NHL Shield are registered trademarks", "teams": teams})
    }

    /// One date of a schedule document, with its game ids.
    pub fn schedule_day(date: NaiveDate, game_ids: &[u64]) -> Value {
        let games: Vec<Value> = game_ids
            .iter()
            .map(|id| json!({"gamePk": id, "link": game_link(*id), "gameType": "R"}))
            .collect();
        json!({
            "date": date.format("%Y-%m-%d").to_string(),
            "totalGames": games.len(),
            "games": games
        })
    }

    /// `/api/v1/schedule` document.
    pub fn schedule_document(days: Vec<Value>) -> Value {
        json!({"totalGames": 0, "dates": days})
    }

    /// `/api/v1/people/<id>` document.
    pub fn player_profile(id: u32, full_name: &str, position_type: &str) -> Value {
        json!({
            "copyright": "NHL",
            "people": [{
                "id": id,
                "fullName": full_name,
                "link": person_link(id),
                "primaryPosition": {"code": "C", "name": "Center", "type": position_type, "abbreviation": "C"}
            }]
        })
    }

    /// `/api/v1/people/<id>/stats` document with one stat block.
    pub fn player_stats(stat_type: &str, goals: u32) -> Value {
        json!({
            "copyright": "NHL",
            "stats": [{
                "type": {"displayName": stat_type},
                "splits": [{"season": "20172018", "stat": {"goals": goals}}]
            }]
        })
    }

    /// `/api/v1/game/<id>/feed/live` document.
    pub fn game_feed(id: u64, away: &str, home: &str) -> Value {
        json!({
            "gamePk": id,
            "link": game_link(id),
            "gameData": {
                "teams": {
                    "away": {"abbreviation": away},
                    "home": {"abbreviation": home}
                }
            },
            "liveData": {"plays": {"allPlays": []}}
        })
    }

    /// `/api/v1/draft/<year>` document.
    pub fn draft_document(year: i32) -> Value {
        json!({"drafts": [{"draftYear": year, "rounds": []}]})
    }

    pub fn awards_document() -> Value {
        json!({"awards": [{"name": "Stanley Cup"}, {"name": "Hart Memorial Trophy"}]})
    }

    /// `/api/v1/statTypes` document.
    pub fn stat_types_document() -> Value {
        json!([
            {"displayName": "yearByYear", "gameType": null},
            {"displayName": "gameLog", "gameType": null},
            {"displayName": "homeAndAway", "gameType": null}
        ])
    }

    /// `/api/v1/standingsTypes` document.
    pub fn standings_types_document() -> Value {
        json!([
            {"name": "regularSeason", "description": "Regular Season Standings"},
            {"name": "wildCard", "description": "Wild card standings"}
        ])
    }
}
