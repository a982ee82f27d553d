use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::season::Season;

/// Where to find a player and which seasons they were rostered in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerEntry {
    /// API link of the player profile, e.g. `/api/v1/people/8471214`.
    pub link: String,
    /// Seasons in which the player appeared on a roster, ascending.
    pub seasons: BTreeSet<Season>,
}

/// Player full name → [`PlayerEntry`].
///
/// Names are not unique across NHL history; when two players share a name
/// the first link discovered wins and the seasons are pooled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayerIndex {
    entries: BTreeMap<String, PlayerEntry>,
}

impl PlayerIndex {
    /// Records that `name` was on a roster in `season`.
    pub fn record_appearance(&mut self, name: &str, link: &str, season: Season) {
        match self.entries.get_mut(name) {
            Some(entry) => {
                if entry.link != link {
                    debug!(
                        player = %name,
                        kept = %entry.link,
                        ignored = %link,
                        "Player name maps to more than one link"
                    );
                }
                entry.seasons.insert(season);
            }
            None => {
                self.entries.insert(
                    name.to_string(),
                    PlayerEntry {
                        link: link.to_string(),
                        seasons: BTreeSet::from([season]),
                    },
                );
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&PlayerEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PlayerEntry)> {
        self.entries.iter()
    }
}

/// Game date → game links, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameIndex {
    dates: BTreeMap<NaiveDate, Vec<String>>,
}

impl GameIndex {
    pub fn push(&mut self, date: NaiveDate, link: &str) {
        self.dates.entry(date).or_default().push(link.to_string());
    }

    pub fn links(&self, date: NaiveDate) -> Option<&[String]> {
        self.dates.get(&date).map(Vec::as_slice)
    }

    /// Dates inside `range` with their links, ascending.
    pub fn range(
        &self,
        range: RangeInclusive<NaiveDate>,
    ) -> impl Iterator<Item = (&NaiveDate, &Vec<String>)> {
        self.dates.range(range)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Total number of game links across all dates.
    pub fn game_count(&self) -> usize {
        self.dates.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &Vec<String>)> {
        self.dates.iter()
    }
}

/// Both indexes, owned together by the index writer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Indexes {
    pub players: PlayerIndex,
    pub games: GameIndex,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_name_across_seasons_merges_sorted() {
        let mut index = PlayerIndex::default();
        index.record_appearance("Wayne Gretzky", "/api/v1/people/8447400", Season::starting(1985));
        index.record_appearance("Wayne Gretzky", "/api/v1/people/8447400", Season::starting(1980));

        assert_eq!(index.len(), 1);
        let entry = index.get("Wayne Gretzky").unwrap();
        let tokens: Vec<String> = entry.seasons.iter().map(|s| s.token()).collect();
        assert_eq!(tokens, vec!["19801981", "19851986"]);
    }

    #[test]
    fn test_repeated_season_is_stored_once() {
        let mut index = PlayerIndex::default();
        let season = Season::starting(2000);
        index.record_appearance("Jaromir Jagr", "/api/v1/people/8448208", season);
        index.record_appearance("Jaromir Jagr", "/api/v1/people/8448208", season);
        assert_eq!(index.get("Jaromir Jagr").unwrap().seasons.len(), 1);
    }

    #[test]
    fn test_first_link_wins_on_name_collision() {
        let mut index = PlayerIndex::default();
        index.record_appearance("Sebastian Aho", "/api/v1/people/8478427", Season::starting(2017));
        index.record_appearance("Sebastian Aho", "/api/v1/people/8480222", Season::starting(2018));

        let entry = index.get("Sebastian Aho").unwrap();
        assert_eq!(entry.link, "/api/v1/people/8478427");
        assert_eq!(entry.seasons.len(), 2);
    }

    #[test]
    fn test_game_index_keeps_discovery_order() {
        let mut index = GameIndex::default();
        let day = date(2017, 10, 4);
        index.push(day, "/api/v1/game/2017020001/feed/live");
        index.push(day, "/api/v1/game/2017020002/feed/live");

        assert_eq!(index.len(), 1);
        assert_eq!(
            index.links(day).unwrap(),
            &[
                "/api/v1/game/2017020001/feed/live".to_string(),
                "/api/v1/game/2017020002/feed/live".to_string()
            ]
        );
    }

    #[test]
    fn test_game_index_range_is_inclusive() {
        let mut index = GameIndex::default();
        for day in [3, 4, 5, 6] {
            index.push(date(2017, 10, day), &format!("/game/{day}"));
        }

        let dates: Vec<NaiveDate> = index
            .range(date(2017, 10, 4)..=date(2017, 10, 5))
            .map(|(d, _)| *d)
            .collect();
        assert_eq!(dates, vec![date(2017, 10, 4), date(2017, 10, 5)]);
        assert_eq!(index.game_count(), 4);
    }
}
