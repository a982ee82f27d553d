//! Endpoint paths and query parameters of the stats API.

use crate::season::Season;

/// One stats API endpoint, with the parameters it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Roster(Season),
    Schedule(Season),
    Resource(&'a str),
    PlayerStats {
        link: &'a str,
        stat_type: &'a str,
        season: Season,
    },
    Draft(i32),
    Awards,
    StatTypes,
    StandingsTypes,
}

impl Endpoint<'_> {
    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Roster(_) => "roster",
            Self::Schedule(_) => "schedule",
            Self::Resource(_) => "resource",
            Self::PlayerStats { .. } => "player_stats",
            Self::Draft(_) => "draft",
            Self::Awards => "awards",
            Self::StatTypes => "stat_types",
            Self::StandingsTypes => "standings_types",
        }
    }

    /// Path below the API base URL.
    pub fn path(&self) -> String {
        match self {
            Self::Roster(_) => "/api/v1/teams".to_string(),
            Self::Schedule(_) => "/api/v1/schedule".to_string(),
            Self::Resource(link) => normalize_link(link),
            Self::PlayerStats { link, .. } => format!("{}/stats", normalize_link(link)),
            Self::Draft(year) => format!("/api/v1/draft/{year}"),
            Self::Awards => "/api/v1/awards".to_string(),
            Self::StatTypes => "/api/v1/statTypes".to_string(),
            Self::StandingsTypes => "/api/v1/standingsTypes".to_string(),
        }
    }

    /// Query string parameters.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Roster(season) => vec![
                ("expand", "team.roster".to_string()),
                ("season", season.token()),
            ],
            Self::Schedule(season) => vec![
                ("startDate", format!("{}-09-01", season.start_year())),
                ("endDate", format!("{}-07-01", season.end_year())),
            ],
            Self::PlayerStats {
                stat_type, season, ..
            } => vec![("stats", stat_type.to_string()), ("season", season.token())],
            _ => Vec::new(),
        }
    }
}

fn normalize_link(link: &str) -> String {
    let trimmed = link.trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_query() {
        let endpoint = Endpoint::Roster(Season::starting(2017));
        assert_eq!(endpoint.path(), "/api/v1/teams");
        assert_eq!(
            endpoint.query(),
            vec![
                ("expand", "team.roster".to_string()),
                ("season", "20172018".to_string())
            ]
        );
    }

    #[test]
    fn test_schedule_window() {
        let endpoint = Endpoint::Schedule(Season::starting(1990));
        assert_eq!(
            endpoint.query(),
            vec![
                ("startDate", "1990-09-01".to_string()),
                ("endDate", "1991-07-01".to_string())
            ]
        );
    }

    #[test]
    fn test_player_stats_path() {
        let endpoint = Endpoint::PlayerStats {
            link: "/api/v1/people/8478402",
            stat_type: "gameLog",
            season: Season::starting(2017),
        };
        assert_eq!(endpoint.path(), "/api/v1/people/8478402/stats");
        assert_eq!(endpoint.label(), "player_stats");
        assert_eq!(endpoint.query()[0], ("stats", "gameLog".to_string()));
    }

    #[test]
    fn test_resource_link_normalized() {
        assert_eq!(
            Endpoint::Resource("api/v1/game/2017020001/feed/live/").path(),
            "/api/v1/game/2017020001/feed/live"
        );
    }

    #[test]
    fn test_simple_paths() {
        assert_eq!(Endpoint::Draft(1995).path(), "/api/v1/draft/1995");
        assert_eq!(Endpoint::Awards.path(), "/api/v1/awards");
        assert_eq!(Endpoint::StatTypes.path(), "/api/v1/statTypes");
        assert_eq!(Endpoint::StandingsTypes.path(), "/api/v1/standingsTypes");
        assert!(Endpoint::Awards.query().is_empty());
    }
}
