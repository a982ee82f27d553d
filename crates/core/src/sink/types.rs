//! Output locations for written documents.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::season::Season;

/// Suffix appended to every output file.
const EXTENSION: &str = ".json.gz";

/// Logical location of one output document.
///
/// `directory` is a relative path starting with `./` and ending with `/`,
/// e.g. `./draft_data/`. Disk sinks resolve it against their root; object
/// stores use it, minus the leading `./`, as the key prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputPath {
    pub directory: String,
    pub filename: String,
}

impl OutputPath {
    pub fn new(directory: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            filename: filename.into(),
        }
    }

    /// `./player_gamelog_<statType>/<position>/<name>/<season>.json.gz`
    ///
    /// The upstream values are passed through [`path_segment`].
    pub fn player_season(stat_type: &str, position: &str, name: &str, season: Season) -> Self {
        Self::new(
            format!(
                "./player_gamelog_{}/{}/{}/",
                path_segment(stat_type),
                path_segment(position),
                path_segment(name)
            ),
            format!("{season}{EXTENSION}"),
        )
    }

    /// `./game_data/<date>/<away>vs<home>.json.gz`
    pub fn game(date: NaiveDate, away: &str, home: &str) -> Self {
        Self::new(
            format!("./game_data/{}/", date.format("%Y-%m-%d")),
            format!("{}vs{}{EXTENSION}", path_segment(away), path_segment(home)),
        )
    }

    /// `./draft_data/<year>_draft.json.gz`
    pub fn draft(year: i32) -> Self {
        Self::new("./draft_data/", format!("{year}_draft{EXTENSION}"))
    }

    /// `./awards/awards.json.gz`
    pub fn awards() -> Self {
        Self::new("./awards/", format!("awards{EXTENSION}"))
    }

    /// Path relative to a disk root.
    pub fn relative_path(&self) -> PathBuf {
        let directory = self.directory.strip_prefix("./").unwrap_or(&self.directory);
        PathBuf::from(directory).join(&self.filename)
    }

    /// Object store key: the directory without its leading `./`, followed by
    /// the filename.
    pub fn object_key(&self) -> String {
        let directory = self.directory.strip_prefix("./").unwrap_or(&self.directory);
        format!("{directory}{}", self.filename)
    }
}

/// Makes an upstream value safe to use as one path segment.
///
/// Path separators and control characters become `_`, and a value that is
/// empty or made only of dots becomes `_`, so a segment can never leave its
/// parent directory.
pub fn path_segment(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}

impl fmt::Display for OutputPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.directory, self.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_season_path() {
        let path = OutputPath::player_season(
            "gameLog",
            "Forward",
            "Connor McDavid",
            Season::starting(2017),
        );
        assert_eq!(
            path.to_string(),
            "./player_gamelog_gameLog/Forward/Connor McDavid/20172018.json.gz"
        );
        assert_eq!(
            path.object_key(),
            "player_gamelog_gameLog/Forward/Connor McDavid/20172018.json.gz"
        );
    }

    #[test]
    fn test_game_path() {
        let date = NaiveDate::from_ymd_opt(2017, 10, 4).unwrap();
        let path = OutputPath::game(date, "TOR", "WPG");
        assert_eq!(path.directory, "./game_data/2017-10-04/");
        assert_eq!(path.filename, "TORvsWPG.json.gz");
    }

    #[test]
    fn test_upstream_values_cannot_escape_their_segment() {
        let path = OutputPath::player_season(
            "gameLog",
            "..",
            "../AC/DC\\Jr",
            Season::starting(2017),
        );
        assert_eq!(path.directory, "./player_gamelog_gameLog/_/.._AC_DC_Jr/");
        assert_eq!(
            path.relative_path(),
            PathBuf::from("player_gamelog_gameLog/_/.._AC_DC_Jr/20172018.json.gz")
        );

        let date = NaiveDate::from_ymd_opt(2017, 10, 4).unwrap();
        let game = OutputPath::game(date, "T/OR", "");
        assert_eq!(game.filename, "T_ORvs_.json.gz");
    }

    #[test]
    fn test_path_segment_keeps_ordinary_names() {
        assert_eq!(path_segment("Teemu Selänne"), "Teemu Selänne");
        assert_eq!(path_segment("J.T. Miller"), "J.T. Miller");
        assert_eq!(path_segment("."), "_");
        assert_eq!(path_segment("a\nb"), "a_b");
    }

    #[test]
    fn test_draft_and_awards_paths() {
        assert_eq!(OutputPath::draft(1995).to_string(), "./draft_data/1995_draft.json.gz");
        assert_eq!(OutputPath::awards().object_key(), "awards/awards.json.gz");
    }

    #[test]
    fn test_relative_path_strips_dot_prefix() {
        let path = OutputPath::awards();
        assert_eq!(path.relative_path(), PathBuf::from("awards/awards.json.gz"));
    }

    #[test]
    fn test_paths_without_dot_prefix_are_kept() {
        let path = OutputPath::new("custom/", "x.json.gz");
        assert_eq!(path.object_key(), "custom/x.json.gz");
        assert_eq!(path.relative_path(), PathBuf::from("custom/x.json.gz"));
    }
}
