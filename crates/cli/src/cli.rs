use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "nhlscrape")]
#[command(about = "Fetch historical NHL statistics and store them as gzip-compressed JSON")]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: ./nhlscrape.toml when present)
    #[arg(short, long, global = true, env = "NHLSCRAPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print Prometheus metrics to stdout before exiting
    #[arg(long, global = true)]
    pub metrics: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write per-season stat documents for every indexed player
    Players {
        /// Restrict to these full names (repeatable)
        #[arg(short, long = "player")]
        players: Vec<String>,

        /// Stat type to request (default: scraper.default_stat_type)
        #[arg(short, long)]
        stat_type: Option<String>,
    },

    /// Write game feeds for a date range (default: current season to date)
    Games {
        #[arg(long)]
        start_date: Option<NaiveDate>,

        #[arg(long)]
        end_date: Option<NaiveDate>,

        /// Only games involving this team abbreviation
        #[arg(short, long)]
        team: Option<String>,
    },

    /// Write draft results for one year, or for every year since 1995
    Draft {
        /// Draft year or season token, e.g. 2017 or 20172018
        #[arg(short, long)]
        year: Option<String>,
    },

    /// Write the awards document
    Awards,

    /// Print the stat types and standings types
    Types,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_players_with_filters() {
        let cli = Cli::try_parse_from([
            "nhlscrape",
            "players",
            "--player",
            "Wayne Gretzky",
            "-p",
            "Mario Lemieux",
            "--stat-type",
            "yearByYear",
        ])
        .unwrap();

        match cli.command {
            Command::Players { players, stat_type } => {
                assert_eq!(players, vec!["Wayne Gretzky", "Mario Lemieux"]);
                assert_eq!(stat_type.as_deref(), Some("yearByYear"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_games_dates() {
        let cli = Cli::try_parse_from([
            "nhlscrape",
            "--metrics",
            "games",
            "--start-date",
            "2017-09-01",
            "--end-date",
            "2018-07-01",
            "--team",
            "TOR",
        ])
        .unwrap();

        assert!(cli.metrics);
        match cli.command {
            Command::Games {
                start_date,
                end_date,
                team,
            } => {
                assert_eq!(start_date, NaiveDate::from_ymd_opt(2017, 9, 1));
                assert_eq!(end_date, NaiveDate::from_ymd_opt(2018, 7, 1));
                assert_eq!(team.as_deref(), Some("TOR"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        assert!(Cli::try_parse_from(["nhlscrape", "games", "--start-date", "yesterday"]).is_err());
    }

    #[test]
    fn test_config_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["nhlscrape", "draft", "--config", "/etc/nhlscrape.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/nhlscrape.toml")));
        assert!(matches!(cli.command, Command::Draft { year: None }));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["nhlscrape"]).is_err());
    }
}
