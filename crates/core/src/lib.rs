pub mod api;
pub mod config;
pub mod error;
pub mod flatten;
pub mod index;
pub mod metrics;
pub mod report;
pub mod scraper;
pub mod season;
pub mod sink;
pub mod testing;

pub use api::{ApiConfig, ApiError, StatsApi, StatsApiClient};
pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, Config,
    ConfigError, SanitizedConfig,
};
pub use error::ScrapeError;
pub use flatten::{flatten, flatten_json};
pub use index::{GameIndex, PlayerEntry, PlayerIndex};
pub use report::{BatchReport, ListReport, UnitFailure};
pub use scraper::{fetch_standings_types, fetch_stat_types, Scraper, ScraperConfig};
pub use season::{
    current_season_window, generate_seasons, validate_draft_year, validate_years,
    AvailabilityPolicy, Season, SeasonError,
};
pub use sink::{
    create_sink, DiskSink, ObjectStoreConfig, ObjectStoreSink, OutputPath, Sink, SinkConfig,
    SinkError,
};
