use chrono::NaiveDate;
use thiserror::Error;

use crate::api::ApiError;
use crate::season::SeasonError;
use crate::sink::SinkError;

/// Errors raised by scraper operations and by individual units of work.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Season(#[from] SeasonError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    /// Upstream document lacks a field the scraper relies on.
    #[error("Response is missing field: {0}")]
    MissingField(String),

    /// Requested player name is not in the player index.
    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}

impl ScrapeError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Whether this error comes from season or draft-year validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Season(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_flagged() {
        let err: ScrapeError = SeasonError::OutOfRange {
            start: 1916,
            end: 1917,
        }
        .into();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Season 1916-1917 is before the NHL started recording data"
        );
        assert!(!ScrapeError::missing("teams").is_validation());
    }
}
