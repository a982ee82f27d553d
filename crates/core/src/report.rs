//! Outcome summaries returned by batch operations.
//!
//! Individual units of work fail independently; their errors are collected
//! here instead of aborting the batch.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::metrics;

/// One unit of work that did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitFailure {
    /// What was being processed, e.g. `roster 19171918` or `team Toronto Arenas`.
    pub unit: String,
    pub error: String,
}

impl fmt::Display for UnitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.unit, self.error)
    }
}

/// Summary of a detail-fetch batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Documents the batch tried to produce.
    pub attempted: usize,
    /// Documents handed to the sink successfully.
    pub written: usize,
    /// Documents fetched but filtered out (e.g. by team).
    pub skipped: usize,
    pub failures: Vec<UnitFailure>,
}

impl BatchReport {
    /// True when nothing failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Records a failed unit, logging it and counting it under `operation`.
    pub fn record_failure(
        &mut self,
        operation: &str,
        unit: impl Into<String>,
        error: &dyn fmt::Display,
    ) {
        self.failures.push(failure(operation, unit.into(), error));
    }

    pub fn merge(&mut self, other: BatchReport) {
        self.attempted += other.attempted;
        self.written += other.written;
        self.skipped += other.skipped;
        self.failures.extend(other.failures);
    }
}

/// Summary of an index-building pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListReport {
    /// Seasons walked.
    pub seasons: usize,
    /// Distinct players in the index afterwards.
    pub players: usize,
    /// Distinct dates in the game index afterwards.
    pub dates: usize,
    pub failures: Vec<UnitFailure>,
}

impl ListReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds a [`UnitFailure`], logging it and bumping the failure counter.
pub(crate) fn failure(operation: &str, unit: String, error: &dyn fmt::Display) -> UnitFailure {
    warn!(operation, unit = %unit, error = %error, "Unit of work failed");
    metrics::UNIT_FAILURES
        .with_label_values(&[operation])
        .inc();
    UnitFailure {
        unit,
        error: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_failure_and_merge() {
        let mut report = BatchReport {
            attempted: 2,
            written: 1,
            ..Default::default()
        };
        report.record_failure("draft", "draft 1995", &"HTTP 500");
        assert!(!report.is_complete());

        let mut total = BatchReport::default();
        total.merge(report);
        total.merge(BatchReport {
            attempted: 3,
            written: 2,
            skipped: 1,
            failures: vec![],
        });

        assert_eq!(total.attempted, 5);
        assert_eq!(total.written, 3);
        assert_eq!(total.skipped, 1);
        assert_eq!(total.failures.len(), 1);
        assert_eq!(total.failures[0].to_string(), "draft 1995: HTTP 500");
    }

    #[test]
    fn test_empty_reports_are_complete() {
        assert!(BatchReport::default().is_complete());
        assert!(ListReport::default().is_complete());
    }
}
