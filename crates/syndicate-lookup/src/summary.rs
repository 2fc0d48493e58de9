//! Batch outcome tallies for triage.

use crate::result::{ErrorKind, LookupResult};
use serde::Serialize;
use std::fmt;

/// Counts of lookup outcomes across a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LookupSummary {
    /// Lookups recorded
    pub total: usize,
    /// Lookups that returned a syndicate
    pub succeeded: usize,
    /// Identifiers rejected before the network
    pub validation_errors: usize,
    /// Transport failures and non-2xx responses
    pub network_errors: usize,
    /// Identifiers the registry had no record for
    pub not_found: usize,
    /// Everything else
    pub unknown_errors: usize,
}

impl LookupSummary {
    /// Tally a slice of results.
    #[must_use]
    pub fn from_results(results: &[LookupResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            summary.record(result);
        }
        summary
    }

    /// Add one result to the tally.
    pub fn record(&mut self, result: &LookupResult) {
        self.total += 1;
        match result.error_kind() {
            None => self.succeeded += 1,
            Some(ErrorKind::ValidationError) => self.validation_errors += 1,
            Some(ErrorKind::NetworkError) => self.network_errors += 1,
            Some(ErrorKind::NotFoundError) => self.not_found += 1,
            Some(ErrorKind::UnknownError) => self.unknown_errors += 1,
        }
    }

    /// Number of failed lookups.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.total - self.succeeded
    }

    /// Failures of one kind.
    #[must_use]
    pub fn count(&self, kind: ErrorKind) -> usize {
        match kind {
            ErrorKind::ValidationError => self.validation_errors,
            ErrorKind::NetworkError => self.network_errors,
            ErrorKind::NotFoundError => self.not_found,
            ErrorKind::UnknownError => self.unknown_errors,
        }
    }

    /// The failure kind shared by every lookup, if the whole batch failed the same way.
    ///
    /// All validation errors usually point at a bad source column; all network
    /// errors at connectivity.
    #[must_use]
    pub fn uniform_failure(&self) -> Option<ErrorKind> {
        if self.total == 0 {
            return None;
        }
        ErrorKind::ALL
            .into_iter()
            .find(|kind| self.count(*kind) == self.total)
    }
}

impl fmt::Display for LookupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lookups: {} succeeded, {} failed ({} validation, {} network, {} not found, {} unknown)",
            self.total,
            self.succeeded,
            self.failed(),
            self.validation_errors,
            self.network_errors,
            self.not_found,
            self.unknown_errors
        )
    }
}
