//! Core types for batch runs.
//!
//! Error type for the conditions that end a run early, and the in-memory
//! tally a finished run returns.

use thiserror::Error;

use crate::browser_setup::LaunchError;
use crate::lookup::CedulaRecord;
use crate::sink::SinkError;

/// Conditions that abort a batch
///
/// Per-record lookup failures never show up here; they become failure rows.
#[derive(Debug, Error)]
pub enum BatchError {
    /// No browser configuration could be started
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// The browser started but the shared page could not be opened
    #[error("Failed to open lookup page: {0}")]
    Page(String),

    /// A record could not be persisted
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Convenience alias for Result with `BatchError`
pub type BatchResult<T> = Result<T, BatchError>;

/// Outcome counts plus every record produced, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchTally {
    pub successes: usize,
    pub failures: usize,
    pub records: Vec<CedulaRecord>,
}

impl BatchTally {
    pub fn record_success(&mut self, record: CedulaRecord) {
        self.successes += 1;
        self.records.push(record);
    }

    pub fn record_failure(&mut self, record: CedulaRecord) {
        self.failures += 1;
        self.records.push(record);
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.records.len()
    }
}
