//! Progress reporting abstraction for batch runs
//!
//! Defines the `ProgressReporter` trait for lifecycle event reporting, a
//! `tracing`-backed implementation for the console and a no-op
//! implementation for callers that want silence.

use tracing::{info, warn};

use super::batch_types::BatchTally;
use crate::lookup::{CedulaRecord, Identifier, LookupError};

/// Trait for reporting batch progress at key lifecycle events
pub trait ProgressReporter: Send + Sync {
    /// Report that a run over `total` input lines is starting
    fn report_started(&self, total: usize);

    /// Report that the browser is up and the shared page is about to open
    fn report_browser_launched(&self);

    /// Report that lookup of the identifier at 1-based `position` began
    fn report_attempt(&self, position: usize, total: usize, identifier: &Identifier);

    /// Report a successful lookup
    fn report_found(&self, record: &CedulaRecord);

    /// Report a failed lookup (a failure row is written in its place)
    fn report_failed(&self, identifier: &Identifier, error: &LookupError);

    /// Report that a record reached the sink
    fn report_persisted(&self, record: &CedulaRecord);

    /// Report the final counts and where the output went
    fn report_summary(&self, tally: &BatchTally, location: &str);
}

/// Progress reporter that writes through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report_started(&self, total: usize) {
        info!("Starting lookup run");
        info!("Total identifiers to process: {}", total);
    }

    fn report_browser_launched(&self) {
        info!("Browser launched");
    }

    fn report_attempt(&self, position: usize, total: usize, identifier: &Identifier) {
        info!("[{}/{}] Processing {}...", position, total, identifier);
    }

    fn report_found(&self, record: &CedulaRecord) {
        info!("Found {} ({})", record.identifier, record.name);
    }

    fn report_failed(&self, identifier: &Identifier, error: &LookupError) {
        warn!("No record for {}: {}", identifier, error);
    }

    fn report_persisted(&self, record: &CedulaRecord) {
        info!("Saved {} to CSV", record.identifier);
    }

    fn report_summary(&self, tally: &BatchTally, location: &str) {
        let rule = "=".repeat(50);
        info!("{}", rule);
        info!("FINAL SUMMARY:");
        info!("Successful lookups: {}", tally.successes);
        info!("Failed lookups: {}", tally.failures);
        info!("Total records: {}", tally.total());
        info!("CSV file saved: {}", location);
        info!("{}", rule);
    }
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report_started(&self, _total: usize) {}

    #[inline(always)]
    fn report_browser_launched(&self) {}

    #[inline(always)]
    fn report_attempt(&self, _position: usize, _total: usize, _identifier: &Identifier) {}

    #[inline(always)]
    fn report_found(&self, _record: &CedulaRecord) {}

    #[inline(always)]
    fn report_failed(&self, _identifier: &Identifier, _error: &LookupError) {}

    #[inline(always)]
    fn report_persisted(&self, _record: &CedulaRecord) {}

    #[inline(always)]
    fn report_summary(&self, _tally: &BatchTally, _location: &str) {}
}
