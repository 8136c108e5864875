//! Sequential batch orchestration
//!
//! One browser, one shared page, one identifier in flight. Every non-blank
//! input line yields exactly one persisted row: the extracted record, or a
//! failure placeholder when the lookup did not complete.

use std::time::Duration;
use tracing::{debug, warn};

use super::batch_types::{BatchError, BatchResult, BatchTally};
use super::progress::{LogProgress, ProgressReporter};
use crate::browser::{Engine, EngineLauncher};
use crate::config::ScraperConfig;
use crate::lookup::{CedulaRecord, Identifier, LookupOutcome, RecordExtractor};
use crate::sink::RecordSink;

/// Runs lookups for a list of identifiers and persists each outcome.
pub struct BatchRunner<L, S, R = LogProgress> {
    launcher: L,
    extractor: RecordExtractor,
    sink: S,
    progress: R,
    pacing_delay: Duration,
}

impl<L, S> BatchRunner<L, S, LogProgress>
where
    L: EngineLauncher,
    S: RecordSink,
{
    #[must_use]
    pub fn new(launcher: L, extractor: RecordExtractor, sink: S, pacing_delay: Duration) -> Self {
        Self {
            launcher,
            extractor,
            sink,
            progress: LogProgress,
            pacing_delay,
        }
    }

    #[must_use]
    pub fn from_config(launcher: L, sink: S, config: &ScraperConfig) -> Self {
        Self::new(
            launcher,
            RecordExtractor::from_config(config),
            sink,
            config.pacing_delay(),
        )
    }
}

impl<L, S, R> BatchRunner<L, S, R>
where
    L: EngineLauncher,
    S: RecordSink,
    R: ProgressReporter,
{
    /// Swap the progress reporter
    #[must_use]
    pub fn with_progress<R2: ProgressReporter>(self, progress: R2) -> BatchRunner<L, S, R2> {
        BatchRunner {
            launcher: self.launcher,
            extractor: self.extractor,
            sink: self.sink,
            progress,
            pacing_delay: self.pacing_delay,
        }
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Look up every identifier in order
    ///
    /// Blank entries are skipped without a row. The engine is shut down on
    /// every path once it has launched, including when persistence fails.
    ///
    /// # Errors
    /// * `BatchError::Launch` - no browser configuration could start
    /// * `BatchError::Page` - the shared page could not be opened
    /// * `BatchError::Sink` - a record could not be written
    pub async fn run<I, T>(&mut self, identifiers: I) -> BatchResult<BatchTally>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let raw: Vec<String> = identifiers
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        self.progress.report_started(raw.len());

        let engine = self.launcher.launch().await?;
        self.progress.report_browser_launched();

        let result = self.process_all(&engine, &raw).await;

        if let Err(e) = engine.shutdown().await {
            warn!("Browser shutdown failed: {:#}", e);
        }

        let tally = result?;
        self.progress.report_summary(&tally, &self.sink.location());
        Ok(tally)
    }

    async fn process_all(&mut self, engine: &L::Engine, raw: &[String]) -> BatchResult<BatchTally> {
        let page = engine
            .open_page()
            .await
            .map_err(|e| BatchError::Page(format!("{e:#}")))?;

        let total = raw.len();
        let mut tally = BatchTally::default();

        for (index, token) in raw.iter().enumerate() {
            let Some(identifier) = Identifier::parse(token) else {
                debug!("Skipping blank identifier at position {}", index + 1);
                continue;
            };

            self.progress.report_attempt(index + 1, total, &identifier);

            let record = match self.extractor.extract(&page, &identifier).await {
                LookupOutcome::Found(record) => {
                    self.progress.report_found(&record);
                    tally.record_success(record.clone());
                    record
                }
                LookupOutcome::Failed(e) => {
                    self.progress.report_failed(&identifier, &e);
                    let record = CedulaRecord::failure(&identifier);
                    tally.record_failure(record.clone());
                    record
                }
            };

            self.sink.write(&record)?;
            self.progress.report_persisted(&record);

            if !self.pacing_delay.is_zero() {
                tokio::time::sleep(self.pacing_delay).await;
            }
        }

        Ok(tally)
    }
}
