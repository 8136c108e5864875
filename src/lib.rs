pub mod batch;
pub mod browser;
pub mod browser_setup;
pub mod config;
pub mod lookup;
pub mod sink;
pub mod source;
pub mod utils;

pub use batch::{BatchError, BatchRunner, BatchTally, LogProgress, NoOpProgress, ProgressReporter};
pub use browser::{ChromiumEngine, ChromiumPage, Engine, EngineLauncher, QueryPage};
pub use browser_setup::{
    ChromiumLauncher, LaunchCandidate, LaunchError, launch_candidates, launch_chromium,
    launch_first,
};
pub use config::ScraperConfig;
pub use lookup::{
    CedulaRecord, Identifier, LookupError, LookupOutcome, RecordExtractor, format_birth_date,
};
pub use sink::{CsvSink, RecordSink, SinkError};
pub use source::IdentifierSource;

/// Run a full lookup with Chromium and a CSV sink built from `config`.
///
/// Identifiers are loaded from the config's input file (or its fallback
/// list) unless `identifiers` is non-empty.
pub async fn run(config: &ScraperConfig, identifiers: Vec<String>) -> Result<BatchTally, BatchError> {
    let identifiers: Vec<String> = if identifiers.is_empty() {
        IdentifierSource::from_config(config)
            .load()
            .into_iter()
            .map(String::from)
            .collect()
    } else {
        identifiers
    };

    let sink = CsvSink::create(config.get_output_path())?;
    let launcher = ChromiumLauncher::from_config(config);

    let mut runner = BatchRunner::from_config(launcher, sink, config);
    runner.run(identifiers).await
}
