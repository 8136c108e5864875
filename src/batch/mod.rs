//! Batch Module
//!
//! Orchestrates a full lookup run: one browser launch, one shared page,
//! strictly sequential lookups with a pause after each, and one persisted
//! row per identifier.

// Sub-modules
pub mod batch_types;
pub mod progress;
pub mod runner;

// Re-exports for public API
pub use batch_types::{BatchError, BatchResult, BatchTally};
pub use progress::{LogProgress, NoOpProgress, ProgressReporter};
pub use runner::BatchRunner;
