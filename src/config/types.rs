//! Core configuration types for cedula lookups
//!
//! This module contains the `ScraperConfig` struct that defines where
//! identifiers come from, where results go, which form is queried and how
//! long each protocol stage may take.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::{
    CHROMIUM_PATH_ENV, DEFAULT_ELEMENT_TIMEOUT_SECS, DEFAULT_INPUT_PATH,
    DEFAULT_NAVIGATION_TIMEOUT_SECS, DEFAULT_OUTPUT_PATH, DEFAULT_PACING_DELAY_MS,
    DEFAULT_POLL_INTERVAL_MS, FALLBACK_IDENTIFIERS, QUERY_ENDPOINT,
};

/// Main configuration struct for a lookup run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Identifier list, one per line
    pub(crate) input_path: PathBuf,

    /// Identifiers used when `input_path` yields nothing
    pub(crate) fallback_identifiers: Vec<String>,

    /// CSV destination, truncated at start
    pub(crate) output_path: PathBuf,

    /// URL of the query form
    pub(crate) endpoint: String,

    /// Timeout in milliseconds for navigating to the form and waiting for it to load
    ///
    /// Default: 30 seconds
    pub(crate) navigation_timeout_ms: u64,

    /// Timeout in milliseconds for each element wait (input field, result cards)
    ///
    /// A result-card timeout is how a missing record shows up, so lowering
    /// this trades false negatives for throughput.
    ///
    /// Default: 10 seconds
    pub(crate) element_timeout_ms: u64,

    /// Poll interval in milliseconds while waiting for an element
    pub(crate) poll_interval_ms: u64,

    /// Pause in milliseconds after every identifier
    ///
    /// Default: 2000 ms
    pub(crate) pacing_delay_ms: u64,

    /// Explicit Chrome/Chromium executable tried before the built-in list
    ///
    /// Seeded from `CHROMIUM_PATH` when that variable is set.
    pub(crate) chromium_path: Option<PathBuf>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            fallback_identifiers: FALLBACK_IDENTIFIERS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            endpoint: QUERY_ENDPOINT.to_string(),
            navigation_timeout_ms: DEFAULT_NAVIGATION_TIMEOUT_SECS * 1000,
            element_timeout_ms: DEFAULT_ELEMENT_TIMEOUT_SECS * 1000,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            pacing_delay_ms: DEFAULT_PACING_DELAY_MS,
            chromium_path: std::env::var_os(CHROMIUM_PATH_ENV).map(PathBuf::from),
        }
    }
}
