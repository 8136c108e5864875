//! Consuming setters for `ScraperConfig`

use std::path::PathBuf;

use super::types::ScraperConfig;

impl ScraperConfig {
    #[must_use]
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    #[must_use]
    pub fn fallback_identifiers<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback_identifiers = identifiers.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    #[must_use]
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    #[must_use]
    pub fn navigation_timeout_ms(mut self, ms: u64) -> Self {
        self.navigation_timeout_ms = ms;
        self
    }

    #[must_use]
    pub fn element_timeout_ms(mut self, ms: u64) -> Self {
        self.element_timeout_ms = ms;
        self
    }

    #[must_use]
    pub fn poll_interval_ms(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms.max(1);
        self
    }

    /// Set the pause after every identifier
    ///
    /// Zero disables pacing entirely, which is only sensible against a
    /// local or synthetic endpoint.
    #[must_use]
    pub fn pacing_delay_ms(mut self, ms: u64) -> Self {
        self.pacing_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn chromium_path(mut self, path: Option<PathBuf>) -> Self {
        self.chromium_path = path;
        self
    }
}
