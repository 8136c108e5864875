//! Getter methods for `ScraperConfig`

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::types::ScraperConfig;

impl ScraperConfig {
    #[must_use]
    pub fn get_input_path(&self) -> &Path {
        &self.input_path
    }

    #[must_use]
    pub fn get_fallback_identifiers(&self) -> &[String] {
        &self.fallback_identifiers
    }

    #[must_use]
    pub fn get_output_path(&self) -> &Path {
        &self.output_path
    }

    #[must_use]
    pub fn get_endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    #[must_use]
    pub fn element_timeout(&self) -> Duration {
        Duration::from_millis(self.element_timeout_ms)
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[must_use]
    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    #[must_use]
    pub fn get_chromium_path(&self) -> Option<&PathBuf> {
        self.chromium_path.as_ref()
    }
}
