//! Chromium-backed engine and page using chromiumoxide.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::settle::{LOAD_SNAPSHOT_SCRIPT, LoadSnapshot, QuietTracker};
use super::{Engine, QueryPage};
use crate::utils::constants::{DEFAULT_POLL_INTERVAL_MS, NETWORK_QUIET_WINDOW_MS};

/// Wrapper for a launched Browser and its CDP event handler task
///
/// The handler MUST be aborted when the browser goes away, otherwise it
/// keeps polling a dead websocket. `Drop` takes care of that; `shutdown()`
/// additionally closes the process and removes the profile directory.
pub struct ChromiumEngine {
    browser: Browser,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl ChromiumEngine {
    pub(crate) fn new(browser: Browser, handler: JoinHandle<()>, user_data_dir: PathBuf) -> Self {
        Self {
            browser,
            handler,
            user_data_dir: Some(user_data_dir),
        }
    }

    /// Remove the profile directory (blocking)
    ///
    /// Must run after `browser.wait()` so Chrome has released its file handles.
    fn cleanup_temp_dir(&mut self) {
        if let Some(path) = self.user_data_dir.take() {
            debug!("Cleaning up browser profile directory: {}", path.display());
            if let Err(e) = std::fs::remove_dir_all(&path) {
                warn!(
                    "Failed to clean up profile directory {}: {}. Manual cleanup may be required.",
                    path.display(),
                    e
                );
            }
        }
    }
}

impl Drop for ChromiumEngine {
    fn drop(&mut self) {
        self.handler.abort();

        if self.user_data_dir.is_some() {
            warn!("ChromiumEngine dropped without shutdown - removing profile directory in Drop");
            self.cleanup_temp_dir();
        }
    }
}

#[async_trait]
impl Engine for ChromiumEngine {
    type Page = ChromiumPage;

    async fn open_page(&self) -> Result<ChromiumPage> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("Failed to create blank page")?;
        Ok(ChromiumPage { page })
    }

    async fn shutdown(mut self) -> Result<()> {
        info!("Shutting down browser");

        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }

        self.cleanup_temp_dir();
        Ok(())
    }
}

/// A single Chromium page context shared across lookups.
pub struct ChromiumPage {
    page: Page,
}

impl ChromiumPage {
    /// Poll until the document is complete and no resource load has
    /// finished for a full quiet window
    ///
    /// Unbounded on its own; the navigation stage timeout caps it.
    async fn wait_for_network_quiet(&self) {
        let poll_interval = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);
        let mut tracker = QuietTracker::new(Duration::from_millis(NETWORK_QUIET_WINDOW_MS));
        let start = Instant::now();

        loop {
            match self.page.evaluate(LOAD_SNAPSHOT_SCRIPT).await {
                Ok(result) => match result.into_value::<LoadSnapshot>() {
                    Ok(snapshot) => {
                        if tracker.observe(&snapshot, Instant::now()) {
                            debug!(
                                "Network quiet after {:.2}s ({} resources)",
                                start.elapsed().as_secs_f64(),
                                snapshot.resource_count
                            );
                            return;
                        }
                    }
                    Err(e) => debug!("Unexpected load snapshot: {}", e),
                },
                Err(e) => debug!("Failed to check load state: {}, retrying", e),
            }
            tokio::time::sleep(poll_interval).await;
        }
    }
}

#[async_trait]
impl QueryPage for ChromiumPage {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .with_context(|| format!("Failed to navigate to {url}"))?;
        self.wait_for_network_quiet().await;
        Ok(())
    }

    async fn element_exists(&self, selector: &str) -> bool {
        self.page.find_element(selector).await.is_ok()
    }

    async fn clear_input(&self, selector: &str) -> Result<()> {
        let quoted = serde_json::to_string(selector)?;
        let script = format!(
            "(() => {{ const el = document.querySelector({quoted}); if (el) {{ el.value = ''; }} }})()"
        );
        self.page
            .evaluate(script.as_str())
            .await
            .with_context(|| format!("Failed to clear input '{selector}'"))?;
        Ok(())
    }

    async fn type_into(&self, selector: &str, text: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .with_context(|| format!("Input '{selector}' not found"))?;
        element
            .click()
            .await
            .with_context(|| format!("Failed to focus '{selector}'"))?;
        element
            .type_str(text)
            .await
            .with_context(|| format!("Failed to type into '{selector}'"))?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.page
            .find_element(selector)
            .await
            .with_context(|| format!("Element '{selector}' not found"))?
            .click()
            .await
            .with_context(|| format!("Failed to click '{selector}'"))?;
        Ok(())
    }

    async fn html(&self) -> Result<String> {
        self.page.content().await.context("Failed to read page HTML")
    }
}
