use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig, HeadlessMode};
use futures::StreamExt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::task;
use tracing::{error, info, trace, warn};

use crate::browser::{ChromiumEngine, EngineLauncher};
use crate::config::ScraperConfig;
use crate::utils::constants::BROWSER_REQUEST_TIMEOUT_SECS;

/// Stability flags for containers and hosts without a usable sandbox, GPU
/// or a reasonably sized `/dev/shm`.
pub const BASELINE_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--disable-accelerated-2d-canvas",
    "--no-first-run",
    "--no-zygote",
    "--single-process",
    "--disable-gpu",
    "--disable-web-security",
];

/// Last-resort flags when the baseline set itself prevents startup.
pub const MINIMAL_ARGS: &[&str] = &["--no-sandbox", "--disable-setuid-sandbox"];

/// Fixed install locations tried before auto-detection.
pub const KNOWN_EXECUTABLES: &[&str] = &[
    "/usr/bin/chromium-browser",
    "/usr/bin/google-chrome",
    "/usr/bin/chrome",
];

/// Error returned when no launch configuration produced a running browser
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Could not launch a browser with any of {attempts} configurations; last error: {last}")]
    Exhausted { attempts: usize, last: String },
}

/// One way of starting the browser: an optional executable plus its flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCandidate {
    pub executable: Option<PathBuf>,
    pub args: &'static [&'static str],
}

impl LaunchCandidate {
    #[must_use]
    pub fn new(executable: Option<PathBuf>, args: &'static [&'static str]) -> Self {
        Self { executable, args }
    }

    /// Short label for log lines.
    #[must_use]
    pub fn describe(&self) -> String {
        let exe = self
            .executable
            .as_ref()
            .map_or_else(|| "auto-detected executable".to_string(), |p| p.display().to_string());
        format!("{exe} ({} flags)", self.args.len())
    }
}

/// Ordered launch candidates
///
/// An explicit executable (from `CHROMIUM_PATH` or the CLI) comes first,
/// then the fixed install locations, then auto-detection with the baseline
/// flags, then auto-detection with minimal flags.
#[must_use]
pub fn launch_candidates(explicit: Option<&Path>) -> Vec<LaunchCandidate> {
    let mut candidates = Vec::with_capacity(KNOWN_EXECUTABLES.len() + 3);

    if let Some(path) = explicit {
        candidates.push(LaunchCandidate::new(Some(path.to_path_buf()), BASELINE_ARGS));
    }
    candidates.extend(
        KNOWN_EXECUTABLES
            .iter()
            .map(|p| LaunchCandidate::new(Some(PathBuf::from(p)), BASELINE_ARGS)),
    );
    candidates.push(LaunchCandidate::new(None, BASELINE_ARGS));
    candidates.push(LaunchCandidate::new(None, MINIMAL_ARGS));

    candidates
}

/// Try each candidate in order and return the first successful launch.
///
/// Individual failures are logged and swallowed; only when the last
/// candidate fails is `LaunchError::Exhausted` returned, carrying that
/// candidate's error.
pub async fn launch_first<T, F, Fut>(
    candidates: &[LaunchCandidate],
    mut attempt: F,
) -> Result<T, LaunchError>
where
    F: FnMut(&LaunchCandidate) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last = String::from("no launch configurations available");

    for (index, candidate) in candidates.iter().enumerate() {
        info!(
            "Launching browser [{}/{}]: {}",
            index + 1,
            candidates.len(),
            candidate.describe()
        );
        match attempt(candidate).await {
            Ok(launched) => return Ok(launched),
            Err(e) => {
                warn!("Launch configuration failed ({}): {:#}", candidate.describe(), e);
                last = format!("{e:#}");
            }
        }
    }

    Err(LaunchError::Exhausted {
        attempts: candidates.len(),
        last,
    })
}

/// Headless config for one candidate, using the page's own viewport.
pub fn browser_config(candidate: &LaunchCandidate, user_data_dir: &Path) -> Result<BrowserConfig> {
    let mut config_builder = BrowserConfig::builder()
        .request_timeout(Duration::from_secs(BROWSER_REQUEST_TIMEOUT_SECS))
        .headless_mode(HeadlessMode::New)
        .viewport(None)
        .user_data_dir(user_data_dir);

    for flag in candidate.args {
        config_builder = config_builder.arg(*flag);
    }

    if let Some(path) = &candidate.executable {
        config_builder = config_builder.chrome_executable(path);
    }

    config_builder
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build browser config: {e}"))
}

/// Launch headless Chromium for a single candidate configuration.
pub async fn launch_chromium(
    candidate: &LaunchCandidate,
    user_data_dir: &Path,
) -> Result<ChromiumEngine> {
    if let Some(path) = &candidate.executable
        && !path.exists()
    {
        anyhow::bail!("Browser executable not found at {}", path.display());
    }

    std::fs::create_dir_all(user_data_dir).context("Failed to create user data directory")?;

    let browser_config = browser_config(candidate, user_data_dir)?;

    let (browser, mut handler) = Browser::launch(browser_config)
        .await
        .context("Failed to launch browser")?;

    let handler_task = task::spawn(async move {
        while let Some(h) = handler.next().await {
            if let Err(e) = h {
                let error_msg = e.to_string();

                // chromiumoxide cannot decode every CDP event Chrome emits
                let is_benign_serialization_error = error_msg
                    .contains("data did not match any variant of untagged enum Message")
                    || error_msg.contains("Failed to deserialize WS response");

                if is_benign_serialization_error {
                    trace!("Suppressed benign CDP serialization error: {}", error_msg);
                } else {
                    error!("Browser handler error: {:?}", e);
                }
            }
        }
        info!("Browser handler task completed");
    });

    Ok(ChromiumEngine::new(
        browser,
        handler_task,
        user_data_dir.to_path_buf(),
    ))
}

/// Launches Chromium by walking the candidate list.
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    candidates: Vec<LaunchCandidate>,
    user_data_dir: PathBuf,
}

impl ChromiumLauncher {
    #[must_use]
    pub fn new(candidates: Vec<LaunchCandidate>, user_data_dir: PathBuf) -> Self {
        Self {
            candidates,
            user_data_dir,
        }
    }

    /// Candidates from the config's explicit executable plus the built-in list,
    /// with a per-process profile directory under the system temp dir.
    #[must_use]
    pub fn from_config(config: &ScraperConfig) -> Self {
        let user_data_dir =
            std::env::temp_dir().join(format!("cedula_scrape_chrome_{}", std::process::id()));
        Self::new(
            launch_candidates(config.get_chromium_path().map(PathBuf::as_path)),
            user_data_dir,
        )
    }

    #[must_use]
    pub fn candidates(&self) -> &[LaunchCandidate] {
        &self.candidates
    }
}

#[async_trait]
impl EngineLauncher for ChromiumLauncher {
    type Engine = ChromiumEngine;

    async fn launch(&self) -> Result<ChromiumEngine, LaunchError> {
        let user_data_dir = self.user_data_dir.as_path();
        let launched = launch_first(&self.candidates, |candidate| {
            let candidate = candidate.clone();
            async move { launch_chromium(&candidate, user_data_dir).await }
        })
        .await;

        // No engine owns the profile directory, so remove it here
        if launched.is_err()
            && user_data_dir.exists()
            && let Err(e) = std::fs::remove_dir_all(user_data_dir)
        {
            warn!(
                "Failed to clean up profile directory {}: {}",
                user_data_dir.display(),
                e
            );
        }

        launched
    }
}
