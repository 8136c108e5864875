//! Network-quiet detection after navigation
//!
//! The page is polled for its ready state and the number of completed
//! resource loads. Navigation is settled once the document is complete and
//! that count has not moved for a full quiet window.

use serde::Deserialize;
use std::time::Duration;
use tokio::time::Instant;

/// Evaluated in the page on every poll
pub const LOAD_SNAPSHOT_SCRIPT: &str = r#"
    (function() {
        return {
            readyState: document.readyState,
            bodyExists: document.body !== null,
            resourceCount: performance.getEntriesByType('resource').length
        };
    })()
"#;

/// One poll's view of the page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSnapshot {
    pub ready_state: String,
    pub body_exists: bool,
    pub resource_count: u64,
}

impl LoadSnapshot {
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.ready_state == "complete" && self.body_exists
    }
}

/// Tracks how long the resource count has been stable
#[derive(Debug, Clone)]
pub struct QuietTracker {
    window: Duration,
    last_count: Option<u64>,
    quiet_since: Option<Instant>,
}

impl QuietTracker {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_count: None,
            quiet_since: None,
        }
    }

    /// Feed one snapshot taken at `now`; true once the page has settled.
    pub fn observe(&mut self, snapshot: &LoadSnapshot, now: Instant) -> bool {
        if !snapshot.is_loaded() {
            self.last_count = None;
            self.quiet_since = None;
            return false;
        }

        if self.last_count != Some(snapshot.resource_count) {
            self.last_count = Some(snapshot.resource_count);
            self.quiet_since = Some(now);
            return self.window.is_zero();
        }

        self.quiet_since
            .is_some_and(|since| now.duration_since(since) >= self.window)
    }
}
