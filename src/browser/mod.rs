//! Rendering-engine abstraction for the lookup protocol
//!
//! Defines the `EngineLauncher`, `Engine` and `QueryPage` traits that stand
//! between the batch/lookup logic and the browser (currently Chromium via
//! chromiumoxide). The lookup protocol only needs a handful of DOM
//! operations, so `QueryPage` exposes exactly those and nothing else.

pub mod chromium;
pub mod settle;

pub use chromium::{ChromiumEngine, ChromiumPage};

use anyhow::Result;
use async_trait::async_trait;

use crate::browser_setup::LaunchError;

/// Produces a running engine, or fails once every launch option is spent.
#[async_trait]
pub trait EngineLauncher: Send + Sync {
    type Engine: Engine;

    async fn launch(&self) -> Result<Self::Engine, LaunchError>;
}

/// A running browser process that can hand out page contexts.
#[async_trait]
pub trait Engine: Send + Sync {
    type Page: QueryPage;

    /// Open a fresh page context.
    async fn open_page(&self) -> Result<Self::Page>;

    /// Close the browser process and release everything it holds.
    async fn shutdown(self) -> Result<()>;
}

/// The DOM operations the query protocol performs against one page.
///
/// None of these apply their own timeout; callers bound every wait.
#[async_trait]
pub trait QueryPage: Send + Sync {
    /// Navigate to `url` and wait until network activity is quiet.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Whether at least one element currently matches `selector`.
    async fn element_exists(&self, selector: &str) -> bool;

    /// Set the `value` of the first element matching `selector` to empty.
    async fn clear_input(&self, selector: &str) -> Result<()>;

    /// Focus the element matching `selector` and type `text` into it.
    async fn type_into(&self, selector: &str, text: &str) -> Result<()>;

    /// Click the first element matching `selector`.
    async fn click(&self, selector: &str) -> Result<()>;

    /// Serialized HTML of the current document.
    async fn html(&self) -> Result<String>;
}
