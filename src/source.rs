//! Identifier list loading
//!
//! Identifiers come from a text file, one per line. When the file cannot be
//! read, or holds nothing but blank lines, the inline fallback list is used
//! instead. Neither case is fatal.

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::ScraperConfig;
use crate::lookup::Identifier;

/// Where a run's identifiers come from
#[derive(Debug, Clone)]
pub struct IdentifierSource {
    path: PathBuf,
    fallback: Vec<String>,
}

impl IdentifierSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, fallback: Vec<String>) -> Self {
        Self {
            path: path.into(),
            fallback,
        }
    }

    #[must_use]
    pub fn from_config(config: &ScraperConfig) -> Self {
        Self::new(
            config.get_input_path(),
            config.get_fallback_identifiers().to_vec(),
        )
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Identifiers from the file, or the fallback list
    #[must_use]
    pub fn load(&self) -> Vec<Identifier> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let identifiers = parse_identifiers(&contents);
                if identifiers.is_empty() {
                    warn!(
                        "No identifiers in {}, using {} fallback identifiers",
                        self.path.display(),
                        self.fallback.len()
                    );
                    self.fallback_identifiers()
                } else {
                    info!(
                        "Loaded {} identifiers from {}",
                        identifiers.len(),
                        self.path.display()
                    );
                    identifiers
                }
            }
            Err(e) => {
                warn!(
                    "Could not read identifier file {}: {}. Using {} fallback identifiers",
                    self.path.display(),
                    e,
                    self.fallback.len()
                );
                self.fallback_identifiers()
            }
        }
    }

    fn fallback_identifiers(&self) -> Vec<Identifier> {
        self.fallback
            .iter()
            .filter_map(|raw| Identifier::parse(raw))
            .collect()
    }
}

/// One identifier per line; lines are trimmed and blanks dropped.
#[must_use]
pub fn parse_identifiers(contents: &str) -> Vec<Identifier> {
    contents.lines().filter_map(Identifier::parse).collect()
}
