//! Error types for the per-record query protocol
//!
//! Every variant is recoverable: the batch turns it into a failure row and
//! moves on to the next identifier.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Protocol stage, used to say where a lookup stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Navigate,
    InputField,
    Fill,
    Submit,
    ResultCards,
    Extract,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Navigate => "navigation",
            Self::InputField => "input field wait",
            Self::Fill => "input fill",
            Self::Submit => "form submit",
            Self::ResultCards => "result card wait",
            Self::Extract => "field extraction",
        };
        f.write_str(name)
    }
}

/// Why a lookup produced no record
///
/// A result-card timeout covers both "identifier not registered" and "the
/// response never rendered"; the form gives no way to tell them apart.
#[derive(Debug, Error)]
pub enum LookupError {
    /// A bounded wait ran out
    #[error("{stage} timeout after {after:?}")]
    StageTimeout { stage: Stage, after: Duration },

    /// A browser operation failed outright
    #[error("{stage} failed: {message}")]
    Browser { stage: Stage, message: String },
}

impl LookupError {
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::StageTimeout { stage, .. } | Self::Browser { stage, .. } => *stage,
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::StageTimeout { .. })
    }

    /// Wrap an adapter error, keeping its full context chain
    #[must_use]
    pub fn browser(stage: Stage, error: &anyhow::Error) -> Self {
        Self::Browser {
            stage,
            message: format!("{error:#}"),
        }
    }
}
