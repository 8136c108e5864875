//! Configuration module for cedula lookups
//!
//! This module provides the `ScraperConfig` struct with sensible defaults,
//! consuming setters for overrides and getters that hand out ready-to-use
//! `Duration`s and paths.

// Sub-modules
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use types::ScraperConfig;
