//! Cedula lookup against the public query form
//!
//! One lookup runs the query protocol on a shared page and yields either a
//! normalized `CedulaRecord` or the `LookupError` that stopped it. Parsing
//! and normalization are pure functions over HTML so they can be exercised
//! without a browser.

pub mod cards;
pub mod date;
pub mod errors;
pub mod protocol;
pub mod stage_timeout;
pub mod types;

// Re-export public types
pub use cards::{Field, RawFieldSet, ResultCard, SectionKind, collect_fields, parse_cards};
pub use date::format_birth_date;
pub use errors::{LookupError, Stage};
pub use protocol::RecordExtractor;
pub use types::{CSV_HEADER, CedulaRecord, FAILURE_SENTINEL, Identifier, LookupOutcome};
