//! Data structures and constants for cedula lookups

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::LookupError;

// =============================================================================
// Constants
// =============================================================================

/// CSS selector for the identifier input on the query form
pub const INPUT_SELECTOR: &str = "#cedula";

/// CSS selector for the form's submit control
pub const SUBMIT_SELECTOR: &str = "button[type=\"submit\"]";

/// CSS selector for result cards (one per section of the response)
pub const CARD_SELECTOR: &str = ".card";

/// CSS selector for a card's header, relative to the card
pub const CARD_HEADER_SELECTOR: &str = ".card-header";

/// CSS selector for a card's body, relative to the card
pub const CARD_BODY_SELECTOR: &str = ".card-body";

/// CSS selector for labeled paragraphs inside a card body
pub const PARAGRAPH_SELECTOR: &str = "p";

/// Name written for identifiers whose lookup failed
pub const FAILURE_SENTINEL: &str = "ERROR - NO ENCONTRADO";

/// CSV column titles, in column order
pub const CSV_HEADER: [&str; 10] = [
    "CEDULA",
    "NOMBRE",
    "FECHA_NACIMIENTO",
    "EDAD",
    "SEXO",
    "PROVINCIA",
    "DISTRITO",
    "CORREGIMIENTO",
    "CENTRO_VOTACION",
    "MESA",
];

// =============================================================================
// Data Structures
// =============================================================================

/// A trimmed, non-empty record key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Trim `raw`; `None` when nothing is left.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Identifier {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| "identifier is empty".to_string())
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.0
    }
}

/// One output row
///
/// Every field is a string and absent values are empty strings. Column
/// titles come from the serde renames and match `CSV_HEADER`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CedulaRecord {
    #[serde(rename = "CEDULA")]
    pub identifier: String,

    #[serde(rename = "NOMBRE")]
    pub name: String,

    /// `DD-MMM-YYYY` when the source date was `DD/MM/YYYY`
    #[serde(rename = "FECHA_NACIMIENTO")]
    pub birth_date: String,

    #[serde(rename = "EDAD")]
    pub age: String,

    #[serde(rename = "SEXO")]
    pub sex: String,

    #[serde(rename = "PROVINCIA")]
    pub province: String,

    #[serde(rename = "DISTRITO")]
    pub district: String,

    #[serde(rename = "CORREGIMIENTO")]
    pub subdistrict: String,

    #[serde(rename = "CENTRO_VOTACION")]
    pub voting_center: String,

    #[serde(rename = "MESA")]
    pub table: String,
}

impl CedulaRecord {
    /// Placeholder row for an identifier that could not be looked up
    #[must_use]
    pub fn failure(identifier: &Identifier) -> Self {
        Self {
            identifier: identifier.as_str().to_string(),
            name: FAILURE_SENTINEL.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.name == FAILURE_SENTINEL
    }
}

/// Result of one lookup
#[derive(Debug)]
pub enum LookupOutcome {
    Found(CedulaRecord),
    Failed(LookupError),
}

impl LookupOutcome {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}
