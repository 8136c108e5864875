//! Result-card parsing
//!
//! The response page renders one `.card` per section. Header text picks the
//! section, and each body paragraph is matched against that section's label
//! prefixes. Both lookups are plain tables so the rules can be read (and
//! tested) without a browser.

use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::date::format_birth_date;
use super::types::{
    CARD_BODY_SELECTOR, CARD_HEADER_SELECTOR, CARD_SELECTOR, CedulaRecord, Identifier,
    PARAGRAPH_SELECTOR,
};

// Hardcoded selectors should NEVER fail to parse
static CARD: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(CARD_SELECTOR).expect("BUG: hardcoded CSS selector '.card' is invalid")
});

static CARD_HEADER: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(CARD_HEADER_SELECTOR)
        .expect("BUG: hardcoded CSS selector '.card-header' is invalid")
});

static CARD_BODY: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(CARD_BODY_SELECTOR)
        .expect("BUG: hardcoded CSS selector '.card-body' is invalid")
});

static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(PARAGRAPH_SELECTOR).expect("BUG: hardcoded CSS selector 'p' is invalid")
});

/// Logical section of the response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    General,
    Residence,
    VotingCenter,
}

/// Output field a labeled paragraph feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Identifier,
    Name,
    BirthDate,
    Age,
    Sex,
    Province,
    District,
    Subdistrict,
    VotingCenter,
    Table,
}

/// Header substring → section. First match wins.
pub const SECTION_HEADERS: &[(&str, SectionKind)] = &[
    ("Datos Generales", SectionKind::General),
    ("Residencia Electoral", SectionKind::Residence),
    ("Centro de Votacion", SectionKind::VotingCenter),
];

/// (section, paragraph prefix) → field. First match within a section wins.
pub const FIELD_LABELS: &[(SectionKind, &str, Field)] = &[
    (SectionKind::General, "Nombre:", Field::Name),
    (SectionKind::General, "Cedula:", Field::Identifier),
    (SectionKind::General, "F. Nacimiento:", Field::BirthDate),
    (SectionKind::General, "Edad:", Field::Age),
    (SectionKind::General, "Sexo:", Field::Sex),
    (SectionKind::Residence, "Provincia:", Field::Province),
    (SectionKind::Residence, "Distrito:", Field::District),
    (SectionKind::Residence, "Corregimiento:", Field::Subdistrict),
    (SectionKind::VotingCenter, "Centro de Votacion:", Field::VotingCenter),
    (SectionKind::VotingCenter, "Mesa #:", Field::Table),
];

/// Text content of one card
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultCard {
    pub header: String,
    pub paragraphs: Vec<String>,
}

/// Raw field text captured from the cards, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFieldSet {
    fields: BTreeMap<Field, String>,
}

impl RawFieldSet {
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    /// Captured text, or `""` when the field never appeared
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        self.fields.get(&field).map_or("", String::as_str)
    }

    /// Build the output row
    ///
    /// Name is upper-cased, the birth date re-tokenized, the rest copied.
    /// An empty captured identifier falls back to the one that was queried.
    #[must_use]
    pub fn normalize(&self, requested: &Identifier) -> CedulaRecord {
        let identifier = match self.get(Field::Identifier) {
            "" => requested.as_str().to_string(),
            captured => captured.to_string(),
        };

        CedulaRecord {
            identifier,
            name: self.get(Field::Name).to_uppercase(),
            birth_date: format_birth_date(self.get(Field::BirthDate)),
            age: self.get(Field::Age).to_string(),
            sex: self.get(Field::Sex).to_string(),
            province: self.get(Field::Province).to_string(),
            district: self.get(Field::District).to_string(),
            subdistrict: self.get(Field::Subdistrict).to_string(),
            voting_center: self.get(Field::VotingCenter).to_string(),
            table: self.get(Field::Table).to_string(),
        }
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Collect every card that has a body
///
/// A card without a `.card-header` gets an empty header; a card without a
/// `.card-body` is skipped.
#[must_use]
pub fn parse_cards(html: &str) -> Vec<ResultCard> {
    let document = Html::parse_document(html);

    document
        .select(&CARD)
        .filter_map(|card| {
            let body = card.select(&CARD_BODY).next()?;
            let header = card
                .select(&CARD_HEADER)
                .next()
                .map(element_text)
                .unwrap_or_default();
            let paragraphs = body.select(&PARAGRAPH).map(element_text).collect();
            Some(ResultCard { header, paragraphs })
        })
        .collect()
}

#[must_use]
pub fn classify_section(header: &str) -> Option<SectionKind> {
    SECTION_HEADERS
        .iter()
        .find(|(needle, _)| header.contains(needle))
        .map(|(_, kind)| *kind)
}

/// Match a paragraph against its section's labels, returning the field and
/// the trimmed text after the label.
#[must_use]
pub fn classify_paragraph(section: SectionKind, text: &str) -> Option<(Field, String)> {
    let text = text.trim_start();
    FIELD_LABELS
        .iter()
        .filter(|(kind, _, _)| *kind == section)
        .find_map(|(_, label, field)| {
            text.strip_prefix(label)
                .map(|value| (*field, value.trim().to_string()))
        })
}

/// Fold all cards into one field set; unknown headers and labels are ignored.
#[must_use]
pub fn collect_fields(cards: &[ResultCard]) -> RawFieldSet {
    let mut fields = RawFieldSet::default();

    for card in cards {
        let Some(section) = classify_section(&card.header) else {
            continue;
        };
        for paragraph in &card.paragraphs {
            if let Some((field, value)) = classify_paragraph(section, paragraph) {
                fields.set(field, value);
            }
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"
        <html><body>
          <div class="card">
            <div class="card-header">Datos Generales</div>
            <div class="card-body">
              <p><strong>Nombre:</strong> ana lopez</p>
              <p><strong>Cedula:</strong> 8-123-456</p>
              <p><strong>F. Nacimiento:</strong> 01/05/1990</p>
              <p><strong>Edad:</strong> 34</p>
              <p><strong>Sexo:</strong> F</p>
            </div>
          </div>
          <div class="card">
            <div class="card-header">Residencia Electoral</div>
            <div class="card-body">
              <p>Provincia: PANAMA</p>
              <p>Distrito: SAN MIGUELITO</p>
              <p>Corregimiento: AMELIA DENIS DE ICAZA</p>
            </div>
          </div>
          <div class="card">
            <div class="card-header"> Centro de Votacion </div>
            <div class="card-body">
              <p>Centro de Votacion: ESCUELA REPUBLICA DE CHILE</p>
              <p>Mesa #: 12</p>
            </div>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_cards_reads_headers_and_paragraphs() {
        let cards = parse_cards(RESPONSE);

        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].header.trim(), "Datos Generales");
        assert_eq!(cards[0].paragraphs.len(), 5);
        assert_eq!(cards[2].paragraphs[1].trim(), "Mesa #: 12");
    }

    #[test]
    fn test_full_response_normalizes() {
        let fields = collect_fields(&parse_cards(RESPONSE));
        let record = fields.normalize(&Identifier::parse("8-123-456").unwrap());

        assert_eq!(record.identifier, "8-123-456");
        assert_eq!(record.name, "ANA LOPEZ");
        assert_eq!(record.birth_date, "01-MAY-1990");
        assert_eq!(record.age, "34");
        assert_eq!(record.sex, "F");
        assert_eq!(record.province, "PANAMA");
        assert_eq!(record.district, "SAN MIGUELITO");
        assert_eq!(record.subdistrict, "AMELIA DENIS DE ICAZA");
        assert_eq!(record.voting_center, "ESCUELA REPUBLICA DE CHILE");
        assert_eq!(record.table, "12");
    }

    #[test]
    fn test_card_without_body_is_skipped() {
        let html = r#"<div class="card"><div class="card-header">Datos Generales</div></div>"#;
        assert!(parse_cards(html).is_empty());
    }

    #[test]
    fn test_unknown_header_and_labels_are_ignored() {
        let cards = vec![
            ResultCard {
                header: "Aviso".into(),
                paragraphs: vec!["Nombre: nobody".into()],
            },
            ResultCard {
                header: "Datos Generales".into(),
                paragraphs: vec!["Estado: ACTIVO".into(), "Nombre: luis".into()],
            },
        ];

        let fields = collect_fields(&cards);
        assert_eq!(fields.get(Field::Name), "luis");
        assert_eq!(fields.get(Field::Province), "");
    }

    #[test]
    fn test_labels_only_apply_within_their_section() {
        // "Provincia:" belongs to the residence card, not general data
        assert_eq!(
            classify_paragraph(SectionKind::General, "Provincia: COLON"),
            None
        );
        assert_eq!(
            classify_paragraph(SectionKind::Residence, "  Provincia:  COLON "),
            Some((Field::Province, "COLON".to_string()))
        );
    }

    #[test]
    fn test_missing_sections_yield_empty_fields() {
        let cards = vec![ResultCard {
            header: "Datos Generales".into(),
            paragraphs: vec!["Nombre: maria".into()],
        }];
        let record = collect_fields(&cards).normalize(&Identifier::parse(" 4-55-66 ").unwrap());

        assert_eq!(record.identifier, "4-55-66");
        assert_eq!(record.name, "MARIA");
        assert_eq!(record.birth_date, "");
        assert_eq!(record.voting_center, "");
        assert_eq!(record.table, "");
    }

    #[test]
    fn test_header_classification_by_substring() {
        assert_eq!(
            classify_section("  Datos Generales del Elector "),
            Some(SectionKind::General)
        );
        assert_eq!(
            classify_section("Centro de Votacion"),
            Some(SectionKind::VotingCenter)
        );
        assert_eq!(classify_section("Resultados"), None);
    }
}
