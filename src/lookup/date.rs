//! Birth-date re-tokenization
//!
//! The form renders dates as `DD/MM/YYYY`; output rows carry `DD-MMM-YYYY`
//! with Spanish month abbreviations.

/// Two-digit month code to three-letter abbreviation
pub const MONTH_ABBREVIATIONS: [(&str, &str); 12] = [
    ("01", "ENE"),
    ("02", "FEB"),
    ("03", "MAR"),
    ("04", "ABR"),
    ("05", "MAY"),
    ("06", "JUN"),
    ("07", "JUL"),
    ("08", "AGO"),
    ("09", "SEP"),
    ("10", "OCT"),
    ("11", "NOV"),
    ("12", "DIC"),
];

/// Abbreviation for a two-digit month code
#[must_use]
pub fn month_abbreviation(code: &str) -> Option<&'static str> {
    MONTH_ABBREVIATIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, abbr)| *abbr)
}

/// Reformat `DD/MM/YYYY` as `DD-MMM-YYYY`
///
/// Anything that is not exactly three slash-separated parts is returned
/// unchanged, and an unknown month code is kept literally.
///
/// # Examples
/// ```
/// use cedula_scrape::lookup::format_birth_date;
///
/// assert_eq!(format_birth_date("05/06/2001"), "05-JUN-2001");
/// assert_eq!(format_birth_date("05-JUN-2001"), "05-JUN-2001");
/// assert_eq!(format_birth_date("1/2/3/4"), "1/2/3/4");
/// ```
#[must_use]
pub fn format_birth_date(raw: &str) -> String {
    let parts: Vec<&str> = raw.split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return raw.to_string();
    };

    let month = month_abbreviation(month).unwrap_or(*month);
    format!("{day}-{month}-{year}")
}
