//! Property tests for birth-date formatting

use cedula_scrape::format_birth_date;
use cedula_scrape::lookup::date::MONTH_ABBREVIATIONS;
use proptest::prelude::*;

proptest! {
    #[test]
    fn slashless_input_is_unchanged(raw in "[^/]{0,24}") {
        prop_assert_eq!(format_birth_date(&raw), raw);
    }

    #[test]
    fn known_months_map_to_abbreviations(
        day in "[0-9]{2}",
        month_index in 0usize..12,
        year in "[0-9]{4}",
    ) {
        let (code, abbr) = MONTH_ABBREVIATIONS[month_index];
        let formatted = format_birth_date(&format!("{day}/{code}/{year}"));
        prop_assert_eq!(formatted, format!("{day}-{abbr}-{year}"));
    }

    #[test]
    fn wrong_part_count_passes_through(
        parts in prop::collection::vec("[0-9A-Z]{1,4}", 1..6)
            .prop_filter("three parts are reformatted", |p| p.len() != 3),
    ) {
        let raw = parts.join("/");
        prop_assert_eq!(format_birth_date(&raw), raw);
    }

    #[test]
    fn formatted_output_has_no_slashes(
        day in "[0-9]{1,2}",
        month in "[0-9]{1,2}",
        year in "[0-9]{2,4}",
    ) {
        let formatted = format_birth_date(&format!("{day}/{month}/{year}"));
        prop_assert!(!formatted.contains('/'));
        prop_assert_eq!(formatted.matches('-').count(), 2);
    }
}
