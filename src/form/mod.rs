//! Registration form engine.
//!
//! Responsibilities:
//!
//! - resolve a partially-typed subject row against the catalog (`resolve_row`)
//! - keep the running unit total (`total_units`)
//! - validate and serialize a submission (`submit`)
//!
//! The UI glue calls these explicitly after each edit; nothing here depends
//! on an event loop.

use crate::domain::RegistrationRow;
use crate::io::catalog::Catalog;

pub mod submit;

pub use submit::*;

/// Resolve a subject row against the catalog.
///
/// The class code wins when both keys are present: it is authoritative and
/// kept exactly as typed. A title match mirrors the whole catalog entry,
/// class code included. A miss clears the derived fields but preserves the
/// typed key, since the user may still be mid-entry. Misses are normal
/// outcomes, never errors, and the function is idempotent.
pub fn resolve_row(row: &RegistrationRow, catalog: &Catalog) -> RegistrationRow {
    if !row.class_code.is_empty() {
        match catalog.lookup_code(&row.class_code) {
            Some(entry) => RegistrationRow {
                class_code: row.class_code.clone(),
                title: entry.title.clone(),
                time: entry.time.clone(),
                day: entry.day.clone(),
                room: entry.room.clone(),
                unit_count: entry.unit_count.clone(),
            },
            None => RegistrationRow {
                class_code: row.class_code.clone(),
                ..RegistrationRow::default()
            },
        }
    } else if !row.title.is_empty() {
        match catalog.lookup_title(&row.title) {
            Some(entry) => RegistrationRow {
                class_code: entry.class_code.clone(),
                title: entry.title.clone(),
                time: entry.time.clone(),
                day: entry.day.clone(),
                room: entry.room.clone(),
                unit_count: entry.unit_count.clone(),
            },
            None => RegistrationRow {
                title: row.title.clone(),
                ..RegistrationRow::default()
            },
        }
    } else {
        RegistrationRow::default()
    }
}

/// Sum of per-row unit counts.
///
/// Unparsable unit counts contribute 0; a partially-filled table never
/// breaks the running total.
pub fn total_units(rows: &[RegistrationRow]) -> i32 {
    rows.iter()
        .map(|row| row.unit_count.trim().parse::<i32>().unwrap_or(0))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CatalogEntry;

    fn test_catalog() -> Catalog {
        Catalog::from_entries(vec![
            CatalogEntry {
                class_code: "CS101".to_string(),
                title: "Introduction to Computing".to_string(),
                time: "08:00-09:30".to_string(),
                day: "MWF".to_string(),
                room: "R204".to_string(),
                unit_count: "3".to_string(),
            },
            CatalogEntry {
                class_code: "PE101".to_string(),
                title: "Physical Education 1".to_string(),
                time: "07:00-09:00".to_string(),
                day: "Sat".to_string(),
                room: "GYM".to_string(),
                unit_count: "2".to_string(),
            },
        ])
    }

    fn row_with_code(code: &str) -> RegistrationRow {
        RegistrationRow {
            class_code: code.to_string(),
            ..RegistrationRow::default()
        }
    }

    #[test]
    fn matched_code_mirrors_the_entry() {
        let resolved = resolve_row(&row_with_code("CS101"), &test_catalog());
        assert_eq!(resolved.class_code, "CS101");
        assert_eq!(resolved.title, "Introduction to Computing");
        assert_eq!(resolved.time, "08:00-09:30");
        assert_eq!(resolved.day, "MWF");
        assert_eq!(resolved.room, "R204");
        assert_eq!(resolved.unit_count, "3");
    }

    #[test]
    fn unmatched_code_keeps_the_typed_code_only() {
        let resolved = resolve_row(&row_with_code("CS9"), &test_catalog());
        assert_eq!(resolved.class_code, "CS9");
        assert_eq!(resolved, row_with_code("CS9"));
    }

    #[test]
    fn matched_title_fills_the_class_code() {
        let row = RegistrationRow {
            title: "Physical Education 1".to_string(),
            ..RegistrationRow::default()
        };
        let resolved = resolve_row(&row, &test_catalog());
        assert_eq!(resolved.class_code, "PE101");
        assert_eq!(resolved.unit_count, "2");
    }

    #[test]
    fn unmatched_title_keeps_the_typed_title_only() {
        let row = RegistrationRow {
            title: "Underwater Basket Weaving".to_string(),
            ..RegistrationRow::default()
        };
        let resolved = resolve_row(&row, &test_catalog());
        assert_eq!(resolved.title, "Underwater Basket Weaving");
        assert!(resolved.class_code.is_empty());
        assert!(resolved.unit_count.is_empty());
    }

    #[test]
    fn empty_row_stays_empty() {
        let resolved = resolve_row(&RegistrationRow::default(), &test_catalog());
        assert_eq!(resolved, RegistrationRow::default());
    }

    #[test]
    fn resolve_is_idempotent() {
        let catalog = test_catalog();
        for row in [
            row_with_code("CS101"),
            row_with_code("CS9"),
            RegistrationRow {
                title: "Physical Education 1".to_string(),
                ..RegistrationRow::default()
            },
            RegistrationRow::default(),
        ] {
            let once = resolve_row(&row, &catalog);
            let twice = resolve_row(&once, &catalog);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn total_units_treats_unparsable_as_zero() {
        let rows = vec![
            RegistrationRow {
                unit_count: "3".to_string(),
                ..RegistrationRow::default()
            },
            RegistrationRow {
                unit_count: "x".to_string(),
                ..RegistrationRow::default()
            },
            RegistrationRow {
                unit_count: "2".to_string(),
                ..RegistrationRow::default()
            },
        ];
        assert_eq!(total_units(&rows), 5);
    }

    #[test]
    fn total_units_of_no_rows_is_zero() {
        assert_eq!(total_units(&[]), 0);
    }
}
