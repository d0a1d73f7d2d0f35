//! Formatted terminal output for reports and catalog listings.
//!
//! We keep formatting code in one place so:
//! - the counting/derivation code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{CatalogEntry, EnrollmentReport};

/// Format the per-course enrollment table.
pub fn format_report_table(report: &EnrollmentReport) -> String {
    let mut out = String::new();

    out.push_str("=== Enrollment per course ===\n");
    out.push_str(&format!(
        "As-of: {} | registrations: {}\n\n",
        report.generated_on, report.total
    ));

    out.push_str(&format!(
        "{:<24} {:>10} {:>10}\n",
        "course", "enrollees", "share"
    ));
    out.push_str(&format!("{:-<24} {:-<10} {:-<10}\n", "", "", ""));

    for entry in &report.entries {
        out.push_str(&format!(
            "{:<24} {:>10} {:>9}%\n",
            truncate(&entry.course, 24),
            entry.count,
            format_percent(entry.share_percent),
        ));
    }

    out
}

/// Format the reference catalog as a table.
pub fn format_catalog_table(entries: &[CatalogEntry]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<10} {:<32} {:>12} {:<6} {:<8} {:>5}\n",
        "code", "title", "time", "day", "room", "units"
    ));
    out.push_str(&format!(
        "{:-<10} {:-<32} {:-<12} {:-<6} {:-<8} {:-<5}\n",
        "", "", "", "", "", ""
    ));

    for entry in entries {
        out.push_str(&format!(
            "{:<10} {:<32} {:>12} {:<6} {:<8} {:>5}\n",
            truncate(&entry.class_code, 10),
            truncate(&entry.title, 32),
            truncate(&entry.time, 12),
            truncate(&entry.day, 6),
            truncate(&entry.room, 8),
            truncate(&entry.unit_count, 5),
        ));
    }

    out.push_str(&format!("\nentries: {}\n", entries.len()));
    out
}

/// Percent label with up to two decimals, trailing zeros trimmed
/// (`66.67`, `40`, never `40.00`).
pub fn format_percent(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::build_report;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    #[test]
    fn percent_labels_trim_trailing_zeros() {
        assert_eq!(format_percent(40.0), "40");
        assert_eq!(format_percent(66.666), "66.67");
        assert_eq!(format_percent(12.5), "12.5");
        assert_eq!(format_percent(0.0), "0");
    }

    #[test]
    fn report_table_lists_every_course() {
        let mut counts = BTreeMap::new();
        counts.insert("BSCS".to_string(), 2u64);
        counts.insert("BSIT".to_string(), 1u64);
        let report = build_report(&counts, NaiveDate::from_ymd_opt(2023, 8, 14).unwrap());

        let table = format_report_table(&report);
        assert!(table.contains("BSCS"));
        assert!(table.contains("BSIT"));
        assert!(table.contains("66.67%"));
        assert!(table.contains("registrations: 3"));
    }

    #[test]
    fn truncate_marks_cut_values() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-very-long-title", 8), "a-very-.");
    }
}
