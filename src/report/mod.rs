//! Enrollment reporting: per-course counts and percentage shares.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;

use crate::domain::{CourseShare, EnrollmentReport};
use crate::error::FormError;

pub mod format;

/// Count enrollments per course across the whole ledger.
///
/// A missing ledger is an empty mapping, not an error. The map is ordered by
/// course name so every downstream rendering is deterministic.
pub fn course_counts(path: &Path) -> Result<BTreeMap<String, u64>, FormError> {
    let mut counts = BTreeMap::new();
    for course in crate::io::ledger::course_fields(path)? {
        *counts.entry(course).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Build the full report (total + per-course shares) from raw counts.
pub fn build_report(counts: &BTreeMap<String, u64>, asof: NaiveDate) -> EnrollmentReport {
    let total: u64 = counts.values().sum();
    let entries = counts
        .iter()
        .map(|(course, &count)| CourseShare {
            course: course.clone(),
            count,
            share_percent: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            },
        })
        .collect();

    EnrollmentReport {
        tool: "enroll".to_string(),
        generated_on: asof,
        total,
        entries,
    }
}
