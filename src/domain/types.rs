//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - edited in-memory by the form UI
//! - serialized to the flat-file ledger
//! - aggregated for enrollment reports

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One line of the reference catalog.
///
/// All fields are kept as strings, including `unit_count`: the catalog is an
/// operator-maintained text file and the unit total tolerates unparsable
/// values (they count as 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub class_code: String,
    pub title: String,
    pub time: String,
    pub day: String,
    pub room: String,
    pub unit_count: String,
}

/// An editable subject row on the form.
///
/// Only `class_code` and `title` are typed by the user; the remaining fields
/// are derived from the catalog by `form::resolve_row`. Invariant: with both
/// keys empty, every field is empty; with a key that matches a catalog entry,
/// all fields mirror that entry; with an unmatched key, the derived fields
/// are empty and the typed key is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationRow {
    pub class_code: String,
    pub title: String,
    pub time: String,
    pub day: String,
    pub room: String,
    pub unit_count: String,
}

impl RegistrationRow {
    /// A row counts toward the submission only if its class code is non-blank.
    pub fn has_class_code(&self) -> bool {
        !self.class_code.trim().is_empty()
    }
}

/// How the student enters the school year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum EnrollmentType {
    #[default]
    New,
    Old,
    Transferee,
    CrossEnrollee,
}

impl EnrollmentType {
    pub const ALL: [EnrollmentType; 4] = [
        EnrollmentType::New,
        EnrollmentType::Old,
        EnrollmentType::Transferee,
        EnrollmentType::CrossEnrollee,
    ];

    /// Label used on the form and in the ledger record.
    pub fn display_name(self) -> &'static str {
        match self {
            EnrollmentType::New => "New",
            EnrollmentType::Old => "Old",
            EnrollmentType::Transferee => "Transferee",
            EnrollmentType::CrossEnrollee => "Cross-enrollee",
        }
    }

    pub fn next(self) -> Self {
        match self {
            EnrollmentType::New => EnrollmentType::Old,
            EnrollmentType::Old => EnrollmentType::Transferee,
            EnrollmentType::Transferee => EnrollmentType::CrossEnrollee,
            EnrollmentType::CrossEnrollee => EnrollmentType::New,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            EnrollmentType::New => EnrollmentType::CrossEnrollee,
            EnrollmentType::Old => EnrollmentType::New,
            EnrollmentType::Transferee => EnrollmentType::Old,
            EnrollmentType::CrossEnrollee => EnrollmentType::Transferee,
        }
    }
}

/// A full registration as collected by the form.
///
/// Created fresh per submission cycle and reset after a successful save.
/// `date` is `None` until the user supplies one; a blank date fails
/// validation the same way a blank text field does.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub id_number: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub course: String,
    pub semester: String,
    pub school_year: String,
    pub date: Option<NaiveDate>,
    pub year_level: String,
    pub enrollment_type: EnrollmentType,
    pub rows: Vec<RegistrationRow>,
}

impl Registration {
    /// Ledger name format: `last, first, middle`.
    pub fn full_name(&self) -> String {
        format!("{}, {}, {}", self.last_name, self.first_name, self.middle_name)
    }
}

/// Resolved data-file locations for one run.
#[derive(Debug, Clone)]
pub struct FormPaths {
    pub catalog: PathBuf,
    pub courses: PathBuf,
    pub ledger: PathBuf,
}

/// Per-course share of total enrollment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseShare {
    pub course: String,
    pub count: u64,
    pub share_percent: f64,
}

/// Aggregate enrollment report derived from the ledger.
///
/// This is the "portable" representation used by the chart view, the report
/// tables, and the JSON export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentReport {
    pub tool: String,
    pub generated_on: NaiveDate,
    pub total: u64,
    pub entries: Vec<CourseShare>,
}
