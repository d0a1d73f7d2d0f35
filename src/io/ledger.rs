//! Ledger append and read.
//!
//! The ledger is an append-only pipe-delimited text file, one registration
//! per line. It is never rewritten: submission appends a single line, and
//! reporting re-reads the whole file.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::FormError;

/// Position of the course field in a ledger record (0-based).
const COURSE_FIELD: usize = 2;

/// Append one serialized registration record to the ledger.
///
/// The file (and its parent directory) is created on first use. The record
/// is written as-is plus a `\n` terminator, so re-reading the last line
/// yields exactly the bytes that were appended.
pub fn append_record(path: &Path, record: &str) -> Result<(), FormError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                FormError::Persistence(format!(
                    "Failed to create ledger directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            FormError::Persistence(format!("Failed to open ledger '{}': {e}", path.display()))
        })?;

    writeln!(file, "{record}").map_err(|e| {
        FormError::Persistence(format!("Failed to append to ledger '{}': {e}", path.display()))
    })?;

    info!(path = %path.display(), "registration appended to ledger");
    Ok(())
}

/// Read the course field of every ledger record, in file order.
///
/// A missing ledger is normal (nothing has been submitted yet) and yields an
/// empty list. Any record with too few fields to carry a course fails the
/// whole read with `FormError::Report`.
pub fn course_fields(path: &Path) -> Result<Vec<String>, FormError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path).map_err(|e| {
        FormError::Report(format!("Failed to open ledger '{}': {e}", path.display()))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(file);

    let mut courses = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 1;
        let record = result.map_err(|e| {
            FormError::Report(format!("Ledger '{}' line {line}: {e}", path.display()))
        })?;
        if record.len() <= COURSE_FIELD {
            return Err(FormError::Report(format!(
                "Ledger '{}' line {line}: expected at least {} fields, got {}",
                path.display(),
                COURSE_FIELD + 1,
                record.len()
            )));
        }
        courses.push(record[COURSE_FIELD].to_string());
    }

    Ok(courses)
}
