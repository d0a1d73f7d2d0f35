//! Reference catalog loading.
//!
//! The catalog is a pipe-delimited text file, one entry per line:
//!
//! `classCode|title|time|day|room|unitCount`
//!
//! Design goals:
//! - **Strict load**: any malformed line fails the whole load. The two lookup
//!   indices must stay consistent, so a partial load is worse than none.
//! - **Single pass**: both indices are built from the same entry list in one
//!   loop and are never mutated afterwards.
//! - **Tolerant startup**: callers that prefer a degraded form over an abort
//!   use the `*_or_empty` variants.

use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::path::Path;

use tracing::{info, warn};

use crate::domain::CatalogEntry;
use crate::error::FormError;

/// The loaded reference catalog with its two lookup indices.
///
/// `by_code` and `by_title` are index maps into the same `entries` vector.
/// A duplicate code or title keeps the last occurrence, matching plain map
/// insertion over the file in line order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_code: HashMap<String, usize>,
    by_title: HashMap<String, usize>,
}

impl Catalog {
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut by_code = HashMap::with_capacity(entries.len());
        let mut by_title = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            by_code.insert(entry.class_code.clone(), idx);
            by_title.insert(entry.title.clone(), idx);
        }
        Self {
            entries,
            by_code,
            by_title,
        }
    }

    pub fn lookup_code(&self, code: &str) -> Option<&CatalogEntry> {
        self.by_code.get(code).map(|&idx| &self.entries[idx])
    }

    pub fn lookup_title(&self, title: &str) -> Option<&CatalogEntry> {
        self.by_title.get(title).map(|&idx| &self.entries[idx])
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load the reference catalog from a pipe-delimited file.
///
/// Fails with `FormError::Parse` on the first line with fewer than 6 fields;
/// extra fields beyond 6 are ignored. Fields are whitespace-trimmed.
pub fn load_catalog(path: &Path) -> Result<Catalog, FormError> {
    let file = File::open(path).map_err(|e| {
        FormError::Parse(format!("Failed to open catalog '{}': {e}", path.display()))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut entries = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 1;
        let record = result.map_err(|e| {
            FormError::Parse(format!("Catalog '{}' line {line}: {e}", path.display()))
        })?;
        if record.len() < 6 {
            return Err(FormError::Parse(format!(
                "Catalog '{}' line {line}: expected 6 fields, got {}",
                path.display(),
                record.len()
            )));
        }
        entries.push(CatalogEntry {
            class_code: record[0].to_string(),
            title: record[1].to_string(),
            time: record[2].to_string(),
            day: record[3].to_string(),
            room: record[4].to_string(),
            unit_count: record[5].to_string(),
        });
    }

    info!(path = %path.display(), entries = entries.len(), "catalog loaded");
    Ok(Catalog::from_entries(entries))
}

/// Load the course-name list: one name per line, blank lines skipped,
/// de-duplicated preserving first-seen order.
pub fn load_course_names(path: &Path) -> Result<Vec<String>, FormError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        FormError::Parse(format!("Failed to read course list '{}': {e}", path.display()))
    })?;

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for line in raw.lines() {
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        if seen.insert(name.to_string()) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Load the catalog, degrading to an empty one on failure.
///
/// Startup tolerates a missing or broken catalog: the form still opens with
/// an empty option set, and every row lookup simply misses.
pub fn load_catalog_or_empty(path: &Path) -> Catalog {
    match load_catalog(path) {
        Ok(catalog) => catalog,
        Err(err) => {
            warn!(%err, "catalog load failed; continuing with an empty catalog");
            Catalog::default()
        }
    }
}

/// Course-list counterpart of [`load_catalog_or_empty`].
pub fn load_course_names_or_empty(path: &Path) -> Vec<String> {
    match load_course_names(path) {
        Ok(names) => names,
        Err(err) => {
            warn!(%err, "course list load failed; continuing with no options");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_catalog_builds_both_indices() {
        let file = write_temp(
            "CS101|Introduction to Computing|08:00-09:30|MWF|R204|3\n\
             CS111|Discrete Structures|11:00-12:30|TTh|R105|3\n",
        );

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);

        let by_code = catalog.lookup_code("CS111").unwrap();
        assert_eq!(by_code.title, "Discrete Structures");
        assert_eq!(by_code.room, "R105");

        let by_title = catalog.lookup_title("Introduction to Computing").unwrap();
        assert_eq!(by_title.class_code, "CS101");
        assert_eq!(by_title.unit_count, "3");
    }

    #[test]
    fn short_line_fails_the_whole_load() {
        let file = write_temp(
            "CS101|Introduction to Computing|08:00-09:30|MWF|R204|3\n\
             CS111|Discrete Structures\n",
        );

        let err = load_catalog(file.path()).unwrap_err();
        assert!(matches!(err, FormError::Parse(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn missing_catalog_degrades_to_empty() {
        let catalog = load_catalog_or_empty(Path::new("does/not/exist.csv"));
        assert!(catalog.is_empty());
        assert!(catalog.lookup_code("CS101").is_none());
    }

    #[test]
    fn course_names_dedup_preserves_first_seen_order() {
        let file = write_temp("BSCS\nBSIT\n\nBSCS\nBSIS\n");
        let names = load_course_names(file.path()).unwrap();
        assert_eq!(names, vec!["BSCS", "BSIT", "BSIS"]);
    }
}
