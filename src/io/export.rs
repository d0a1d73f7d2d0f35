//! Export the enrollment report to JSON.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts. The schema is defined by `domain::EnrollmentReport`.

use std::fs::File;
use std::path::Path;

use crate::domain::EnrollmentReport;
use crate::error::FormError;

/// Write an enrollment report as pretty-printed JSON.
pub fn write_report_json(path: &Path, report: &EnrollmentReport) -> Result<(), FormError> {
    let file = File::create(path).map_err(|e| {
        FormError::Persistence(format!(
            "Failed to create report JSON '{}': {e}",
            path.display()
        ))
    })?;

    serde_json::to_writer_pretty(file, report)
        .map_err(|e| FormError::Persistence(format!("Failed to write report JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CourseShare;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn report_json_roundtrips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");

        let report = EnrollmentReport {
            tool: "enroll".to_string(),
            generated_on: NaiveDate::from_ymd_opt(2023, 8, 14).unwrap(),
            total: 3,
            entries: vec![CourseShare {
                course: "BSCS".to_string(),
                count: 3,
                share_percent: 100.0,
            }],
        };

        write_report_json(&path, &report).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let back: EnrollmentReport = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.total, 3);
        assert_eq!(back.entries[0].course, "BSCS");
    }
}
