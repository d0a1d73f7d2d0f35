//! Submission validation and serialization.
//!
//! A registration becomes one pipe-delimited ledger line:
//!
//! `idNumber|last, first, middle|course|semester|schoolYear|yyyy-MM-dd|yearLevel|enrollmentType|code1|code2|...`
//!
//! The class codes are appended as trailing fields of the same record, not
//! nested. Rows without a class code are dropped from the record, not
//! rejected.

use crate::domain::Registration;
use crate::error::FormError;

/// Check every required field, reporting the first blank one.
///
/// Row-level validity is not required: a submission with zero complete rows
/// is still accepted and simply carries no class codes.
pub fn validate(reg: &Registration) -> Result<(), FormError> {
    required(&reg.id_number, "ID number")?;
    required(&reg.last_name, "last name")?;
    required(&reg.first_name, "first name")?;
    required(&reg.middle_name, "middle name")?;
    required(&reg.course, "course")?;
    required(&reg.semester, "semester")?;
    required(&reg.school_year, "school year")?;
    if reg.date.is_none() {
        return Err(FormError::IncompleteForm("date"));
    }
    required(&reg.year_level, "year level")?;
    Ok(())
}

fn required(value: &str, field: &'static str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        Err(FormError::IncompleteForm(field))
    } else {
        Ok(())
    }
}

/// Serialize a validated registration into one ledger record.
pub fn serialize(reg: &Registration) -> String {
    let date = reg
        .date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    let mut fields = vec![
        reg.id_number.clone(),
        reg.full_name(),
        reg.course.clone(),
        reg.semester.clone(),
        reg.school_year.clone(),
        date,
        reg.year_level.clone(),
        reg.enrollment_type.display_name().to_string(),
    ];
    fields.extend(
        reg.rows
            .iter()
            .filter(|row| row.has_class_code())
            .map(|row| row.class_code.clone()),
    );

    fields.join("|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EnrollmentType, RegistrationRow};
    use chrono::NaiveDate;

    fn filled_registration() -> Registration {
        Registration {
            id_number: "2023-00117".to_string(),
            last_name: "Reyes".to_string(),
            first_name: "Ana".to_string(),
            middle_name: "Lim".to_string(),
            course: "BSCS".to_string(),
            semester: "1st".to_string(),
            school_year: "2023-2024".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 8, 14),
            year_level: "1".to_string(),
            enrollment_type: EnrollmentType::New,
            rows: vec![
                RegistrationRow {
                    class_code: "CS101".to_string(),
                    unit_count: "3".to_string(),
                    ..RegistrationRow::default()
                },
                RegistrationRow::default(),
                RegistrationRow {
                    class_code: "CS111".to_string(),
                    unit_count: "3".to_string(),
                    ..RegistrationRow::default()
                },
            ],
        }
    }

    #[test]
    fn validate_accepts_a_filled_form() {
        assert!(validate(&filled_registration()).is_ok());
    }

    #[test]
    fn blank_id_number_is_incomplete() {
        let mut reg = filled_registration();
        reg.id_number = "  ".to_string();

        let err = validate(&reg).unwrap_err();
        assert!(matches!(err, FormError::IncompleteForm("ID number")));
        assert_eq!(err.to_string(), "incomplete form: ID number is required");
    }

    #[test]
    fn missing_date_is_incomplete() {
        let mut reg = filled_registration();
        reg.date = None;
        assert!(matches!(
            validate(&reg).unwrap_err(),
            FormError::IncompleteForm("date")
        ));
    }

    #[test]
    fn serialize_is_one_flat_pipe_join() {
        let record = serialize(&filled_registration());
        assert_eq!(
            record,
            "2023-00117|Reyes, Ana, Lim|BSCS|1st|2023-2024|2023-08-14|1|New|CS101|CS111"
        );
    }

    #[test]
    fn serialize_drops_blank_rows_but_keeps_order() {
        let mut reg = filled_registration();
        reg.rows.reverse();
        let record = serialize(&reg);
        assert!(record.ends_with("|CS111|CS101"));
    }

    #[test]
    fn serialize_with_no_complete_rows_has_no_trailing_codes() {
        let mut reg = filled_registration();
        reg.rows = vec![RegistrationRow::default()];
        let record = serialize(&reg);
        assert!(record.ends_with("|New"));
        assert_eq!(record.split('|').count(), 8);
    }
}
