//! Domain types used throughout the registration desk.
//!
//! This module defines:
//!
//! - reference catalog entries (`CatalogEntry`)
//! - editable subject rows (`RegistrationRow`)
//! - the registration record (`Registration`, `EnrollmentType`)
//! - enrollment report shapes (`EnrollmentReport`, `CourseShare`)

pub mod types;

pub use types::*;
