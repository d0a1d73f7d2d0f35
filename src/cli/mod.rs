//! Command-line parsing for the registration desk.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the form engine and persistence code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::{EnrollmentType, FormPaths};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "enroll", version, about = "Student course registration desk")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive registration form.
    ///
    /// This is the default when no subcommand is given, so plain `enroll`
    /// opens the form.
    Form(PathArgs),
    /// Append one registration to the ledger without the form UI.
    Submit(SubmitArgs),
    /// Print per-course enrollment counts from the ledger.
    Report(ReportArgs),
    /// Print the reference catalog.
    Catalog(PathArgs),
}

/// Data-file locations shared by every command.
#[derive(Debug, Args, Clone)]
pub struct PathArgs {
    /// Reference catalog file (classCode|title|time|day|room|unitCount).
    #[arg(long, default_value = "data/courseData.csv")]
    pub catalog: PathBuf,

    /// Course name list, one per line.
    #[arg(long, default_value = "data/courses.txt")]
    pub courses: PathBuf,

    /// Registration ledger (appended on submit, read for reports).
    #[arg(long, default_value = "data/enrollees.csv")]
    pub ledger: PathBuf,
}

impl PathArgs {
    pub fn paths(&self) -> FormPaths {
        FormPaths {
            catalog: self.catalog.clone(),
            courses: self.courses.clone(),
            ledger: self.ledger.clone(),
        }
    }
}

/// Options for a non-interactive submission.
#[derive(Debug, Args)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub paths: PathArgs,

    /// Student ID number.
    #[arg(long)]
    pub id: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub middle_name: String,

    /// Course the student enrolls in (e.g. BSCS).
    #[arg(long)]
    pub course: String,

    /// Semester label (e.g. 1st).
    #[arg(long)]
    pub semester: String,

    /// School year label (e.g. 2023-2024).
    #[arg(long)]
    pub school_year: String,

    /// Registration date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Year level (e.g. 1).
    #[arg(long)]
    pub year_level: String,

    /// How the student enters the school year.
    #[arg(long, value_enum, default_value_t = EnrollmentType::New)]
    pub enrollment_type: EnrollmentType,

    /// Class code to register (repeatable).
    #[arg(long = "class", value_name = "CODE")]
    pub classes: Vec<String>,
}

/// Options for the enrollment report.
#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub paths: PathArgs,

    /// Print the table only, without the bar chart.
    #[arg(long)]
    pub no_chart: bool,

    /// Bar chart width (cells).
    #[arg(long, default_value_t = 40)]
    pub width: usize,

    /// Export the report as JSON.
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}
