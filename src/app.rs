//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the reference catalog and course list
//! - dispatches to the form UI or the non-interactive commands
//! - prints reports/tables and writes optional exports

use clap::Parser;
use tracing::{info, warn};

use crate::cli::{Command, PathArgs, ReportArgs, SubmitArgs};
use crate::domain::{Registration, RegistrationRow};
use crate::error::FormError;

/// Entry point for the `enroll` binary.
pub fn run() -> Result<(), FormError> {
    crate::logging::init_logging();

    // We want a bare `enroll` (and `enroll --ledger ...`) to behave like
    // `enroll form ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Form(args) => handle_form(args),
        Command::Submit(args) => handle_submit(args),
        Command::Report(args) => handle_report(args),
        Command::Catalog(args) => handle_catalog(args),
    }
}

fn handle_form(args: PathArgs) -> Result<(), FormError> {
    crate::tui::run(args.paths())
}

fn handle_submit(args: SubmitArgs) -> Result<(), FormError> {
    let paths = args.paths.paths();

    // Class codes are authoritative as typed; the catalog only fills in the
    // derived fields (and the unit total). A missing catalog is tolerated.
    let catalog = crate::io::catalog::load_catalog_or_empty(&paths.catalog);

    let rows: Vec<RegistrationRow> = args
        .classes
        .iter()
        .map(|code| {
            let row = RegistrationRow {
                class_code: code.clone(),
                ..RegistrationRow::default()
            };
            let resolved = crate::form::resolve_row(&row, &catalog);
            if resolved.title.is_empty() && !catalog.is_empty() {
                warn!(code = %code, "class code not found in catalog");
            }
            resolved
        })
        .collect();
    let units = crate::form::total_units(&rows);

    let registration = Registration {
        id_number: args.id,
        last_name: args.last_name,
        first_name: args.first_name,
        middle_name: args.middle_name,
        course: args.course,
        semester: args.semester,
        school_year: args.school_year,
        date: Some(args.date.unwrap_or_else(|| chrono::Local::now().date_naive())),
        year_level: args.year_level,
        enrollment_type: args.enrollment_type,
        rows,
    };

    crate::form::submit::validate(&registration)?;
    let record = crate::form::submit::serialize(&registration);
    crate::io::ledger::append_record(&paths.ledger, &record)?;

    info!(ledger = %paths.ledger.display(), "registration submitted");
    println!(
        "Registered {} for {} class(es), {} unit(s).",
        registration.full_name(),
        registration.rows.iter().filter(|r| r.has_class_code()).count(),
        units
    );
    Ok(())
}

fn handle_report(args: ReportArgs) -> Result<(), FormError> {
    let paths = args.paths.paths();
    let counts = crate::report::course_counts(&paths.ledger)?;
    if counts.is_empty() {
        println!("No enrollment data available.");
        return Ok(());
    }

    let report = crate::report::build_report(&counts, chrono::Local::now().date_naive());
    println!("{}", crate::report::format::format_report_table(&report));

    if !args.no_chart {
        println!("{}", crate::plot::render_ascii_bars(&report, args.width));
    }

    if let Some(path) = &args.export {
        crate::io::export::write_report_json(path, &report)?;
        println!("Wrote report JSON: {}", path.display());
    }

    Ok(())
}

fn handle_catalog(args: PathArgs) -> Result<(), FormError> {
    let paths = args.paths();
    let catalog = crate::io::catalog::load_catalog(&paths.catalog)?;
    println!(
        "{}",
        crate::report::format::format_catalog_table(catalog.entries())
    );
    Ok(())
}

/// Rewrite argv so `enroll` defaults to `enroll form`.
///
/// Rules:
/// - `enroll`                      -> `enroll form`
/// - `enroll --ledger x ...`       -> `enroll form --ledger x ...`
/// - `enroll --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("form".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "form" | "submit" | "report" | "catalog");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "form flags".
    if arg1.starts_with('-') {
        argv.insert(1, "form".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
