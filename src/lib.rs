//! `enroll-desk` library crate.
//!
//! The binary (`enroll`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future GUI/web front-ends)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod form;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod tui;
