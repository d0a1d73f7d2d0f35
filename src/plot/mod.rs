//! Terminal chart rendering for the `report` command.

pub mod ascii;

pub use ascii::*;
