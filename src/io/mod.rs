//! Input/output helpers.
//!
//! - reference catalog + course-list loading (`catalog`)
//! - ledger append/read (`ledger`)
//! - report JSON export (`export`)

pub mod catalog;
pub mod export;
pub mod ledger;

pub use catalog::*;
pub use export::*;
pub use ledger::*;
