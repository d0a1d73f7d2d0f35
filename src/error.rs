use thiserror::Error;

/// Application error kinds.
///
/// Each kind carries a fully formatted message (built at the failure site,
/// with file paths and line numbers where they help) and maps to a stable
/// process exit code so shell callers can tell bad input (2), bad data (3),
/// and runtime failures (4) apart.
#[derive(Debug, Error)]
pub enum FormError {
    /// Malformed or unreadable catalog / course-list source.
    #[error("{0}")]
    Parse(String),

    /// A required registration field was blank at submit time.
    #[error("incomplete form: {0} is required")]
    IncompleteForm(&'static str),

    /// The ledger could not be written.
    #[error("{0}")]
    Persistence(String),

    /// The ledger could not be read for reporting.
    #[error("{0}")]
    Report(String),

    /// Terminal/UI runtime failure.
    #[error("{0}")]
    Terminal(String),
}

impl FormError {
    pub fn exit_code(&self) -> u8 {
        match self {
            FormError::Parse(_) | FormError::IncompleteForm(_) => 2,
            FormError::Persistence(_) | FormError::Report(_) => 3,
            FormError::Terminal(_) => 4,
        }
    }
}
