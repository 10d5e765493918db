use engine::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImporterError>;

#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("Failed to read input: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Results processing error: {0}")]
    EngineError(#[from] EngineError),

    #[error("Missing column '{0}' in CSV header")]
    MissingColumn(&'static str),

    #[error("Inconsistent number of fields in CSV line {line}: expected {expected}, found {found}")]
    InconsistentRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Invalid {field} '{value}' in CSV line {line}: {reason}")]
    InvalidField {
        line: u64,
        field: &'static str,
        value: String,
        reason: String,
    },
}
