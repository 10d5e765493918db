use engine::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write results: {0}")]
    Io(#[from] std::io::Error),

    #[error("Results cannot be reported: {0}")]
    Engine(#[from] EngineError),
}
