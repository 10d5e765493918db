pub mod diagnostics;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;

pub use diagnostics::{Diagnostics, Warning};
pub use error::{EngineError, Result};
pub use services::{ProcessedResults, process_results};
