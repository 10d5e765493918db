pub mod config;
pub mod error;
pub mod printer;

pub use config::Config;
pub use error::{ReportError, Result};
pub use printer::{PrintMode, ResultPrinter, render};
