use thiserror::Error;

use crate::models::{CategoryField, EventCategoryKey};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unable to parse {field} code for '{raw}'")]
    CategoryField { field: CategoryField, raw: String },

    #[error("Coxswain must be specified for eights in '{0}'")]
    MissingCoxMarker(String),

    #[error("Unable to parse fully '{raw}': '{leftover}' left over")]
    TrailingCharacters { raw: String, leftover: String },

    #[error("Invalid duration '{0}', expected [H:]MM:SS[.fff]")]
    InvalidDuration(String),

    #[error("Invalid time of day '{0}'")]
    InvalidTimeOfDay(String),

    #[error("Start {start} plus adjusted time {adj_time} finishes past midnight")]
    FinishPastMidnight { start: String, adj_time: String },

    #[error("Failed to detect pattern for event id '{0}'")]
    InvalidEventId(String),

    #[error("'{marker}' is not a known race marker for season {season}")]
    UnknownRaceMarker { marker: String, season: u16 },

    #[error("Found {count} standard categories while expecting only one for {key}")]
    AmbiguousMerge { key: EventCategoryKey, count: usize },
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    pub(crate) fn category(field: CategoryField, raw: &str) -> Self {
        Self::CategoryField {
            field,
            raw: raw.to_string(),
        }
    }

    /// Malformed input values (category, duration, time or event id), as
    /// opposed to a structurally inconsistent grouping.
    pub fn is_grammar_error(&self) -> bool {
        !matches!(self, Self::AmbiguousMerge { .. })
    }
}
