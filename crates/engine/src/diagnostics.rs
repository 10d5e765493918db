use std::fmt;

use chrono::NaiveTime;
use tracing::{info, warn};

use crate::models::EventCategoryKey;

/// Non-fatal condition found while processing results. Never changes the
/// outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Recorded finish differs from start + adjusted time.
    FinishMismatch {
        key: EventCategoryKey,
        crew: String,
        recorded: NaiveTime,
        derived: NaiveTime,
    },
    /// A championship category had no standard counterpart yet, one was created.
    NoStandardCategory {
        championship: EventCategoryKey,
        created: EventCategoryKey,
    },
    /// Masters of an open race stay on their own: no senior race was run.
    MissingSeniorCategory {
        masters: EventCategoryKey,
        senior_category: String,
    },
}

impl Warning {
    pub fn is_consistency_issue(&self) -> bool {
        matches!(self, Self::FinishMismatch { .. } | Self::NoStandardCategory { .. })
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FinishMismatch {
                key,
                crew,
                recorded,
                derived,
            } => write!(
                f,
                "Finish time mismatch for '{}' in {}: recorded {}, start + adjusted time gives {}",
                crew, key, recorded, derived
            ),
            Self::NoStandardCategory {
                championship,
                created,
            } => write!(
                f,
                "No standard category found for {}, created {}",
                championship, created
            ),
            Self::MissingSeniorCategory {
                masters,
                senior_category,
            } => write!(
                f,
                "No '{}' race found to merge {} into, kept on its own",
                senior_category, masters
            ),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    pub warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Records and logs a warning right away.
    pub fn push(&mut self, warning: Warning) {
        if warning.is_consistency_issue() {
            warn!("{}", warning);
        } else {
            info!("{}", warning);
        }
        self.warnings.push(warning);
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventId;

    fn key(category: &str) -> EventCategoryKey {
        EventCategoryKey::new(EventId::new(None, 4), category)
    }

    #[test]
    fn test_consistency_classification() {
        let mismatch = Warning::FinishMismatch {
            key: key("M 1x"),
            crew: "a".to_string(),
            recorded: NaiveTime::from_hms_opt(9, 8, 0).unwrap(),
            derived: NaiveTime::from_hms_opt(9, 8, 10).unwrap(),
        };
        let no_standard = Warning::NoStandardCategory {
            championship: key("M 1x*"),
            created: key("M 1x"),
        };
        let missing_senior = Warning::MissingSeniorCategory {
            masters: key("Open MM 2x"),
            senior_category: "Open M 2x".to_string(),
        };

        assert!(mismatch.is_consistency_issue());
        assert!(no_standard.is_consistency_issue());
        assert!(!missing_senior.is_consistency_issue());

        let mut diagnostics = Diagnostics::default();
        diagnostics.push(no_standard);
        diagnostics.push(missing_senior);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(
            diagnostics.warnings[0].to_string(),
            "No standard category found for 4 / M 1x*, created 4 / M 1x"
        );
    }
}
