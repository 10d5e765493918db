use std::fmt;

use serde::Serialize;

use super::category::Category;
use super::event_id::EventId;
use crate::error::Result;

/// Grouping key: one race of one category. Sorted by event, then category code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EventCategoryKey {
    pub event: EventId,
    pub category: String,
}

impl EventCategoryKey {
    pub fn new(event: EventId, category: impl Into<String>) -> Self {
        Self {
            event,
            category: category.into(),
        }
    }

    pub fn with_category(&self, category: impl Into<String>) -> Self {
        Self::new(self.event, category)
    }

    pub fn parsed_category(&self) -> Result<Category> {
        Category::parse(&self.category)
    }

    pub fn is_championship(&self) -> Result<bool> {
        Ok(self.parsed_category()?.championship)
    }

    /// Display name of the category without the championship marker.
    pub fn standard_category(&self) -> Result<String> {
        Ok(self.parsed_category()?.to_standard().to_string())
    }
}

impl fmt::Display for EventCategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.event, self.category)
    }
}
