use std::cmp::Ordering;

use chrono::NaiveTime;
use serde::Serialize;

use super::event_category_key::EventCategoryKey;
use super::event_id::EventId;

/// Intermediate time taken at a named point of the course (a buoy, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitTime {
    pub name: String,
    pub time: Option<String>,
}

/// One crew's result in one race.
///
/// `category_rank` and `delta` are computed by the ranking service; every other
/// field comes from the timing system as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub event: EventId,
    pub event_name: String,
    /// Place as reported by the timing system, across all categories of the race.
    pub event_rank: Option<u32>,
    pub crew: String,
    pub crew_abbrev: String,
    pub category: String,
    /// `HH:MM:SS`, or a non-finish code.
    pub start: Option<String>,
    pub splits: Vec<SplitTime>,
    pub finish: Option<NaiveTime>,
    pub delta: Option<String>,
    pub category_rank: u32,
    /// Elapsed time with penalties applied, or a non-finish code.
    pub adj_time: Option<String>,
}

impl ResultRecord {
    pub fn key(&self) -> EventCategoryKey {
        EventCategoryKey::new(self.event, self.category.clone())
    }

    /// Event, category, reported place then finish time; missing places and
    /// finishes last.
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        self.event
            .cmp(&other.event)
            .then_with(|| self.category.cmp(&other.category))
            .then_with(|| nulls_last(&self.event_rank, &other.event_rank))
            .then_with(|| nulls_last(&self.finish, &other.finish))
    }

    pub fn event_rank_cmp(&self, other: &Self) -> Ordering {
        nulls_last(&self.event_rank, &other.event_rank)
    }
}

fn nulls_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
