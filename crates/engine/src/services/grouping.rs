use std::collections::BTreeMap;

use crate::models::{EventCategoryKey, ResultRecord};

/// Results bucketed by race and category, sorted by key.
pub type ResultGroup = BTreeMap<EventCategoryKey, Vec<ResultRecord>>;

/// Buckets records by (event, category). Each bucket is sorted in natural
/// order even though timing exports are usually already sorted.
pub fn group_results<I>(records: I) -> ResultGroup
where
    I: IntoIterator<Item = ResultRecord>,
{
    let mut results = ResultGroup::new();
    for record in records {
        results.entry(record.key()).or_default().push(record);
    }
    for records in results.values_mut() {
        records.sort_by(ResultRecord::natural_cmp);
    }
    results
}
