use tracing::info;

use super::category_merge::merge_special_categories;
use super::grouping::{ResultGroup, group_results};
use super::ranking::rank_results;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::models::ResultRecord;

/// Ranked results of a run, with the warnings raised along the way.
#[derive(Debug, Clone)]
pub struct ProcessedResults {
    pub results: ResultGroup,
    pub diagnostics: Diagnostics,
}

/// Groups, merges special categories, then ranks.
pub fn process_results<I>(records: I) -> Result<ProcessedResults>
where
    I: IntoIterator<Item = ResultRecord>,
{
    let mut diagnostics = Diagnostics::default();

    let mut results = group_results(records);
    info!("Grouped results into {} categories", results.len());

    merge_special_categories(&mut results, &mut diagnostics)?;
    info!("{} categories after merging special categories", results.len());

    rank_results(&mut results, &mut diagnostics)?;

    Ok(ProcessedResults {
        results,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::result_record::test_support::record;
    use crate::models::{EventCategoryKey, EventId};

    #[test]
    fn test_championship_crew_ranked_in_both_categories() {
        let processed = process_results(vec![
            record(1, "W 1x", "a", Some(1), Some("08:00.0")),
            record(1, "W 1x*", "b", Some(2), Some("08:05.0")),
            record(1, "W 1x", "c", Some(3), Some("08:09.0")),
        ])
        .unwrap();

        let standard = &processed.results[&EventCategoryKey::new(EventId::new(None, 1), "W 1x")];
        let ranks: Vec<(&str, u32)> = standard
            .iter()
            .map(|r| (r.crew.as_str(), r.category_rank))
            .collect();
        assert_eq!(ranks, vec![("a", 1), ("b", 2), ("c", 3)]);

        let championship = &processed.results[&EventCategoryKey::new(EventId::new(None, 1), "W 1x*")];
        assert_eq!(championship[0].category_rank, 1);
        assert_eq!(championship[0].delta, None);
        assert!(processed.diagnostics.is_empty());
    }
}
