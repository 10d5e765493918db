use serde::Serialize;

use crate::error::Result;
use crate::models::{EventCategoryKey, ResultRecord, SplitTime};
use crate::services::grouping::ResultGroup;
use crate::services::medals::{Medal, medal_count, medal_for};
use crate::services::ranking::has_finish;

/// Subset of the ranked results printed together. Views never overlap except
/// for `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultView {
    All,
    Championship,
    Standard,
}

impl ResultView {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Championship => "championship",
            Self::Standard => "standard",
        }
    }

    pub fn includes(&self, key: &EventCategoryKey) -> Result<bool> {
        Ok(match self {
            Self::All => true,
            Self::Championship => key.is_championship()?,
            Self::Standard => !key.is_championship()?,
        })
    }

    pub fn select(&self, results: &ResultGroup) -> Result<ResultGroup> {
        let mut selected = ResultGroup::new();
        for (key, records) in results {
            if self.includes(key)? {
                selected.insert(key.clone(), records.clone());
            }
        }
        Ok(selected)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewReport {
    pub view: ResultView,
    pub categories: Vec<CategoryReport>,
}

/// One race of one category, ready to print.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    pub event: String,
    pub event_name: String,
    /// Category name without the championship marker.
    pub category: String,
    pub championship: bool,
    pub start: Option<String>,
    pub medal_count: usize,
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub rank: u32,
    pub medal: Option<Medal>,
    pub crew_abbrev: String,
    pub crew: String,
    pub adj_time: Option<String>,
    pub delta: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub splits: Vec<SplitTime>,
}

impl ReportRow {
    pub fn medal_symbol(&self) -> &'static str {
        self.medal.as_ref().map(Medal::symbol).unwrap_or("")
    }
}

pub fn build_view_report(view: ResultView, results: &ResultGroup) -> Result<ViewReport> {
    let mut categories = Vec::new();
    for (key, records) in view.select(results)? {
        categories.push(build_category_report(&key, &records)?);
    }
    Ok(ViewReport { view, categories })
}

pub fn build_category_report(key: &EventCategoryKey, records: &[ResultRecord]) -> Result<CategoryReport> {
    let category = key.parsed_category()?;
    let medals = medal_count(records.len(), category.championship);

    // crews tied past the last medal, and crews without a finish, go without
    let mut awarded = 0;
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let medal = if awarded < medals && has_finish(record)? {
            medal_for(record.category_rank, medals)
        } else {
            None
        };
        if medal.is_some() {
            awarded += 1;
        }
        rows.push(ReportRow {
            rank: record.category_rank,
            medal,
            crew_abbrev: record.crew_abbrev.clone(),
            crew: record.crew.clone(),
            adj_time: record.adj_time.clone(),
            delta: record.delta.clone(),
            splits: record.splits.clone(),
        });
    }

    Ok(CategoryReport {
        event: key.event.to_string(),
        event_name: records.first().map(|r| r.event_name.clone()).unwrap_or_default(),
        category: category.to_standard().to_string(),
        championship: category.championship,
        start: records.first().and_then(|r| r.start.clone()),
        medal_count: medals,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::process_results;
    use crate::models::result_record::test_support::record;

    fn processed() -> ResultGroup {
        process_results(vec![
            record(1, "M 1x", "a", Some(1), Some("07:30.0")),
            record(1, "M 1x", "b", Some(2), Some("07:45.0")),
            record(2, "W 2x*", "c", Some(1), Some("08:00.0")),
            record(2, "W 2x*", "d", Some(2), Some("08:03.0")),
        ])
        .unwrap()
        .results
    }

    #[test]
    fn test_views_partition_results() {
        let results = processed();
        let all = ResultView::All.select(&results).unwrap();
        let championship = ResultView::Championship.select(&results).unwrap();
        let standard = ResultView::Standard.select(&results).unwrap();

        assert_eq!(all.len(), 3);
        assert_eq!(championship.len(), 1);
        assert_eq!(standard.len(), 2);
        assert!(championship.keys().all(|k| !standard.contains_key(k)));
    }

    #[test]
    fn test_medals_follow_group_policy() {
        let results = processed();
        let report = build_view_report(ResultView::All, &results).unwrap();

        let standard = &report.categories[0];
        assert_eq!(standard.category, "M 1x");
        assert_eq!(standard.medal_count, 1);
        let symbols: Vec<&str> = standard.rows.iter().map(ReportRow::medal_symbol).collect();
        assert_eq!(symbols, vec!["🥇", ""]);

        let championship = report
            .categories
            .iter()
            .find(|c| c.championship)
            .unwrap();
        assert_eq!(championship.category, "W 2x");
        assert_eq!(championship.medal_count, 2);
        let medals: Vec<Option<Medal>> = championship.rows.iter().map(|r| r.medal).collect();
        assert_eq!(medals, vec![Some(Medal::Gold), Some(Medal::Silver)]);
        assert_eq!(championship.start.as_deref(), Some("09:00:00"));
    }

    fn medals_of(records: Vec<ResultRecord>) -> (usize, Vec<(String, &'static str)>) {
        let results = process_results(records).unwrap().results;
        let report = build_view_report(ResultView::All, &results).unwrap();
        let category = &report.categories[0];
        let rows = category
            .rows
            .iter()
            .map(|r| (r.crew.clone(), r.medal_symbol()))
            .collect();
        (category.medal_count, rows)
    }

    #[test]
    fn test_non_finishers_get_no_medal() {
        let mut dns = record(1, "M 1x", "dns", None, Some("DNS"));
        dns.start = Some("DNS".to_string());
        let (count, rows) = medals_of(vec![
            record(1, "M 1x", "a", Some(1), Some("07:30.0")),
            record(1, "M 1x", "b", Some(2), Some("07:41.5")),
            record(1, "M 1x", "dnf", None, Some("DNF")),
            dns,
        ]);
        assert_eq!(count, 3);
        assert_eq!(
            rows,
            vec![
                ("a".to_string(), "🥇"),
                ("b".to_string(), "🥈"),
                ("dnf".to_string(), ""),
                ("dns".to_string(), ""),
            ]
        );
    }

    #[test]
    fn test_tie_on_last_medal_does_not_exceed_count() {
        let (count, rows) = medals_of(vec![
            record(1, "W 1x", "a", Some(1), Some("08:00.0")),
            record(1, "W 1x", "b", Some(2), Some("08:05.0")),
            record(1, "W 1x", "c", Some(3), Some("08:09.0")),
            record(1, "W 1x", "d", Some(4), Some("08:09.0")),
        ]);
        assert_eq!(count, 3);
        let symbols: Vec<&str> = rows.iter().map(|(_, m)| *m).collect();
        assert_eq!(symbols, vec!["🥇", "🥈", "🥉", ""]);
    }

    #[test]
    fn test_tie_below_limit_shares_medal() {
        let (_, rows) = medals_of(vec![
            record(1, "W 2x", "a", Some(1), Some("08:00.0")),
            record(1, "W 2x", "b", Some(2), Some("08:00.0")),
            record(1, "W 2x", "c", Some(3), Some("08:09.0")),
            record(1, "W 2x", "d", Some(4), Some("08:20.0")),
        ]);
        let symbols: Vec<&str> = rows.iter().map(|(_, m)| *m).collect();
        assert_eq!(symbols, vec!["🥇", "🥇", "🥉", ""]);
    }
}
