use chrono::NaiveTime;
use tracing::debug;

use super::grouping::ResultGroup;
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{EngineError, Result};
use crate::models::race_time::{format_delta, is_non_finish_code, parse_duration, parse_time_of_day};
use crate::models::{EventCategoryKey, ResultRecord};

/// Computes category rank and gap to the leader of every group.
pub fn rank_results(results: &mut ResultGroup, diagnostics: &mut Diagnostics) -> Result<()> {
    for (key, records) in results.iter_mut() {
        rank_category(key, records, diagnostics)?;
    }
    Ok(())
}

/// Single pass over a group in its stored order.
///
/// Crews without a finish, and crews finishing in the same time as the previous
/// finisher, share the rank of the previous crew. Any other crew is ranked at
/// its position in the group.
pub fn rank_category(
    key: &EventCategoryKey,
    records: &mut [ResultRecord],
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    let mut position = 0u32;
    let mut leader: Option<NaiveTime> = None;
    let mut previous_finish: Option<NaiveTime> = None;
    let mut previous_rank = 0u32;

    for record in records.iter_mut() {
        position += 1;
        let finish = effective_finish(key, record, diagnostics)?;

        record.delta = match (leader, finish) {
            (None, Some(finish)) => {
                leader = Some(finish);
                None
            }
            (Some(leader), Some(finish)) => Some(format_delta(finish - leader)),
            (_, None) => None,
        };

        let rank = match finish {
            Some(finish) if previous_finish != Some(finish) => position,
            _ => previous_rank,
        };
        record.category_rank = rank;
        previous_rank = rank;
        if finish.is_some() {
            previous_finish = finish;
        }
    }

    debug!("Ranked {} results of {}", records.len(), key);
    Ok(())
}

/// Start time plus adjusted time when both are known, the recorded finish
/// otherwise.
pub fn effective_finish(
    key: &EventCategoryKey,
    record: &ResultRecord,
    diagnostics: &mut Diagnostics,
) -> Result<Option<NaiveTime>> {
    let derived = derived_finish(record)?;

    if let (Some(recorded), Some(derived)) = (record.finish, derived)
        && recorded != derived
    {
        diagnostics.push(Warning::FinishMismatch {
            key: key.clone(),
            crew: record.crew.clone(),
            recorded,
            derived,
        });
    }

    Ok(derived.or(record.finish))
}

/// Start time plus adjusted time, when both are known.
pub fn derived_finish(record: &ResultRecord) -> Result<Option<NaiveTime>> {
    match (record.start.as_deref(), record.adj_time.as_deref()) {
        (Some(start), Some(adj_time)) if !is_non_finish_code(start) && !is_non_finish_code(adj_time) => {
            let (finish, overflow) =
                parse_time_of_day(start)?.overflowing_add_signed(parse_duration(adj_time)?);
            if overflow != 0 {
                return Err(EngineError::FinishPastMidnight {
                    start: start.to_string(),
                    adj_time: adj_time.to_string(),
                });
            }
            Ok(Some(finish))
        }
        _ => Ok(None),
    }
}

/// Whether the crew has a finish to be ranked on.
pub fn has_finish(record: &ResultRecord) -> Result<bool> {
    Ok(record.finish.is_some() || derived_finish(record)?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::result_record::test_support::record;
    use crate::services::grouping::group_results;

    fn ranked(records: Vec<ResultRecord>) -> (Vec<(u32, Option<String>)>, Diagnostics) {
        let mut results = group_results(records);
        let mut diagnostics = Diagnostics::default();
        rank_results(&mut results, &mut diagnostics).unwrap();
        let ranks = results
            .values()
            .flatten()
            .map(|r| (r.category_rank, r.delta.clone()))
            .collect();
        (ranks, diagnostics)
    }

    #[test]
    fn test_leader_and_delta() {
        let (ranks, diagnostics) = ranked(vec![
            record(1, "M 1x", "a", Some(1), Some("07:30.0")),
            record(1, "M 1x", "b", Some(2), Some("07:45.0")),
        ]);
        assert_eq!(ranks, vec![(1, None), (2, Some("00:15.0".to_string()))]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_ties_share_rank_and_next_gets_position() {
        let (ranks, _) = ranked(vec![
            record(1, "W 2x", "a", Some(1), Some("08:00.0")),
            record(1, "W 2x", "b", Some(2), Some("08:10.5")),
            record(1, "W 2x", "c", Some(3), Some("08:10.5")),
            record(1, "W 2x", "d", Some(4), Some("08:20.0")),
        ]);
        let only_ranks: Vec<u32> = ranks.iter().map(|(rank, _)| *rank).collect();
        assert_eq!(only_ranks, vec![1, 2, 2, 4]);
        assert_eq!(ranks[2].1.as_deref(), Some("00:10.5"));
    }

    #[test]
    fn test_non_finishers_share_previous_rank_without_delta() {
        let (ranks, _) = ranked(vec![
            record(1, "M 4x", "a", Some(1), Some("06:00.0")),
            record(1, "M 4x", "b", Some(2), Some("06:30.0")),
            record(1, "M 4x", "dnf", None, Some("DNF")),
            record(1, "M 4x", "unknown", None, None),
        ]);
        assert_eq!(
            ranks,
            vec![
                (1, None),
                (2, Some("00:30.0".to_string())),
                (2, None),
                (2, None)
            ]
        );
    }

    #[test]
    fn test_group_without_finisher_stays_unranked() {
        let (ranks, _) = ranked(vec![
            record(1, "M 1x", "a", None, Some("DNS")),
            record(1, "M 1x", "b", None, Some("DNF")),
        ]);
        assert_eq!(ranks, vec![(0, None), (0, None)]);
    }

    #[test]
    fn test_recorded_finish_used_without_adjusted_time() {
        let mut a = record(1, "W 1x", "a", Some(1), None);
        a.finish = NaiveTime::from_hms_opt(9, 8, 0);
        let mut b = record(1, "W 1x", "b", Some(2), None);
        b.finish = NaiveTime::from_hms_milli_opt(9, 8, 4, 250);
        let (ranks, diagnostics) = ranked(vec![a, b]);
        assert_eq!(ranks, vec![(1, None), (2, Some("00:04.2".to_string()))]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_adjusted_time_wins_over_recorded_finish() {
        let mut penalized = record(1, "W 1x", "a", Some(1), Some("08:10.0"));
        penalized.finish = NaiveTime::from_hms_opt(9, 8, 0);
        let (ranks, diagnostics) = ranked(vec![penalized]);
        assert_eq!(ranks, vec![(1, None)]);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.warnings[0].is_consistency_issue());
    }

    #[test]
    fn test_consistent_finish_raises_no_warning() {
        let mut a = record(1, "W 1x", "a", Some(1), Some("08:00.0"));
        a.finish = NaiveTime::from_hms_opt(9, 8, 0);
        let (_, diagnostics) = ranked(vec![a]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_finish_at_midnight_is_ranked() {
        let mut a = record(1, "M 1x", "a", Some(1), None);
        a.finish = Some(NaiveTime::MIN);
        let mut b = record(1, "M 1x", "b", Some(2), None);
        b.finish = NaiveTime::from_hms_opt(0, 0, 3);
        let (ranks, _) = ranked(vec![a, b]);
        assert_eq!(ranks, vec![(1, None), (2, Some("00:03.0".to_string()))]);
    }

    #[test]
    fn test_finish_past_midnight_aborts() {
        let mut late = record(1, "M 1x", "late", Some(1), Some("07:30.0"));
        late.start = Some("23:55:00".to_string());
        let mut results = group_results(vec![late]);
        let mut diagnostics = Diagnostics::default();
        let err = rank_results(&mut results, &mut diagnostics).unwrap_err();
        assert!(matches!(err, EngineError::FinishPastMidnight { .. }));
    }

    #[test]
    fn test_invalid_adjusted_time_aborts() {
        let mut results = group_results(vec![record(1, "M 1x", "a", Some(1), Some("7 min"))]);
        let mut diagnostics = Diagnostics::default();
        assert!(rank_results(&mut results, &mut diagnostics).is_err());
    }

    #[test]
    fn test_not_started_crew_uses_recorded_finish() {
        let mut a = record(1, "M 1x", "a", Some(1), Some("07:30.0"));
        a.start = Some("DNS".to_string());
        a.finish = NaiveTime::from_hms_opt(9, 7, 30);
        let (ranks, _) = ranked(vec![a]);
        assert_eq!(ranks, vec![(1, None)]);
    }
}
