use tracing::debug;

use super::grouping::ResultGroup;
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{EngineError, Result};
use crate::models::{AgeBracket, EventCategoryKey, ResultRecord};

/// Reconciles categories raced apart but reported together:
/// championship crews also appear in their standard category, and masters of
/// an open race are folded into the senior race when there is one.
///
/// Groups left empty by either pass are dropped at the end.
pub fn merge_special_categories(results: &mut ResultGroup, diagnostics: &mut Diagnostics) -> Result<()> {
    fold_championships(results, diagnostics)?;
    fold_open_masters(results, diagnostics)?;
    results.retain(|_, records| !records.is_empty());
    Ok(())
}

/// Copies every championship group into its standard counterpart. The
/// championship group is kept as is, it is reported on its own as well.
pub fn fold_championships(results: &mut ResultGroup, diagnostics: &mut Diagnostics) -> Result<()> {
    let keys: Vec<EventCategoryKey> = results.keys().cloned().collect();

    for key in keys {
        if !key.is_championship()? {
            continue;
        }
        let standard_category = key.standard_category()?;

        // same race marker only, the race number of the standard category differs
        let destinations: Vec<EventCategoryKey> = results
            .keys()
            .filter(|k| k.category == standard_category && k.event.marker == key.event.marker)
            .cloned()
            .collect();

        let destination = match destinations.as_slice() {
            [] => {
                let created = key.with_category(standard_category);
                diagnostics.push(Warning::NoStandardCategory {
                    championship: key.clone(),
                    created: created.clone(),
                });
                results.insert(created.clone(), Vec::new());
                created
            }
            [single] => single.clone(),
            _ => {
                return Err(EngineError::AmbiguousMerge {
                    key,
                    count: destinations.len(),
                });
            }
        };

        let copies: Vec<ResultRecord> = results.get(&key).cloned().unwrap_or_default();
        debug!("Adding {} championship results of {} to {}", copies.len(), key, destination);
        if let Some(records) = results.get_mut(&destination) {
            records.extend(copies);
            records.sort_by(ResultRecord::event_rank_cmp);
        }
    }

    Ok(())
}

/// Moves masters results of open races into the senior race of the same event.
pub fn fold_open_masters(results: &mut ResultGroup, diagnostics: &mut Diagnostics) -> Result<()> {
    let keys: Vec<EventCategoryKey> = results.keys().cloned().collect();

    for key in keys {
        let category = key.parsed_category()?;
        if !category.open || category.class.age != AgeBracket::Master {
            continue;
        }
        let senior = category.to_senior();

        let destination = key.with_category(senior.to_string());
        if !results.contains_key(&destination) {
            diagnostics.push(Warning::MissingSeniorCategory {
                masters: key,
                senior_category: destination.category,
            });
            continue;
        }

        let moved = results.remove(&key).unwrap_or_default();
        debug!("Moving {} masters results of {} to {}", moved.len(), key, destination);
        if let Some(records) = results.get_mut(&destination) {
            records.extend(moved);
            records.sort_by(ResultRecord::event_rank_cmp);
        }
    }

    Ok(())
}
