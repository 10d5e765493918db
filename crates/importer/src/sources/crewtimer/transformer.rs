use std::io;

use csv::{ReaderBuilder, StringRecord, Trim};
use engine::models::race_time::parse_time_of_day;
use engine::models::{EventId, ResultRecord, Season, SplitTime};
use tracing::{debug, info};

use super::models::{Column, HeaderLayout};
use crate::{ImporterError, Result};

/// Turns a CrewTimer results export into result records.
pub struct CrewTimerTransformer {
    season: Season,
}

impl CrewTimerTransformer {
    pub fn new(season: Season) -> Self {
        Self { season }
    }

    pub fn read<R: io::Read>(&self, input: R) -> Result<Vec<ResultRecord>> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(input);

        let layout = HeaderLayout::from_headers(reader.headers()?)?;
        debug!(
            "CrewTimer export has {} columns, splits: {:?}",
            layout.width(),
            layout.split_names().collect::<Vec<_>>()
        );

        let mut records = Vec::new();
        let mut previous_start: Option<String> = None;

        for row in reader.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            if row.len() != layout.width() {
                return Err(ImporterError::InconsistentRow {
                    line,
                    expected: layout.width(),
                    found: row.len(),
                });
            }

            let mut record = self.transform_row(&layout, &row, line)?;
            // CrewTimer leaves the start blank for disqualified crews
            match &record.start {
                Some(start) => previous_start = Some(start.clone()),
                None => record.start = previous_start.clone(),
            }
            records.push(record);
        }

        info!("Read {} results from CrewTimer export", records.len());
        Ok(records)
    }

    fn transform_row(&self, layout: &HeaderLayout, row: &StringRecord, line: u64) -> Result<ResultRecord> {
        let cell = |column| layout.get(row, column);
        let text = |column| cell(column).unwrap_or_default().to_string();

        let event_num = cell(Column::EventNum).unwrap_or_default();
        let event = EventId::parse(event_num, self.season)
            .map_err(|e| invalid(line, Column::EventNum, event_num, e))?;

        let event_rank = cell(Column::Place)
            .map(|place| parse_place(place).ok_or_else(|| invalid(line, Column::Place, place, "expected a positive integer")))
            .transpose()?;

        let finish = cell(Column::Finish)
            .map(|finish| parse_time_of_day(finish).map_err(|e| invalid(line, Column::Finish, finish, e)))
            .transpose()?;

        let splits = layout
            .splits(row)
            .map(|(name, time)| SplitTime {
                name: name.to_string(),
                time: time.map(str::to_string),
            })
            .collect();

        Ok(ResultRecord {
            event,
            event_name: text(Column::Event),
            event_rank,
            crew: text(Column::Crew),
            crew_abbrev: text(Column::CrewAbbrev),
            category: text(Column::Stroke),
            start: cell(Column::Start).map(str::to_string),
            splits,
            finish,
            // recomputed per category by the ranking
            delta: None,
            category_rank: 0,
            adj_time: cell(Column::AdjTime).map(str::to_string),
        })
    }
}

fn parse_place(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|place| *place > 0)
}

fn invalid(line: u64, column: Column, value: &str, reason: impl ToString) -> ImporterError {
    ImporterError::InvalidField {
        line,
        field: column.as_str(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use engine::models::RaceMarker;

    const HEADER: &str = "EventNum,Event,Place,Crew,CrewAbbrev,Bow,Stroke,Start,Finish,Bouée_A,RawTime,PenaltyCode,AdjTime,Delta";

    fn read(rows: &[&str]) -> Result<Vec<ResultRecord>> {
        let csv = std::iter::once(HEADER).chain(rows.iter().copied()).collect::<Vec<_>>().join("\n");
        CrewTimerTransformer::new(Season(2024)).read(csv.as_bytes())
    }

    #[test]
    fn test_reads_row() {
        let records = read(&[
            "🦭 3,Course 3,1,Club Nautique,CN,,M 2x*,09:10:00,09:17:31.40,09:12:02.1,07:31.4,,07:31.4,",
        ])
        .unwrap();

        let record = &records[0];
        assert_eq!(record.event, EventId::new(Some(RaceMarker::Manatee), 3));
        assert_eq!(record.event_name, "Course 3");
        assert_eq!(record.event_rank, Some(1));
        assert_eq!(record.category, "M 2x*");
        assert_eq!(record.crew_abbrev, "CN");
        assert_eq!(record.start.as_deref(), Some("09:10:00"));
        assert_eq!(record.finish, NaiveTime::from_hms_milli_opt(9, 17, 31, 400));
        assert_eq!(record.adj_time.as_deref(), Some("07:31.4"));
        assert_eq!(record.delta, None);
        assert_eq!(
            record.splits,
            vec![SplitTime {
                name: "Bouée_A".to_string(),
                time: Some("09:12:02.1".to_string())
            }]
        );
    }

    #[test]
    fn test_blank_start_inherits_previous_row() {
        let records = read(&[
            "1,Course 1,1,A,A,,W 1x,10:00:00,10:08:00,,08:00.0,,08:00.0,",
            "1,Course 1,,B,B,,W 1x,,,,,DSQ,DNF,",
        ])
        .unwrap();
        assert_eq!(records[1].start.as_deref(), Some("10:00:00"));
        assert_eq!(records[1].event_rank, None);
        assert_eq!(records[1].finish, None);
        assert_eq!(records[1].adj_time.as_deref(), Some("DNF"));
    }

    #[test]
    fn test_field_count_mismatch_names_line() {
        let err = read(&[
            "1,Course 1,1,A,A,,W 1x,10:00:00,10:08:00,,08:00.0,,08:00.0,",
            "1,Course 1,2,B,B,,W 1x,10:00:00",
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ImporterError::InconsistentRow {
                line: 3,
                expected: 14,
                found: 8
            }
        ));
    }

    #[test]
    fn test_invalid_place() {
        let err = read(&["1,Course 1,0,A,A,,W 1x,10:00:00,10:08:00,,08:00.0,,08:00.0,"]).unwrap_err();
        assert!(matches!(err, ImporterError::InvalidField { line: 2, field: "Place", .. }));
    }

    #[test]
    fn test_marker_from_other_season_is_rejected() {
        let err = read(&["🪸 1,Course 1,1,A,A,,W 1x,10:00:00,10:08:00,,08:00.0,,08:00.0,"]).unwrap_err();
        assert!(matches!(err, ImporterError::InvalidField { field: "EventNum", .. }));
    }
}
