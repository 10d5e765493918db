use csv::StringRecord;

use crate::{ImporterError, Result};

/// Columns of a CrewTimer results export that carry a meaning of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    EventNum,
    Event,
    Place,
    Crew,
    CrewAbbrev,
    Bow,
    Stroke,
    Start,
    Finish,
    RawTime,
    PenaltyCode,
    AdjTime,
    Delta,
}

impl Column {
    pub const ALL: [Column; 13] = [
        Column::EventNum,
        Column::Event,
        Column::Place,
        Column::Crew,
        Column::CrewAbbrev,
        Column::Bow,
        Column::Stroke,
        Column::Start,
        Column::Finish,
        Column::RawTime,
        Column::PenaltyCode,
        Column::AdjTime,
        Column::Delta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EventNum => "EventNum",
            Self::Event => "Event",
            Self::Place => "Place",
            Self::Crew => "Crew",
            Self::CrewAbbrev => "CrewAbbrev",
            Self::Bow => "Bow",
            // CrewTimer has no category field, clubs enter it as the stroke name
            Self::Stroke => "Stroke",
            Self::Start => "Start",
            Self::Finish => "Finish",
            Self::RawTime => "RawTime",
            Self::PenaltyCode => "PenaltyCode",
            Self::AdjTime => "AdjTime",
            Self::Delta => "Delta",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, Self::Bow | Self::RawTime | Self::PenaltyCode)
    }

    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == header)
    }
}

/// Where each column sits in the export. Unknown headers are split times.
#[derive(Debug, Clone)]
pub struct HeaderLayout {
    positions: Vec<(Column, usize)>,
    splits: Vec<(String, usize)>,
    width: usize,
}

impl HeaderLayout {
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        let mut positions = Vec::new();
        let mut splits = Vec::new();

        for (index, header) in headers.iter().enumerate() {
            let header = header.trim();
            match Column::from_header(header) {
                Some(column) => positions.push((column, index)),
                None if header.is_empty() => {}
                None => splits.push((header.to_string(), index)),
            }
        }

        if let Some(missing) = Column::ALL
            .iter()
            .filter(|c| c.is_required())
            .find(|c| !positions.iter().any(|(p, _)| p == *c))
        {
            return Err(ImporterError::MissingColumn(missing.as_str()));
        }

        Ok(Self {
            positions,
            splits,
            width: headers.len(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn split_names(&self) -> impl Iterator<Item = &str> {
        self.splits.iter().map(|(name, _)| name.as_str())
    }

    /// Cell of `column` in `record`, `None` when absent or empty.
    pub fn get<'r>(&self, record: &'r StringRecord, column: Column) -> Option<&'r str> {
        let index = self
            .positions
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, i)| *i)?;
        non_empty(record.get(index))
    }

    pub fn splits<'a, 'r>(
        &'a self,
        record: &'r StringRecord,
    ) -> impl Iterator<Item = (&'a str, Option<&'r str>)> {
        self.splits
            .iter()
            .map(move |(name, index)| (name.as_str(), non_empty(record.get(*index))))
    }
}

fn non_empty(cell: Option<&str>) -> Option<&str> {
    cell.map(str::trim).filter(|s| !s.is_empty())
}
