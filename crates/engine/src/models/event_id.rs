use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{EngineError, Result};

const VARIATION_SELECTOR: char = '\u{fe0f}';

/// Racing season. Race markers are only meaningful within one season, since
/// the same emoji may be reused from one year to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Season(pub u16);

impl Season {
    pub const CURRENT: Season = Season(2024);
}

impl Default for Season {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl FromStr for Season {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(Season)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Emoji race markers. Declaration order is the running order and drives
/// event ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RaceMarker {
    // 2023
    Anemone,
    HermitCrab,
    Squid,
    SeaBream,
    Starfish,
    StarfishB,
    // 2024
    Manatee,
    Crayfish,
    Penguin,
    Anchovy,
    Narwhal,
    NarwhalB,
}

impl RaceMarker {
    pub const ALL: [RaceMarker; 12] = [
        Self::Anemone,
        Self::HermitCrab,
        Self::Squid,
        Self::SeaBream,
        Self::Starfish,
        Self::StarfishB,
        Self::Manatee,
        Self::Crayfish,
        Self::Penguin,
        Self::Anchovy,
        Self::Narwhal,
        Self::NarwhalB,
    ];

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Anemone => "🪸",
            Self::HermitCrab => "🐚",
            Self::Squid => "🦑",
            Self::SeaBream => "🐟",
            Self::Starfish => "\u{2b50}",
            Self::StarfishB => "\u{2b50}\u{2b50}",
            Self::Manatee => "🦭",
            Self::Crayfish => "🦞",
            Self::Penguin => "🐧",
            Self::Anchovy => "🐟",
            Self::Narwhal => "🦄",
            Self::NarwhalB => "🦄🦄",
        }
    }

    pub fn season(&self) -> Season {
        match self {
            Self::Anemone
            | Self::HermitCrab
            | Self::Squid
            | Self::SeaBream
            | Self::Starfish
            | Self::StarfishB => Season(2023),
            Self::Manatee
            | Self::Crayfish
            | Self::Penguin
            | Self::Anchovy
            | Self::Narwhal
            | Self::NarwhalB => Season(2024),
        }
    }

    pub fn from_emoji(emoji: &str, season: Season) -> Result<Self> {
        let normalized = normalize_marker(emoji);
        Self::ALL
            .iter()
            .copied()
            .filter(|marker| marker.season() == season)
            .find(|marker| marker.emoji() == normalized)
            .ok_or_else(|| EngineError::UnknownRaceMarker {
                marker: emoji.to_string(),
                season: season.0,
            })
    }
}

/// The same star is found both with and without the emoji variation selector.
pub fn normalize_marker(raw: &str) -> String {
    raw.trim().chars().filter(|c| *c != VARIATION_SELECTOR).collect()
}

/// Race identifier. Unmarked ids sort before marked ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EventId {
    pub marker: Option<RaceMarker>,
    pub id: u32,
}

impl EventId {
    pub fn new(marker: Option<RaceMarker>, id: u32) -> Self {
        Self { marker, id }
    }

    /// Accepts `"12"` or `"<marker> 12"`.
    pub fn parse(raw: &str, season: Season) -> Result<Self> {
        let raw_trimmed = raw.trim();
        if let Some(id) = parse_number(raw_trimmed) {
            return Ok(Self::new(None, id));
        }
        let (marker, number) = raw_trimmed
            .rsplit_once(' ')
            .ok_or_else(|| EngineError::InvalidEventId(raw.to_string()))?;
        let id = parse_number(number).ok_or_else(|| EngineError::InvalidEventId(raw.to_string()))?;
        if marker.trim().is_empty() {
            return Err(EngineError::InvalidEventId(raw.to_string()));
        }
        let marker = RaceMarker::from_emoji(marker, season)?;
        Ok(Self::new(Some(marker), id))
    }
}

fn parse_number(s: &str) -> Option<u32> {
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(marker) = self.marker {
            write!(f, "{} ", marker.emoji())?;
        }
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unmarked() {
        let id = EventId::parse("12", Season(2022)).unwrap();
        assert_eq!(id, EventId::new(None, 12));
        assert_eq!(id.to_string(), "12");
    }

    #[test]
    fn test_parse_marker_is_season_scoped() {
        let id_2023 = EventId::parse("🐟 3", Season(2023)).unwrap();
        let id_2024 = EventId::parse("🐟 3", Season(2024)).unwrap();
        assert_eq!(id_2023.marker, Some(RaceMarker::SeaBream));
        assert_eq!(id_2024.marker, Some(RaceMarker::Anchovy));
        assert_eq!(id_2024.to_string(), "🐟 3");

        let err = EventId::parse("🦭 1", Season(2023)).unwrap_err();
        assert!(matches!(err, EngineError::UnknownRaceMarker { season: 2023, .. }));
    }

    #[test]
    fn test_parse_star_with_variation_selector() {
        let plain = EventId::parse("\u{2b50} 4", Season(2023)).unwrap();
        let selected = EventId::parse("\u{2b50}\u{fe0f} 4", Season(2023)).unwrap();
        assert_eq!(plain, selected);
        assert_eq!(
            EventId::parse("\u{2b50}\u{fe0f}\u{2b50}\u{fe0f} 4", Season(2023))
                .unwrap()
                .marker,
            Some(RaceMarker::StarfishB)
        );
    }

    #[test]
    fn test_parse_invalid() {
        for raw in ["", "abc", "🦭", "🦭 x", " 12a"] {
            assert!(EventId::parse(raw, Season(2024)).is_err(), "{raw:?} should fail");
        }
    }

    #[test]
    fn test_ordering_by_marker_precedence_then_id() {
        let season = Season(2024);
        let mut ids: Vec<EventId> = ["🦄 1", "🦭 7", "3", "🦭 2", "🐧 1"]
            .iter()
            .map(|raw| EventId::parse(raw, season).unwrap())
            .collect();
        ids.sort();
        let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["3", "🦭 2", "🦭 7", "🐧 1", "🦄 1"]);
    }
}
