use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{EngineError, Result};

const OPEN_PREFIX: &str = "Open ";
const CHAMPIONSHIP_MARKER: char = '*';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeBracket {
    /// The default, standard age category.
    Senior,
    U19,
    Master,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 3] = [Self::Senior, Self::U19, Self::Master];

    // the empty senior prefix matches anything, so it is tried last
    const PARSE_ORDER: [AgeBracket; 3] = [Self::Master, Self::U19, Self::Senior];

    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Senior => "",
            Self::U19 => "U19",
            Self::Master => "M",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SexBracket {
    Men,
    Mixed,
    Women,
}

impl SexBracket {
    /// Ordered by expected speed, decreasing.
    pub const ALL: [SexBracket; 3] = [Self::Men, Self::Mixed, Self::Women];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Men => "M",
            Self::Mixed => "Mix",
            Self::Women => "W",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    Classic,
    Coastal,
}

impl Discipline {
    pub const ALL: [Discipline; 2] = [Self::Classic, Self::Coastal];

    const PARSE_ORDER: [Discipline; 2] = [Self::Coastal, Self::Classic];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Classic => "",
            Self::Coastal => "C",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OarType {
    /// One oar per rower (sweep).
    Single,
    /// Two oars per rower (scull).
    Double,
}

impl OarType {
    pub const ALL: [OarType; 2] = [Self::Single, Self::Double];

    const PARSE_ORDER: [OarType; 2] = [Self::Double, Self::Single];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Single => "",
            Self::Double => "x",
        }
    }
}

/// The part of a category code that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Oar,
    Seats,
    Discipline,
    Sex,
    Age,
}

impl fmt::Display for CategoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Oar => "oar",
            Self::Seats => "seat count",
            Self::Discipline => "rowing discipline",
            Self::Sex => "sex category",
            Self::Age => "age category",
        };
        f.write_str(name)
    }
}

/// Boat class as raced, e.g. `MMix C4x+`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BoatClass {
    pub age: AgeBracket,
    pub sex: SexBracket,
    pub discipline: Discipline,
    pub seats: u8,
    pub oar: OarType,
    pub coxed: bool,
}

impl BoatClass {
    pub fn with_age_bracket(self, age: AgeBracket) -> Self {
        Self { age, ..self }
    }

    /// Fields are consumed right to left: cox marker, oar, seats, discipline,
    /// sex, then age prefix. Nothing may be left over.
    fn parse(raw: &str) -> Result<Self> {
        let mut rest = raw;

        let cox_marker = rest.chars().next_back().filter(|c| *c == '+' || *c == '-');
        if let Some(marker) = cox_marker {
            rest = &rest[..rest.len() - marker.len_utf8()];
        }
        let coxed = cox_marker == Some('+');

        let (oar, remaining) = OarType::PARSE_ORDER
            .iter()
            .find_map(|oar| rest.strip_suffix(oar.code()).map(|r| (*oar, r)))
            .ok_or_else(|| EngineError::category(CategoryField::Oar, raw))?;
        rest = remaining;

        let mut chars = rest.chars();
        let seats = chars
            .next_back()
            .and_then(|c| c.to_digit(10))
            .filter(|d| *d >= 1)
            .ok_or_else(|| EngineError::category(CategoryField::Seats, raw))? as u8;
        rest = chars.as_str();
        if cox_marker.is_none() && seats == 8 {
            return Err(EngineError::MissingCoxMarker(raw.to_string()));
        }

        let (discipline, remaining) = Discipline::PARSE_ORDER
            .iter()
            .find_map(|discipline| {
                rest.strip_suffix(discipline.code())
                    .and_then(|r| r.strip_suffix(' '))
                    .map(|r| (*discipline, r))
            })
            .ok_or_else(|| EngineError::category(CategoryField::Discipline, raw))?;
        rest = remaining;

        let (sex, remaining) = SexBracket::ALL
            .iter()
            .find_map(|sex| rest.strip_suffix(sex.code()).map(|r| (*sex, r)))
            .ok_or_else(|| EngineError::category(CategoryField::Sex, raw))?;
        rest = remaining;

        let (age, remaining) = AgeBracket::PARSE_ORDER
            .iter()
            .find_map(|age| rest.strip_suffix(age.prefix()).map(|r| (*age, r)))
            .ok_or_else(|| EngineError::category(CategoryField::Age, raw))?;
        rest = remaining;

        if !rest.is_empty() {
            return Err(EngineError::TrailingCharacters {
                raw: raw.to_string(),
                leftover: rest.to_string(),
            });
        }

        Ok(Self {
            age,
            sex,
            discipline,
            seats,
            oar,
            coxed,
        })
    }
}

impl fmt::Display for BoatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {}{}{}",
            self.age.prefix(),
            self.sex.code(),
            self.discipline.code(),
            self.seats,
            self.oar.code()
        )?;
        if self.coxed {
            f.write_str("+")
        } else if self.seats == 8 {
            f.write_str("-")
        } else {
            Ok(())
        }
    }
}

/// A race category: a boat class plus the open-race and championship flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Category {
    pub open: bool,
    pub class: BoatClass,
    pub championship: bool,
}

impl Category {
    pub fn parse(raw: &str) -> Result<Self> {
        let (open, rest) = match raw.strip_prefix(OPEN_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let (championship, rest) = match rest.strip_suffix(CHAMPIONSHIP_MARKER) {
            Some(rest) => (true, rest),
            None => (false, rest),
        };
        let class = BoatClass::parse(rest).map_err(|e| with_full_code(e, raw))?;
        Ok(Self {
            open,
            class,
            championship,
        })
    }

    pub fn with_age_bracket(self, age: AgeBracket) -> Self {
        Self {
            class: self.class.with_age_bracket(age),
            ..self
        }
    }

    /// Same category outside of the championship.
    pub fn to_standard(self) -> Self {
        Self {
            championship: false,
            ..self
        }
    }

    /// Masters of an open race are ranked with the seniors.
    pub fn to_senior(self) -> Self {
        self.with_age_bracket(AgeBracket::Senior)
    }
}

// errors should name the code as written, not the inner boat class slice
fn with_full_code(error: EngineError, raw: &str) -> EngineError {
    match error {
        EngineError::CategoryField { field, .. } => EngineError::category(field, raw),
        EngineError::MissingCoxMarker(_) => EngineError::MissingCoxMarker(raw.to_string()),
        EngineError::TrailingCharacters { leftover, .. } => EngineError::TrailingCharacters {
            raw: raw.to_string(),
            leftover,
        },
        other => other,
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.open {
            f.write_str(OPEN_PREFIX)?;
        }
        write!(f, "{}", self.class)?;
        if self.championship {
            write!(f, "{}", CHAMPIONSHIP_MARKER)?;
        }
        Ok(())
    }
}

impl FromStr for Category {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Category {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}
