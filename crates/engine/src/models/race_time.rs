use chrono::{NaiveTime, TimeDelta};

use crate::error::{EngineError, Result};

pub const DID_NOT_START: &str = "DNS";
pub const DID_NOT_FINISH: &str = "DNF";

pub fn is_non_finish_code(value: &str) -> bool {
    value == DID_NOT_START || value == DID_NOT_FINISH
}

/// Parses a wall clock time, `HH:MM[:SS[.fff]]`.
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime> {
    let value = raw.trim();
    ["%H:%M:%S%.f", "%H:%M"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
        .ok_or_else(|| EngineError::InvalidTimeOfDay(raw.to_string()))
}

/// Parses an elapsed time, `[H:]MM:SS[.fff]`. The fraction has 1 to 3 digits
/// and is right padded to milliseconds.
pub fn parse_duration(raw: &str) -> Result<TimeDelta> {
    let invalid = || EngineError::InvalidDuration(raw.to_string());
    let value = raw.trim();

    let (clock, fraction) = match value.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (value, None),
    };

    let millis = match fraction {
        None => 0,
        Some(f) if (1..=3).contains(&f.len()) && all_digits(f) => {
            format!("{f:0<3}").parse::<i64>().map_err(|_| invalid())?
        }
        Some(_) => return Err(invalid()),
    };

    let parts: Vec<&str> = clock.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [m, s] => ("0", *m, *s),
        [h, m, s] if !h.is_empty() && all_digits(h) => (*h, *m, *s),
        _ => return Err(invalid()),
    };
    if minutes.len() != 2 || seconds.len() != 2 || !all_digits(minutes) || !all_digits(seconds) {
        return Err(invalid());
    }

    let hours: i64 = hours.parse().map_err(|_| invalid())?;
    let minutes: i64 = minutes.parse().map_err(|_| invalid())?;
    let seconds: i64 = seconds.parse().map_err(|_| invalid())?;
    if seconds >= 60 || (parts.len() == 3 && minutes >= 60) {
        return Err(invalid());
    }

    Ok(TimeDelta::hours(hours)
        + TimeDelta::minutes(minutes)
        + TimeDelta::seconds(seconds)
        + TimeDelta::milliseconds(millis))
}

/// Formats a gap to the leader as `mm:ss.f` (tenths truncated).
pub fn format_delta(delta: TimeDelta) -> String {
    let sign = if delta < TimeDelta::zero() { "-" } else { "" };
    let total_millis = delta.num_milliseconds().abs();
    let tenths = (total_millis % 1000) / 100;
    let total_seconds = total_millis / 1000;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;
    format!("{sign}{minutes:02}:{seconds:02}.{tenths}")
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}
