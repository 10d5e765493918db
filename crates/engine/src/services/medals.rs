use serde::Serialize;

const PODIUM_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Gold => "🥇",
            Self::Silver => "🥈",
            Self::Bronze => "🥉",
        }
    }
}

/// Number of top ranks getting a medal in a group of `participants` crews.
///
/// Championships award the full podium when there are enough crews. Other
/// races never award the last crew, so a field of two gets a single medal.
pub fn medal_count(participants: usize, championship: bool) -> usize {
    if championship {
        participants.min(PODIUM_SIZE)
    } else {
        participants.saturating_sub(1).min(PODIUM_SIZE)
    }
}

pub fn medal_for(rank: u32, medal_count: usize) -> Option<Medal> {
    if rank as usize > medal_count {
        return None;
    }
    match rank {
        1 => Some(Medal::Gold),
        2 => Some(Medal::Silver),
        3 => Some(Medal::Bronze),
        _ => None,
    }
}
