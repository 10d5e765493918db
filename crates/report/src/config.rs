use anyhow::{Context, Result};
use engine::models::Season;

#[derive(Debug, Clone)]
pub struct Config {
    pub season: Season,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let season = match std::env::var("LSM_SEASON") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("LSM_SEASON must be a year, got '{value}'"))?,
            Err(_) => Season::default(),
        };
        Ok(Self { season })
    }
}
