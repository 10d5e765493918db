mod models;
mod transformer;

pub use models::{Column, HeaderLayout};
pub use transformer::CrewTimerTransformer;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use engine::models::ResultRecord;
use tracing::info;

use crate::{ImportContext, Result, traits::ResultSource};

/// Results exported from CrewTimer as CSV, one row per crew.
pub struct CrewTimerSource {
    path: PathBuf,
}

impl CrewTimerSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ResultSource for CrewTimerSource {
    fn read_results(&self, context: &ImportContext) -> Result<Vec<ResultRecord>> {
        info!("Reading CrewTimer results from {}", self.path.display());
        let file = File::open(&self.path)?;
        CrewTimerTransformer::new(context.season).read(BufReader::new(file))
    }

    fn name(&self) -> &'static str {
        "CrewTimer"
    }
}
