use crate::Result;
use engine::models::{ResultRecord, Season};

pub struct ImportContext {
    pub season: Season,
}

/// A timing system export turned into result records, in file order.
pub trait ResultSource {
    fn read_results(&self, context: &ImportContext) -> Result<Vec<ResultRecord>>;

    fn name(&self) -> &'static str;
}
