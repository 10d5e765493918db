pub mod category_merge;
pub mod grouping;
pub mod medals;
pub mod pipeline;
pub mod ranking;

pub use grouping::{ResultGroup, group_results};
pub use medals::{Medal, medal_count, medal_for};
pub use pipeline::{ProcessedResults, process_results};
