pub mod report;

pub use report::{CategoryReport, ReportRow, ResultView, ViewReport, build_view_report};
