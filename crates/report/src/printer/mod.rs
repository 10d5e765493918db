mod json;
mod screen;
mod tsv;
mod xlsx;

pub use json::JsonPrinter;
pub use screen::ScreenPrinter;
pub use tsv::TsvPrinter;
pub use xlsx::XlsxPrinter;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{NaiveTime, TimeDelta, Timelike};
use clap::ValueEnum;
use engine::dto::{CategoryReport, ReportRow, ResultView, build_view_report};
use engine::models::race_time::{DID_NOT_START, parse_time_of_day};
use engine::services::ResultGroup;
use tracing::debug;

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PrintMode {
    /// Human readable, for the console
    Screen,
    /// Tab separated, to paste into a spreadsheet
    Tsv,
    /// Championship and standard results as one JSON document
    Json,
    /// Championship and standard results as two sheets of a workbook,
    /// written next to the input file
    Xlsx,
}

impl PrintMode {
    pub fn printer<'w, W: Write + 'w>(self, out: W) -> Box<dyn ResultPrinter + 'w> {
        match self {
            Self::Screen => Box::new(ScreenPrinter::new(out)),
            Self::Tsv => Box::new(TsvPrinter::new(out)),
            Self::Json => Box::new(JsonPrinter::new(out)),
            Self::Xlsx => Box::new(XlsxPrinter::new(out)),
        }
    }

    /// File to write instead of stdout, derived from the results file.
    pub fn output_file(self, input: &Path) -> Option<PathBuf> {
        match self {
            Self::Xlsx => Some(input.with_extension("xlsx")),
            Self::Screen | Self::Tsv | Self::Json => None,
        }
    }
}

/// Column titles of a race table.
pub const COLUMN_TITLES: [&str; 6] = ["Rang", "M", "Nom court", "Equipe", "Temps", "Différence"];

/// Output format of ranked results.
///
/// For each of [`views`](ResultPrinter::views), in order, the printer gets
/// `begin_view`, then per race a header, its rows and a footer, then
/// `end_view`. `end` is called once everything is printed.
pub trait ResultPrinter {
    fn views(&self) -> &'static [ResultView];

    fn begin_view(&mut self, _view: ResultView) -> io::Result<()> {
        Ok(())
    }

    fn race_header(&mut self, category: &CategoryReport, title: &str) -> io::Result<()>;

    fn result_row(&mut self, row: &ReportRow) -> io::Result<()>;

    fn race_footer(&mut self, _category: &CategoryReport) -> io::Result<()> {
        Ok(())
    }

    fn end_view(&mut self, _view: ResultView) -> io::Result<()> {
        Ok(())
    }

    fn end(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn render(printer: &mut dyn ResultPrinter, results: &ResultGroup) -> Result<()> {
    for &view in printer.views() {
        let report = build_view_report(view, results)?;
        debug!("Printing {} races of view {}", report.categories.len(), view.as_str());

        printer.begin_view(view)?;
        for category in &report.categories {
            printer.race_header(category, &race_title(category)?)?;
            for row in &category.rows {
                printer.result_row(row)?;
            }
            printer.race_footer(category)?;
        }
        printer.end_view(view)?;
    }
    printer.end()?;
    Ok(())
}

/// `W 1x 🏆🇨🇭 (course 🦭 3, 09h10)`
pub fn race_title(category: &CategoryReport) -> Result<String> {
    let trophy = if category.championship { " 🏆🇨🇭" } else { "" };
    Ok(format!(
        "{}{} (course {}, {})",
        category.category,
        trophy,
        category.event,
        start_label(category.start.as_deref())?
    ))
}

/// Start of a race, to the nearest 5 minutes.
pub fn start_label(start: Option<&str>) -> Result<String> {
    let Some(start) = start else {
        return Ok("<startTime>".to_string());
    };
    if start == DID_NOT_START {
        return Ok(start.to_string());
    }
    let time = round_to_five_minutes(parse_time_of_day(start)?);
    Ok(time.format("%Hh%M").to_string())
}

fn round_to_five_minutes(time: NaiveTime) -> NaiveTime {
    let past = i64::from(time.minute() % 5);
    let offset = if past >= 3 { 5 - past } else { -past };
    let minute = time.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(time);
    minute.overflowing_add_signed(TimeDelta::minutes(offset)).0
}

pub(crate) fn format_adj_time(adj_time: Option<&str>) -> &str {
    adj_time.unwrap_or("(inconnu)")
}

pub(crate) fn format_delta(delta: Option<&str>) -> String {
    delta.map(|d| format!("+{d}")).unwrap_or_default()
}

pub(crate) fn format_rank(rank: u32) -> String {
    if rank == 0 { String::new() } else { rank.to_string() }
}

#[cfg(test)]
pub(crate) mod test_support {
    use engine::models::{EventId, ResultRecord};
    use engine::process_results;
    use engine::services::ResultGroup;

    fn record(id: u32, category: &str, crew: &str, place: u32, adj_time: Option<&str>) -> ResultRecord {
        ResultRecord {
            event: EventId::new(None, id),
            event_name: format!("Course {id}"),
            event_rank: Some(place),
            crew: crew.to_string(),
            crew_abbrev: crew[..3].to_uppercase(),
            category: category.to_string(),
            start: Some("09:11:40".to_string()),
            splits: Vec::new(),
            finish: None,
            delta: None,
            category_rank: 0,
            adj_time: adj_time.map(str::to_string),
        }
    }

    /// A standard single with a non-finisher and a championship double.
    pub(crate) fn results() -> ResultGroup {
        process_results(vec![
            record(1, "M 1x", "Vevey", 1, Some("07:30.0")),
            record(1, "M 1x", "Morges", 2, Some("07:41.5")),
            record(1, "M 1x", "Nyon", 3, None),
            record(2, "W 2x*", "Lausanne", 1, Some("08:00.0")),
            record(2, "W 2x*", "Geneve", 2, Some("08:02.0")),
        ])
        .unwrap()
        .results
    }
}
