use std::io::{self, Write};

use engine::dto::{CategoryReport, ReportRow, ResultView};

use super::{COLUMN_TITLES, ResultPrinter, format_adj_time, format_delta, format_rank};

/// Pasted as values into a spreadsheet. The delta is quoted so that it is not
/// read as a time of day.
pub struct TsvPrinter<W> {
    out: W,
}

impl<W: Write> TsvPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultPrinter for TsvPrinter<W> {
    fn views(&self) -> &'static [ResultView] {
        &[ResultView::All]
    }

    fn race_header(&mut self, _category: &CategoryReport, title: &str) -> io::Result<()> {
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "{}", COLUMN_TITLES.join("\t"))
    }

    fn result_row(&mut self, row: &ReportRow) -> io::Result<()> {
        writeln!(
            self.out,
            "{}\t{}\t{}\t{}\t{}\t'{}",
            format_rank(row.rank),
            row.medal_symbol(),
            row.crew_abbrev,
            row.crew,
            format_adj_time(row.adj_time.as_deref()),
            format_delta(row.delta.as_deref())
        )
    }

    fn race_footer(&mut self, _category: &CategoryReport) -> io::Result<()> {
        writeln!(self.out)
    }

    fn end(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
