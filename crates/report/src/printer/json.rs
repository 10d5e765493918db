use std::io::{self, Write};

use engine::dto::{CategoryReport, ReportRow, ResultView, ViewReport};
use serde::Serialize;

use super::ResultPrinter;

#[derive(Serialize)]
struct JsonDocument<'a> {
    views: &'a [ViewReport],
}

/// Buffers every race and writes a single document at the end.
pub struct JsonPrinter<W> {
    out: W,
    views: Vec<ViewReport>,
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            views: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultPrinter for JsonPrinter<W> {
    fn views(&self) -> &'static [ResultView] {
        &[ResultView::Championship, ResultView::Standard]
    }

    fn begin_view(&mut self, view: ResultView) -> io::Result<()> {
        self.views.push(ViewReport {
            view,
            categories: Vec::new(),
        });
        Ok(())
    }

    fn race_header(&mut self, category: &CategoryReport, _title: &str) -> io::Result<()> {
        if let Some(current) = self.views.last_mut() {
            current.categories.push(category.clone());
        }
        Ok(())
    }

    fn result_row(&mut self, _row: &ReportRow) -> io::Result<()> {
        Ok(())
    }

    fn end(&mut self) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &JsonDocument { views: &self.views })?;
        writeln!(self.out)?;
        self.out.flush()
    }
}
