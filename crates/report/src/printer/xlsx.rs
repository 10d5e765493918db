use std::io::{self, Write};

use engine::dto::{CategoryReport, ReportRow, ResultView};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet, XlsxError};

use super::{COLUMN_TITLES, ResultPrinter, format_adj_time, format_delta, format_rank};

const FONT_NAME: &str = "Trebuchet MS";
const LAST_COLUMN: u16 = 5;
const CREW_COLUMN: usize = 3;
const COLUMN_WIDTHS: [f64; 6] = [7.0, 3.0, 13.0, 70.0, 12.0, 14.0];
const A4_PAPER: u8 = 9;

fn sheet_name(view: ResultView) -> &'static str {
    match view {
        ResultView::All => "Résultats",
        ResultView::Championship => "Championnat suisse",
        ResultView::Standard => "LSM",
    }
}

fn sheet_title(view: ResultView) -> &'static str {
    match view {
        ResultView::All => "Résultats",
        ResultView::Championship => "Résultats du championnat suisse d'aviron de mer",
        ResultView::Standard => "Résultats Léman sur Mer",
    }
}

struct Formats {
    title: Format,
    race: Format,
    columns: Format,
    crew: Format,
    cell: Format,
}

impl Formats {
    fn new() -> Self {
        let base = Format::new().set_font_name(FONT_NAME);
        Self {
            title: base
                .clone()
                .set_bold()
                .set_font_size(22)
                .set_align(FormatAlign::Center),
            race: base.clone().set_bold().set_font_size(18),
            columns: base.clone().set_italic().set_font_size(13),
            crew: base.clone().set_text_wrap(),
            cell: base,
        }
    }
}

/// Workbook with one sheet per view, printable on A4.
///
/// Sheets are built in memory and the whole workbook is written to `out` by
/// [`end`](ResultPrinter::end).
pub struct XlsxPrinter<W> {
    out: W,
    workbook: Workbook,
    sheet: Option<Worksheet>,
    row: u32,
    formats: Formats,
}

impl<W: Write> XlsxPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            workbook: Workbook::new(),
            sheet: None,
            row: 0,
            formats: Formats::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn xlsx_error(error: XlsxError) -> io::Error {
    io::Error::other(error.to_string())
}

fn outside_of_view() -> io::Error {
    io::Error::other("race printed outside of a sheet")
}

impl<W: Write> ResultPrinter for XlsxPrinter<W> {
    fn views(&self) -> &'static [ResultView] {
        &[ResultView::Championship, ResultView::Standard]
    }

    fn begin_view(&mut self, view: ResultView) -> io::Result<()> {
        let mut sheet = Worksheet::new();
        sheet.set_name(sheet_name(view)).map_err(xlsx_error)?;
        for (column, width) in COLUMN_WIDTHS.iter().enumerate() {
            sheet
                .set_column_width(column as u16, *width)
                .map_err(xlsx_error)?;
        }
        sheet.set_paper_size(A4_PAPER).set_print_fit_to_pages(1, 0);
        sheet
            .merge_range(0, 0, 0, LAST_COLUMN, sheet_title(view), &self.formats.title)
            .map_err(xlsx_error)?;

        self.row = 2;
        self.sheet = Some(sheet);
        Ok(())
    }

    fn race_header(&mut self, _category: &CategoryReport, title: &str) -> io::Result<()> {
        let sheet = self.sheet.as_mut().ok_or_else(outside_of_view)?;
        sheet
            .merge_range(self.row, 0, self.row, LAST_COLUMN, title, &self.formats.race)
            .map_err(xlsx_error)?;
        sheet.set_row_height(self.row, 45).map_err(xlsx_error)?;
        self.row += 1;

        for (column, name) in COLUMN_TITLES.iter().enumerate() {
            sheet
                .write_string_with_format(self.row, column as u16, *name, &self.formats.columns)
                .map_err(xlsx_error)?;
        }
        self.row += 1;
        Ok(())
    }

    fn result_row(&mut self, row: &ReportRow) -> io::Result<()> {
        let sheet = self.sheet.as_mut().ok_or_else(outside_of_view)?;
        let cells = [
            format_rank(row.rank),
            row.medal_symbol().to_string(),
            row.crew_abbrev.clone(),
            row.crew.clone(),
            format_adj_time(row.adj_time.as_deref()).to_string(),
            format_delta(row.delta.as_deref()),
        ];

        for (column, value) in cells.iter().enumerate().filter(|(_, v)| !v.is_empty()) {
            let format = if column == CREW_COLUMN {
                &self.formats.crew
            } else {
                &self.formats.cell
            };
            sheet
                .write_string_with_format(self.row, column as u16, value, format)
                .map_err(xlsx_error)?;
        }
        self.row += 1;
        Ok(())
    }

    fn race_footer(&mut self, _category: &CategoryReport) -> io::Result<()> {
        self.row += 1;
        Ok(())
    }

    fn end_view(&mut self, _view: ResultView) -> io::Result<()> {
        if let Some(sheet) = self.sheet.take() {
            self.workbook.push_worksheet(sheet);
        }
        Ok(())
    }

    fn end(&mut self) -> io::Result<()> {
        let buffer = self.workbook.save_to_buffer().map_err(xlsx_error)?;
        self.out.write_all(&buffer)?;
        self.out.flush()
    }
}
