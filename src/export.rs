//! Spreadsheet export of a schedule and its progress.
//!
//! The output is an `.xlsx` workbook with a single sheet of three
//! columns, `Day`, `Passages` and `Done`. Each passage cell links to the
//! day's reading, and columns are sized to fit their longest cell (at
//! most `MAX_COLUMN_WIDTH` characters).

use std::cmp;
use std::io::Write;

use rust_xlsxwriter::{Format, Workbook};

use super::errors::*;
use super::schedule::{ProgressMap, ScheduleRow};

pub const HEADERS: [&'static str; 3] = ["Day", "Passages", "Done"];

/// Widest a column is made, in characters.
pub const MAX_COLUMN_WIDTH: usize = 30;

const DONE_MARK: &'static str = "X";

fn is_done(progress: &ProgressMap, day: u32) -> bool {
    progress.get(&day).cloned().unwrap_or(false)
}

/// Returns the width of each column: the length of its longest cell,
/// header included, capped at `MAX_COLUMN_WIDTH`.
pub fn column_widths(rows: &[ScheduleRow], progress: &ProgressMap) -> [usize; 3] {
    let mut widths = [HEADERS[0].len(), HEADERS[1].len(), HEADERS[2].len()];

    for row in rows {
        widths[0] = cmp::max(widths[0], row.day.to_string().len());
        widths[1] = cmp::max(widths[1], row.passages.chars().count());
        if is_done(progress, row.day) {
            widths[2] = cmp::max(widths[2], DONE_MARK.len());
        }
    }

    for w in widths.iter_mut() {
        *w = cmp::min(*w, MAX_COLUMN_WIDTH);
    }
    widths
}

/// Builds the workbook for `rows`, marking each day found done in
/// `progress` with an `X`.
pub fn workbook(rows: &[ScheduleRow], progress: &ProgressMap) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Reading Plan").chain_err(|| "could not name worksheet")?;

        for (col, header) in HEADERS.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *header, &bold)
                .chain_err(|| "could not write export header")?;
        }

        for (i, row) in rows.iter().enumerate() {
            let r = i as u32 + 1;
            sheet.write_number(r, 0, row.day as f64)
                .and_then(|s| s.write_url_with_text(r, 1, row.url.as_str(), row.passages.as_str()))
                .chain_err(|| format!("could not write export row for day {}", row.day))?;
            if is_done(progress, row.day) {
                sheet.write_string(r, 2, DONE_MARK)
                    .chain_err(|| format!("could not write export row for day {}", row.day))?;
            }
        }

        for (col, &width) in column_widths(rows, progress).iter().enumerate() {
            sheet.set_column_width(col as u16, width as f64)
                .chain_err(|| "could not size export columns")?;
        }
    }

    Ok(workbook)
}

/// Writes `rows` as an `.xlsx` workbook to `output`.
pub fn write_xlsx<W: Write>(rows: &[ScheduleRow], progress: &ProgressMap, mut output: W) -> Result<()> {
    let mut workbook = workbook(rows, progress)?;
    let buffer = workbook.save_to_buffer().chain_err(|| "could not assemble workbook")?;

    output.write_all(&buffer).chain_err(|| ErrorKind::Io("could not write to export output".into()))?;
    output.flush().chain_err(|| ErrorKind::Io("could not write to export output".into()))?;

    debug!(rows = rows.len(), bytes = buffer.len(), "wrote xlsx export");
    Ok(())
}
