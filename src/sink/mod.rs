//! Archive side: the `Sink` capability and the tabular backends behind it.
//!
//! The archive is a table whose row 1 is a header and whose data rows are
//! kept newest-first starting at row 2. Row numbers are 1-based throughout.

mod csv_file;
mod google;
mod memory;
mod sheet_sink;

pub use csv_file::CsvFileBackend;
pub use google::GoogleSheetsBackend;
pub use memory::{FailOn, MemoryBackend};
pub use sheet_sink::SheetSink;

use crate::errors::AppResult;
use crate::models::{LogRecord, ROW_WIDTH};
use serde_json::Value;

/// First data row, directly below the header.
pub const FIRST_DATA_ROW: usize = 2;

/// Receives a batch of fetched records and archives the new ones.
pub trait Sink {
    /// Returns the number of rows written.
    fn receive(&mut self, records: &[LogRecord]) -> AppResult<usize>;
}

/// Inclusive, 1-based span of whole rows (columns A..H).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub first: usize,
    pub last: usize,
}

impl RowRange {
    /// `count` rows starting at `first`. A zero `count` gives an empty range.
    pub fn new(first: usize, count: usize) -> Self {
        Self {
            first,
            last: (first + count).saturating_sub(1),
        }
    }

    pub fn len(&self) -> usize {
        (self.last + 1).saturating_sub(self.first)
    }

    pub fn is_empty(&self) -> bool {
        self.last < self.first
    }

    /// A1 notation with the sheet name quoted, e.g. `'Gate Log'!A2:H4`.
    pub fn a1(&self, sheet: &str) -> String {
        format!(
            "'{}'!A{}:{}{}",
            sheet.replace('\'', "''"),
            self.first,
            last_column_letter(),
            self.last
        )
    }
}

fn last_column_letter() -> char {
    (b'A' + (ROW_WIDTH as u8) - 1) as char
}

/// Minimal tabular store the archive sink is written against.
pub trait SheetBackend {
    /// Cells of the rows in `range`. Trailing empty rows may be omitted.
    fn read_rows(&self, range: RowRange) -> AppResult<Vec<Vec<Value>>>;

    /// Insert blank rows so that they occupy `range`, shifting the rows
    /// at and below `range.first` down.
    fn insert_rows(&mut self, range: RowRange) -> AppResult<()>;

    /// Overwrite `range` with `values`, one inner vec per row.
    fn write_rows(&mut self, range: RowRange, values: &[Vec<String>]) -> AppResult<()>;

    /// Put `values` directly below the header, above the existing data.
    ///
    /// The default runs `insert_rows` then `write_rows`. If the second call
    /// fails, the inserted rows stay blank; backends that can apply both in
    /// one request override this.
    fn prepend_rows(&mut self, values: &[Vec<String>]) -> AppResult<()> {
        if values.is_empty() {
            return Ok(());
        }
        let range = RowRange::new(FIRST_DATA_ROW, values.len());
        self.insert_rows(range)?;
        self.write_rows(range, values)
    }

    fn describe(&self) -> String;
}

impl<B: SheetBackend + ?Sized> SheetBackend for Box<B> {
    fn read_rows(&self, range: RowRange) -> AppResult<Vec<Vec<Value>>> {
        (**self).read_rows(range)
    }

    fn insert_rows(&mut self, range: RowRange) -> AppResult<()> {
        (**self).insert_rows(range)
    }

    fn write_rows(&mut self, range: RowRange, values: &[Vec<String>]) -> AppResult<()> {
        (**self).write_rows(range, values)
    }

    fn prepend_rows(&mut self, values: &[Vec<String>]) -> AppResult<()> {
        (**self).prepend_rows(values)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
