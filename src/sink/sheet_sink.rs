use super::{FIRST_DATA_ROW, RowRange, SheetBackend, Sink};
use crate::core::dedup::select_newer_rows;
use crate::errors::{AppError, AppResult};
use crate::models::{LogRecord, Row};
use crate::utils::time::Zone;

/// Archive sink over any [`SheetBackend`].
pub struct SheetSink<B: SheetBackend> {
    backend: B,
    zone: Zone,
}

impl<B: SheetBackend> SheetSink<B> {
    pub fn new(backend: B, zone: Zone) -> Self {
        Self { backend, zone }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Rows that `receive` would write for `records`, newest-first.
    pub fn plan(&self, records: &[LogRecord]) -> AppResult<Vec<Row>> {
        let rows = Row::from_records(records, self.zone)?;
        let pivot = self.read_top_row()?;
        tracing::debug!(
            candidates = rows.len(),
            pivot_empty = pivot.is_empty(),
            "selecting rows newer than archive top row"
        );
        Ok(select_newer_rows(rows, &pivot))
    }

    /// The most recently archived row, or an empty row when the archive
    /// holds no data yet.
    pub fn read_top_row(&self) -> AppResult<Row> {
        let range = RowRange::new(FIRST_DATA_ROW, 1);
        let values = self
            .backend
            .read_rows(range)
            .map_err(|e| AppError::Read(format!("unable to retrieve data from sheet: {e}")))?;

        match values.as_slice() {
            [] => Ok(Row::default()),
            [cells] => Row::from_cells(cells)
                .map_err(|e| AppError::Read(format!("error validating top row: {e}"))),
            more => Err(AppError::Read(format!(
                "unexpected number of rows returned: {}",
                more.len()
            ))),
        }
    }

    /// Insert `rows` below the header, keeping their order.
    pub fn write_top_rows(&mut self, rows: &[Row]) -> AppResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let values: Vec<Vec<String>> = rows.iter().map(Row::to_cells).collect();
        self.backend
            .prepend_rows(&values)
            .map_err(|e| AppError::Write(e.to_string()))
    }
}

impl<B: SheetBackend> Sink for SheetSink<B> {
    fn receive(&mut self, records: &[LogRecord]) -> AppResult<usize> {
        let rows = self.plan(records)?;
        self.write_top_rows(&rows)?;
        tracing::info!(
            written = rows.len(),
            backend = %self.backend.describe(),
            "archive updated"
        );
        Ok(rows.len())
    }
}
