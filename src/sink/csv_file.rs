use super::{FIRST_DATA_ROW, RowRange, SheetBackend};
use crate::errors::{AppError, AppResult};
use crate::models::{HEADERS, ROW_WIDTH};
use csv::{ReaderBuilder, WriterBuilder};
use serde_json::Value;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Archive kept in a local CSV file: a header line, then data rows
/// newest-first.
#[derive(Debug, Clone)]
pub struct CsvFileBackend {
    path: PathBuf,
}

impl CsvFileBackend {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// All lines of the file. A missing file is an empty table.
    fn load(&self) -> AppResult<Vec<Vec<String>>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }

    /// Replace the file through a sibling temp file so readers never see a
    /// half-written archive.
    fn store(&self, rows: &[Vec<String>]) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.tmp_path();
        {
            let mut wtr = WriterBuilder::new().flexible(true).from_path(&tmp)?;
            for row in rows {
                wtr.write_record(row)?;
            }
            wtr.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn load_with_header(&self) -> AppResult<Vec<Vec<String>>> {
        let mut rows = self.load()?;
        if rows.is_empty() {
            rows.push(HEADERS.iter().map(|h| h.to_string()).collect());
        }
        Ok(rows)
    }
}

fn blank_row() -> Vec<String> {
    vec![String::new(); ROW_WIDTH]
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(String::is_empty)
}

impl SheetBackend for CsvFileBackend {
    fn read_rows(&self, range: RowRange) -> AppResult<Vec<Vec<Value>>> {
        let rows = self.load()?;
        let start = (range.first - 1).min(rows.len());
        let end = range.last.min(rows.len());

        let mut out: Vec<&Vec<String>> = rows[start..end].iter().collect();
        while out.last().is_some_and(|r| is_blank(r)) {
            out.pop();
        }

        Ok(out
            .into_iter()
            .map(|r| r.iter().cloned().map(Value::String).collect())
            .collect())
    }

    fn insert_rows(&mut self, range: RowRange) -> AppResult<()> {
        let mut rows = self.load_with_header()?;
        let at = range.first - 1;
        while rows.len() < at {
            rows.push(blank_row());
        }
        rows.splice(at..at, std::iter::repeat_n(blank_row(), range.len()));
        self.store(&rows)
    }

    fn write_rows(&mut self, range: RowRange, values: &[Vec<String>]) -> AppResult<()> {
        if values.len() > range.len() {
            return Err(AppError::Other(format!(
                "{} rows do not fit in range of {}",
                values.len(),
                range.len()
            )));
        }

        let mut rows = self.load_with_header()?;
        while rows.len() < range.last {
            rows.push(blank_row());
        }
        for (i, row) in values.iter().enumerate() {
            rows[range.first - 1 + i] = row.clone();
        }
        self.store(&rows)
    }

    /// Single rewrite instead of insert + write.
    fn prepend_rows(&mut self, values: &[Vec<String>]) -> AppResult<()> {
        if values.is_empty() {
            return Ok(());
        }
        let mut rows = self.load_with_header()?;
        let at = FIRST_DATA_ROW - 1;
        rows.splice(at..at, values.iter().cloned());
        tracing::debug!(path = %self.path.display(), rows = values.len(), "prepending rows to csv archive");
        self.store(&rows)
    }

    fn describe(&self) -> String {
        format!("CSV file {}", self.path.display())
    }
}
