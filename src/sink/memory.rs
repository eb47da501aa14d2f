use super::{RowRange, SheetBackend};
use crate::errors::{AppError, AppResult};
use crate::models::HEADERS;
use serde_json::Value;

/// Backend call that a [`MemoryBackend`] should fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailOn {
    #[default]
    Nothing,
    Read,
    Insert,
    Write,
}

/// In-process table, header included at index 0.
///
/// Keeps the default two-step `prepend_rows`, so a failure injected on
/// `Write` leaves the inserted blank rows in place like a real sheet would.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    rows: Vec<Vec<Value>>,
    fail_on: FailOn,
    mutations: Vec<String>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// Table holding only the header row.
    pub fn new() -> Self {
        let header = HEADERS.iter().map(|h| Value::from(*h)).collect();
        Self {
            rows: vec![header],
            fail_on: FailOn::Nothing,
            mutations: Vec::new(),
        }
    }

    /// Table with the given data rows below the header, newest-first.
    pub fn with_data_rows<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut backend = Self::new();
        for row in rows {
            backend
                .rows
                .push(row.into_iter().map(|c| Value::String(c.into())).collect());
        }
        backend
    }

    /// Table with raw, possibly non-string cells below the header.
    pub fn with_raw_rows(rows: Vec<Vec<Value>>) -> Self {
        let mut backend = Self::new();
        backend.rows.extend(rows);
        backend
    }

    pub fn fail_on(mut self, fail_on: FailOn) -> Self {
        self.fail_on = fail_on;
        self
    }

    /// Data rows as strings (nulls and non-strings rendered as "").
    pub fn data_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .skip(1)
            .map(|row| {
                row.iter()
                    .map(|c| c.as_str().unwrap_or_default().to_string())
                    .collect()
            })
            .collect()
    }

    /// Mutations applied so far, e.g. `insert A2:H3`.
    pub fn mutations(&self) -> &[String] {
        &self.mutations
    }

    fn fail(&self, call: FailOn) -> AppResult<()> {
        if self.fail_on == call {
            return Err(AppError::Other(format!("injected {call:?} failure")));
        }
        Ok(())
    }
}

fn is_blank(row: &[Value]) -> bool {
    row.iter()
        .all(|c| c.is_null() || c.as_str().is_some_and(str::is_empty))
}

impl SheetBackend for MemoryBackend {
    fn read_rows(&self, range: RowRange) -> AppResult<Vec<Vec<Value>>> {
        self.fail(FailOn::Read)?;

        let start = (range.first - 1).min(self.rows.len());
        let end = range.last.min(self.rows.len());
        let mut out: Vec<Vec<Value>> = self.rows[start..end].to_vec();

        // Like the Sheets API, trailing blank rows are not returned.
        while out.last().is_some_and(|r| is_blank(r)) {
            out.pop();
        }
        Ok(out)
    }

    fn insert_rows(&mut self, range: RowRange) -> AppResult<()> {
        self.fail(FailOn::Insert)?;

        let at = range.first - 1;
        while self.rows.len() < at {
            self.rows.push(Vec::new());
        }
        for _ in 0..range.len() {
            self.rows.insert(at, Vec::new());
        }
        self.mutations.push(format!("insert {}", range.a1("memory")));
        Ok(())
    }

    fn write_rows(&mut self, range: RowRange, values: &[Vec<String>]) -> AppResult<()> {
        self.fail(FailOn::Write)?;

        if values.len() > range.len() {
            return Err(AppError::Other(format!(
                "{} rows do not fit in {}",
                values.len(),
                range.a1("memory")
            )));
        }
        while self.rows.len() < range.last {
            self.rows.push(Vec::new());
        }
        for (i, row) in values.iter().enumerate() {
            self.rows[range.first - 1 + i] = row.iter().cloned().map(Value::String).collect();
        }
        self.mutations.push(format!("write {}", range.a1("memory")));
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory table".to_string()
    }
}
