use crate::client::LogSource;
use crate::config::{BackendKind, Config};
use crate::errors::AppResult;
use crate::models::LogRecord;
use crate::sink::{CsvFileBackend, GoogleSheetsBackend, SheetBackend, Sink};
use crate::utils::path::expand_tilde;

/// High-level archive pipeline: fetch, then hand the batch to a sink.
pub struct ArchiveLogic;

impl ArchiveLogic {
    /// Backend selected by `archive.backend`.
    pub fn open_backend(cfg: &Config) -> AppResult<Box<dyn SheetBackend>> {
        let backend: Box<dyn SheetBackend> = match cfg.archive.backend {
            BackendKind::Sheets => {
                Box::new(GoogleSheetsBackend::new(&cfg.archive, cfg.http_timeout())?)
            }
            BackendKind::Csv => Box::new(CsvFileBackend::new(expand_tilde(&cfg.archive.csv_path))),
        };
        tracing::debug!(backend = %backend.describe(), "archive backend opened");
        Ok(backend)
    }

    /// One fetch from `source`; any non-success status is fatal.
    pub fn fetch(source: &dyn LogSource) -> AppResult<Vec<LogRecord>> {
        let response = source.fetch_log()?;
        response.into_records()
    }

    /// Fetch and archive. Returns the number of rows written.
    pub fn run<S: Sink + ?Sized>(source: &dyn LogSource, sink: &mut S) -> AppResult<usize> {
        let records = Self::fetch(source)?;
        tracing::info!(records = records.len(), source = %source.describe(), "log records fetched");
        sink.receive(&records)
    }
}
