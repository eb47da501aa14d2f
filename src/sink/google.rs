use super::{FIRST_DATA_ROW, RowRange, SheetBackend};
use crate::config::ArchiveConfig;
use crate::errors::{AppError, AppResult};
use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

/// Google Sheets REST (v4) backend.
///
/// Expects a ready OAuth 2.0 bearer token with the
/// `https://www.googleapis.com/auth/spreadsheets` scope.
#[derive(Debug, Clone)]
pub struct GoogleSheetsBackend {
    client: Client,
    api_base: Url,
    spreadsheet_id: String,
    sheet_name: String,
    sheet_id: i64,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl GoogleSheetsBackend {
    pub fn new(cfg: &ArchiveConfig, timeout: Option<Duration>) -> AppResult<Self> {
        let api_base = Url::parse(&cfg.api_base)
            .map_err(|e| AppError::Config(format!("invalid sheets API base {}: {e}", cfg.api_base)))?;

        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Other(format!("http client build failed: {e}")))?;

        Ok(Self {
            client,
            api_base,
            spreadsheet_id: cfg.spreadsheet_id.clone(),
            sheet_name: cfg.sheet_name.clone(),
            sheet_id: cfg.sheet_id,
            access_token: cfg.access_token.clone(),
        })
    }

    /// `{api_base}/v4/spreadsheets/{id}/...` with each segment escaped.
    fn url(&self, tail: &[&str]) -> AppResult<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("invalid sheets API base {}", self.api_base)))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets"])
            .extend(tail);
        Ok(url)
    }

    fn values_url(&self, range: RowRange) -> AppResult<Url> {
        let a1 = range.a1(&self.sheet_name);
        self.url(&[self.spreadsheet_id.as_str(), "values", a1.as_str()])
    }

    fn batch_update_url(&self) -> AppResult<Url> {
        let op = format!("{}:batchUpdate", self.spreadsheet_id);
        self.url(&[op.as_str()])
    }

    fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = request.bearer_auth(&self.access_token).send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(AppError::Other(format!(
            "sheets API returned {status}: {}",
            body.trim()
        )))
    }

    fn batch_update(&self, requests: Vec<Value>) -> AppResult<()> {
        let body = json!({ "requests": requests });
        self.send(self.client.post(self.batch_update_url()?).json(&body))?;
        Ok(())
    }

    // Sheets dimension indexes are 0-based and end-exclusive.
    fn insert_dimension(&self, range: RowRange) -> Value {
        json!({
            "insertDimension": {
                "inheritFromBefore": false,
                "range": {
                    "sheetId": self.sheet_id,
                    "dimension": "ROWS",
                    "startIndex": range.first - 1,
                    "endIndex": range.last,
                }
            }
        })
    }

    fn update_cells(&self, first_row: usize, values: &[Vec<String>]) -> Value {
        let rows: Vec<Value> = values
            .iter()
            .map(|row| {
                let cells: Vec<Value> = row
                    .iter()
                    .map(|v| json!({ "userEnteredValue": { "stringValue": v } }))
                    .collect();
                json!({ "values": cells })
            })
            .collect();

        json!({
            "updateCells": {
                "start": {
                    "sheetId": self.sheet_id,
                    "rowIndex": first_row - 1,
                    "columnIndex": 0,
                },
                "rows": rows,
                "fields": "userEnteredValue",
            }
        })
    }
}

impl SheetBackend for GoogleSheetsBackend {
    fn read_rows(&self, range: RowRange) -> AppResult<Vec<Vec<Value>>> {
        let url = self.values_url(range)?;
        tracing::debug!(%url, "reading sheet range");
        let body: ValueRange = self.send(self.client.get(url))?.json()?;
        Ok(body.values)
    }

    fn insert_rows(&mut self, range: RowRange) -> AppResult<()> {
        tracing::debug!(range = %range.a1(&self.sheet_name), "inserting sheet rows");
        self.batch_update(vec![self.insert_dimension(range)])
    }

    fn write_rows(&mut self, range: RowRange, values: &[Vec<String>]) -> AppResult<()> {
        let a1 = range.a1(&self.sheet_name);
        let url = self.values_url(range)?;
        let body = json!({
            "range": a1,
            "majorDimension": "ROWS",
            "values": values,
        });
        tracing::debug!(range = %a1, rows = values.len(), "writing sheet values");
        self.send(
            self.client
                .put(url)
                .query(&[("valueInputOption", "RAW")])
                .json(&body),
        )?;
        Ok(())
    }

    /// Insert and fill in one `batchUpdate`, which the API applies
    /// atomically.
    fn prepend_rows(&mut self, values: &[Vec<String>]) -> AppResult<()> {
        if values.is_empty() {
            return Ok(());
        }
        let range = RowRange::new(FIRST_DATA_ROW, values.len());
        tracing::debug!(range = %range.a1(&self.sheet_name), "prepending sheet rows");
        self.batch_update(vec![
            self.insert_dimension(range),
            self.update_cells(range.first, values),
        ])
    }

    fn describe(&self) -> String {
        format!(
            "Google Sheets {} ({})",
            self.spreadsheet_id, self.sheet_name
        )
    }
}
