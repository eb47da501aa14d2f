//! Source side: where log records come from.

mod file;
mod palgate;

pub use file::FileSource;
pub use palgate::PalGateClient;

use crate::errors::{AppError, AppResult};
use crate::models::LogRecord;
use serde::{Deserialize, Serialize};

/// Status discriminator of a gate API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    #[serde(rename = "ok")]
    Success,
    #[serde(rename = "failed")]
    Failed,
    #[serde(other)]
    Unknown,
}

impl ResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::Success => "ok",
            ResponseStatus::Failed => "failed",
            ResponseStatus::Unknown => "unknown",
        }
    }
}

/// Body of the `/v1/bt/user/log` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetLogResponse {
    #[serde(rename = "log", default)]
    pub records: Vec<LogRecord>,
    #[serde(rename = "err", default)]
    pub error: String,
    #[serde(rename = "msg", default)]
    pub message: String,
    pub status: ResponseStatus,
}

impl GetLogResponse {
    /// Fail unless the server reported success.
    pub fn ensure_success(&self) -> AppResult<()> {
        if self.status == ResponseStatus::Success {
            return Ok(());
        }
        Err(AppError::Source(format!(
            "status={}, error={}, message={}",
            self.status.as_str(),
            self.error,
            self.message
        )))
    }

    /// Consume a successful response into its records.
    pub fn into_records(self) -> AppResult<Vec<LogRecord>> {
        self.ensure_success()?;
        Ok(self.records)
    }
}

/// Anything that can produce one batch of log records.
pub trait LogSource {
    fn fetch_log(&self) -> AppResult<GetLogResponse>;

    /// Human readable origin, used in messages.
    fn describe(&self) -> String;
}
