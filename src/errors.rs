//! Unified application error type.
//! Every stage (config, source, archive read, archive write) returns AppError
//! so that `main` can report the failing stage and exit with a single code.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Pipeline stages
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Error fetching log records: {0}")]
    Source(String),

    #[error("Error reading archive top row: {0}")]
    Read(String),

    #[error("Error writing archive rows: {0}")]
    Write(String),

    // ---------------------------
    // Row structure
    // ---------------------------
    #[error("Invalid row: {0}")]
    InvalidRow(String),

    // ---------------------------
    // Transport / encoding
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Short name of the stage that produced the error, used in log fields.
    pub fn stage(&self) -> &'static str {
        match self {
            AppError::Config(_) | AppError::Yaml(_) => "config",
            AppError::Source(_) => "source",
            AppError::Read(_) | AppError::InvalidRow(_) => "read",
            AppError::Write(_) => "write",
            AppError::Io(_)
            | AppError::Json(_)
            | AppError::Http(_)
            | AppError::Csv(_)
            | AppError::Other(_) => "internal",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
