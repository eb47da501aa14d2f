use super::{GetLogResponse, LogSource};
use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Replays a log response saved with `gatelog fetch --output`.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl LogSource for FileSource {
    fn fetch_log(&self) -> AppResult<GetLogResponse> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            AppError::Source(format!("unable to read {}: {e}", self.path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            AppError::Source(format!("unable to parse {}: {e}", self.path.display()))
        })
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
