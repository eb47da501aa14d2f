use crate::errors::{AppError, AppResult};
use crate::utils::path::{default_search_dirs, find_config_file};
use crate::utils::time::Zone;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

// Environment variables
pub const ENV_SERVER_ADDRESS: &str = "PALGATE_SERVER_ADDRESS";
pub const ENV_GATE_ID: &str = "PALGATE_GATE_ID";
pub const ENV_AUTH_TOKEN: &str = "PALGATE_AUTH_TOKEN";
pub const ENV_TIMEZONE: &str = "GATELOG_TIMEZONE";
pub const ENV_HTTP_TIMEOUT: &str = "GATELOG_HTTP_TIMEOUT_SECS";
pub const ENV_BACKEND: &str = "GATELOG_ARCHIVE_BACKEND";
pub const ENV_SPREADSHEET_ID: &str = "GATELOG_SPREADSHEET_ID";
pub const ENV_SHEET_NAME: &str = "GATELOG_SHEET_NAME";
pub const ENV_SHEET_ID: &str = "GATELOG_SHEET_ID";
pub const ENV_SHEETS_TOKEN: &str = "GATELOG_SHEETS_TOKEN";
pub const ENV_SHEETS_API_BASE: &str = "GATELOG_SHEETS_API_BASE";
pub const ENV_CSV_PATH: &str = "GATELOG_CSV_PATH";

const REDACTED: &str = "********";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // camelCase spellings used by existing .palgate files are accepted too.
    #[serde(
        default = "default_server_address",
        alias = "serverAddress",
        alias = "serveraddress"
    )]
    pub server_address: String,
    #[serde(default, alias = "gateID", alias = "gateId", alias = "gateid")]
    pub gate_id: String,
    #[serde(default, alias = "authToken", alias = "authtoken")]
    pub auth_token: String,
    #[serde(default)]
    pub timezone: Zone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_timeout_secs: Option<u64>,
    #[serde(default)]
    pub archive: ArchiveConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Sheets,
    Csv,
}

impl BackendKind {
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sheets" => Some(BackendKind::Sheets),
            "csv" => Some(BackendKind::Csv),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    #[serde(default)]
    pub sheet_id: i64,
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub csv_path: String,
}

fn default_server_address() -> String {
    "api1.pal-es.com".to_string()
}
fn default_sheet_name() -> String {
    "Sheet1".to_string()
}
fn default_api_base() -> String {
    "https://sheets.googleapis.com".to_string()
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            spreadsheet_id: String::new(),
            sheet_name: default_sheet_name(),
            sheet_id: 0,
            access_token: String::new(),
            api_base: default_api_base(),
            csv_path: String::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: default_server_address(),
            gate_id: String::new(),
            auth_token: String::new(),
            timezone: Zone::default(),
            http_timeout_secs: None,
            archive: ArchiveConfig::default(),
        }
    }
}

impl Config {
    /// Path written by `gatelog init` when no `--config` is given.
    pub fn default_file() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".palgate.yaml")
    }

    /// Locate the configuration file: the explicit path when given,
    /// otherwise the first `.palgate*` file in the working or home directory.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(&default_search_dirs()),
        }
    }

    /// Load file settings and overlay the process environment.
    ///
    /// A missing file (when none was asked for explicitly) yields defaults.
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        let content = match Self::locate(explicit) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "reading configuration file");
                Some(fs::read_to_string(&path).map_err(|e| {
                    AppError::Config(format!("error reading config file {}: {e}", path.display()))
                })?)
            }
            None => None,
        };

        Self::resolve(content.as_deref(), |key| std::env::var(key).ok())
    }

    /// Build a config from optional YAML text and an environment lookup.
    pub fn resolve<F>(yaml: Option<&str>, env: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match yaml {
            Some(text) if !text.trim().is_empty() => serde_yaml::from_str(text)
                .map_err(|e| AppError::Config(format!("error parsing config file: {e}")))?,
            _ => Config::default(),
        };
        cfg.apply_env(env)?;
        Ok(cfg)
    }

    // Empty variables count as unset.
    fn apply_env<F>(&mut self, env: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_SERVER_ADDRESS) {
            self.server_address = v;
        }
        if let Some(v) = get(ENV_GATE_ID) {
            self.gate_id = v;
        }
        if let Some(v) = get(ENV_AUTH_TOKEN) {
            self.auth_token = v;
        }
        if let Some(v) = get(ENV_TIMEZONE) {
            self.timezone = Zone::from_str_opt(&v)
                .ok_or_else(|| AppError::Config(format!("invalid {ENV_TIMEZONE}: {v}")))?;
        }
        if let Some(v) = get(ENV_HTTP_TIMEOUT) {
            let secs = v
                .trim()
                .parse::<u64>()
                .map_err(|_| AppError::Config(format!("invalid {ENV_HTTP_TIMEOUT}: {v}")))?;
            self.http_timeout_secs = Some(secs);
        }
        if let Some(v) = get(ENV_BACKEND) {
            self.archive.backend = BackendKind::from_str_opt(&v)
                .ok_or_else(|| AppError::Config(format!("invalid {ENV_BACKEND}: {v}")))?;
        }
        if let Some(v) = get(ENV_SPREADSHEET_ID) {
            self.archive.spreadsheet_id = v;
        }
        if let Some(v) = get(ENV_SHEET_NAME) {
            self.archive.sheet_name = v;
        }
        if let Some(v) = get(ENV_SHEET_ID) {
            self.archive.sheet_id = v
                .trim()
                .parse::<i64>()
                .map_err(|_| AppError::Config(format!("invalid {ENV_SHEET_ID}: {v}")))?;
        }
        if let Some(v) = get(ENV_SHEETS_TOKEN) {
            self.archive.access_token = v;
        }
        if let Some(v) = get(ENV_SHEETS_API_BASE) {
            self.archive.api_base = v;
        }
        if let Some(v) = get(ENV_CSV_PATH) {
            self.archive.csv_path = v;
        }
        Ok(())
    }

    /// Check the settings needed to talk to the gate server.
    pub fn validate_source(&self) -> AppResult<()> {
        if self.server_address.trim().is_empty() {
            return Err(AppError::Config("missing server address".into()));
        }
        if self.gate_id.trim().is_empty() {
            return Err(AppError::Config("missing gate ID".into()));
        }
        if self.auth_token.trim().is_empty() {
            return Err(AppError::Config("missing auth token".into()));
        }
        Ok(())
    }

    /// Check that every setting required for an archive run is present.
    pub fn validate(&self) -> AppResult<()> {
        self.validate_source()?;

        match self.archive.backend {
            BackendKind::Sheets => {
                if self.archive.spreadsheet_id.trim().is_empty() {
                    return Err(AppError::Config("missing spreadsheet ID".into()));
                }
                if self.archive.sheet_name.trim().is_empty() {
                    return Err(AppError::Config("missing sheet name".into()));
                }
                if self.archive.access_token.trim().is_empty() {
                    return Err(AppError::Config("missing Google Sheets access token".into()));
                }
            }
            BackendKind::Csv => {
                if self.archive.csv_path.trim().is_empty() {
                    return Err(AppError::Config("missing CSV archive path".into()));
                }
            }
        }

        Ok(())
    }

    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_secs.map(Duration::from_secs)
    }

    /// Copy with secrets masked, for printing.
    pub fn redacted(&self) -> Self {
        let mut out = self.clone();
        if !out.auth_token.is_empty() {
            out.auth_token = REDACTED.to_string();
        }
        if !out.archive.access_token.is_empty() {
            out.archive.access_token = REDACTED.to_string();
        }
        out
    }

    /// Write a configuration template to `path`.
    pub fn init_file(path: &Path, force: bool) -> AppResult<()> {
        if path.exists() && !force {
            return Err(AppError::Config(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&Config::default())?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }
}
