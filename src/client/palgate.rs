use super::{GetLogResponse, LogSource};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use reqwest::blocking::Client;
use std::time::Duration;

const AUTH_TOKEN_HEADER: &str = "x-bt-user-token";
const GET_LOG_PATH: &str = "/v1/bt/user/log";
const GET_LOG_PARAM_ID: &str = "id";

/// Blocking HTTP client for the PalGate log endpoint.
#[derive(Debug, Clone)]
pub struct PalGateClient {
    client: Client,
    base_url: String,
    gate_id: String,
    auth_token: String,
}

impl PalGateClient {
    pub fn new(
        server_address: &str,
        gate_id: impl Into<String>,
        auth_token: impl Into<String>,
        timeout: Option<Duration>,
    ) -> AppResult<Self> {
        if server_address.trim().is_empty() {
            return Err(AppError::Config("missing server address".into()));
        }

        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Source(format!("http client build failed: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url(server_address),
            gate_id: gate_id.into(),
            auth_token: auth_token.into(),
        })
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Self::new(
            &cfg.server_address,
            cfg.gate_id.clone(),
            cfg.auth_token.clone(),
            cfg.http_timeout(),
        )
    }

    pub fn log_url(&self) -> String {
        format!("{}{}", self.base_url, GET_LOG_PATH)
    }
}

impl LogSource for PalGateClient {
    fn fetch_log(&self) -> AppResult<GetLogResponse> {
        tracing::debug!(url = %self.log_url(), gate = %self.gate_id, "requesting gate log");

        let response = self
            .client
            .get(self.log_url())
            .query(&[(GET_LOG_PARAM_ID, self.gate_id.as_str())])
            .header(AUTH_TOKEN_HEADER, &self.auth_token)
            .send()
            .map_err(|e| AppError::Source(format!("error executing HTTP request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Source(format!(
                "error response from server: {status}"
            )));
        }

        let body: GetLogResponse = response
            .json()
            .map_err(|e| AppError::Source(format!("error parsing response body: {e}")))?;

        tracing::debug!(
            records = body.records.len(),
            status = body.status.as_str(),
            "gate log received"
        );
        Ok(body)
    }

    fn describe(&self) -> String {
        format!("PalGate server {}", self.base_url)
    }
}

/// Addresses without a scheme are contacted over HTTPS.
fn base_url(server_address: &str) -> String {
    let trimmed = server_address.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}
