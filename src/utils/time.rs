//! Time utilities: unix timestamp decomposition into the archive's
//! date and time columns.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Day/month/year without zero padding, e.g. `2/1/2024`.
pub const DATE_FORMAT: &str = "%-d/%-m/%Y";

/// 24h clock, zero padded, e.g. `09:05:00`.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Time zone used to render record timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    #[default]
    Local,
    Utc,
}

impl Zone {
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "local" => Some(Zone::Local),
            "utc" => Some(Zone::Utc),
            _ => None,
        }
    }

    /// Wall-clock date and time of `timestamp` in this zone.
    pub fn wall_clock(&self, timestamp: i64) -> AppResult<NaiveDateTime> {
        match self {
            Zone::Local => in_zone(&Local, timestamp),
            Zone::Utc => in_zone(&Utc, timestamp),
        }
    }
}

fn in_zone<Tz: TimeZone>(tz: &Tz, timestamp: i64) -> AppResult<NaiveDateTime> {
    let utc = DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| AppError::Source(format!("timestamp out of range: {timestamp}")))?;
    Ok(utc.with_timezone(tz).naive_local())
}

/// Returns the `(date, time)` column pair for a unix timestamp.
pub fn split_timestamp(timestamp: i64, zone: Zone) -> AppResult<(String, String)> {
    let dt = zone.wall_clock(timestamp)?;
    Ok((
        dt.format(DATE_FORMAT).to_string(),
        dt.format(TIME_FORMAT).to_string(),
    ))
}
