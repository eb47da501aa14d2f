use super::log_record::LogRecord;
use crate::errors::{AppError, AppResult};
use crate::utils::time::{Zone, split_timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of columns in an archive row.
pub const ROW_WIDTH: usize = 8;

/// Column headers, in archive order.
pub const HEADERS: [&str; ROW_WIDTH] = [
    "Date",
    "Time",
    "Type",
    "Status",
    "Serial",
    "User ID",
    "Last Name",
    "First Name",
];

/// One archive row. Field order matches the column order of the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub date: String,       // ⇔ column A, D/M/Y
    pub time: String,       // ⇔ column B, HH:MM:SS
    pub kind: String,       // ⇔ column C, operation type label
    pub status: String,     // ⇔ column D, operation status label
    pub serial: String,     // ⇔ column E
    pub user_id: String,    // ⇔ column F
    pub last_name: String,  // ⇔ column G
    pub first_name: String, // ⇔ column H
}

impl Row {
    /// Build the archive row for a fetched record, rendering its timestamp in `zone`.
    pub fn from_record(record: &LogRecord, zone: Zone) -> AppResult<Self> {
        let (date, time) = split_timestamp(record.timestamp, zone)?;
        Ok(Self {
            date,
            time,
            kind: record.kind.label().to_string(),
            status: record.status.label().to_string(),
            serial: record.serial_number.clone(),
            user_id: record.user_id.clone(),
            last_name: record.last_name.clone(),
            first_name: record.first_name.clone(),
        })
    }

    pub fn from_records(records: &[LogRecord], zone: Zone) -> AppResult<Vec<Self>> {
        records.iter().map(|r| Self::from_record(r, zone)).collect()
    }

    /// Convert untyped backend cells into a row.
    ///
    /// The cells are validated first, then defaultized: null cells and
    /// missing trailing cells become empty strings.
    pub fn from_cells(cells: &[Value]) -> AppResult<Self> {
        validate_cells(cells)?;

        let mut fields: [String; ROW_WIDTH] = Default::default();
        for (slot, cell) in fields.iter_mut().zip(cells) {
            if let Value::String(s) = cell {
                slot.clone_from(s);
            }
        }

        let [
            date,
            time,
            kind,
            status,
            serial,
            user_id,
            last_name,
            first_name,
        ] = fields;

        Ok(Self {
            date,
            time,
            kind,
            status,
            serial,
            user_id,
            last_name,
            first_name,
        })
    }

    /// Cell values in column order.
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.time.clone(),
            self.kind.clone(),
            self.status.clone(),
            self.serial.clone(),
            self.user_id.clone(),
            self.last_name.clone(),
            self.first_name.clone(),
        ]
    }

    pub fn is_empty(&self) -> bool {
        [
            &self.date,
            &self.time,
            &self.kind,
            &self.status,
            &self.serial,
            &self.user_id,
            &self.last_name,
            &self.first_name,
        ]
        .iter()
        .all(|f| f.is_empty())
    }

    /// Fields that decide the archive order, most significant first.
    pub fn order_key(&self) -> (&str, &str, &str, &str, &str) {
        (
            &self.date,
            &self.time,
            &self.user_id,
            &self.status,
            &self.kind,
        )
    }

    /// True when `self` sorts strictly after `other`.
    ///
    /// Date, time, user id, status and type are compared as plain strings
    /// in that priority. Rows equal on all five are not after each other.
    pub fn is_after(&self, other: &Row) -> bool {
        self.order_key() > other.order_key()
    }
}

/// Structural check of a raw backend row: at most [`ROW_WIDTH`] cells,
/// each a string or null.
pub fn validate_cells(cells: &[Value]) -> AppResult<()> {
    if cells.len() > ROW_WIDTH {
        return Err(AppError::InvalidRow(format!(
            "invalid number of row elements: {}",
            cells.len()
        )));
    }

    for (i, cell) in cells.iter().enumerate() {
        match cell {
            Value::Null | Value::String(_) => {}
            other => {
                return Err(AppError::InvalidRow(format!(
                    "invalid value at row element {i}: {other}"
                )));
            }
        }
    }

    Ok(())
}
