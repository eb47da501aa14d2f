use serde::{Deserialize, Deserializer, Serialize};

/// Outcome code of a gate operation (`operation` in the API payload).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OperationStatus {
    Success,
    BadSignal,
    Undefined,
    Other(String),
}

impl OperationStatus {
    pub fn from_code(code: &str) -> Self {
        match code {
            "sr1" => Self::Success,
            "sr13" => Self::BadSignal,
            "srundefined" => Self::Undefined,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Success => "sr1",
            Self::BadSignal => "sr13",
            Self::Undefined => "srundefined",
            Self::Other(code) => code,
        }
    }

    /// Human readable label stored in the archive.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::BadSignal => "Bad Signal",
            Self::Undefined => "Undefined",
            Self::Other(_) => "Unknown",
        }
    }
}

// A record without an operation code is labeled "Unknown".
impl Default for OperationStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for OperationStatus {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<OperationStatus> for String {
    fn from(status: OperationStatus) -> Self {
        status.code().to_string()
    }
}

/// How the gate was opened (`type` in the API payload).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum OperationType {
    Dial,
    RemoteControl,
    Application,
    Other(i64),
}

impl OperationType {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Dial,
            2 => Self::RemoteControl,
            100 => Self::Application,
            other => Self::Other(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Dial => 1,
            Self::RemoteControl => 2,
            Self::Application => 100,
            Self::Other(code) => *code,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dial => "Dial",
            Self::RemoteControl => "Remote Control",
            Self::Application => "Application",
            Self::Other(_) => "Unknown",
        }
    }
}

impl Default for OperationType {
    fn default() -> Self {
        Self::Other(0)
    }
}

impl From<i64> for OperationType {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

impl From<OperationType> for i64 {
    fn from(kind: OperationType) -> Self {
        kind.code()
    }
}

/// One physical gate event as returned by the log endpoint.
///
/// A missing or `null` field decodes as its default, so one incomplete
/// record never fails the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "userId", default, deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(rename = "operation", default, deserialize_with = "null_as_default")]
    pub status: OperationStatus,
    #[serde(rename = "time", default, deserialize_with = "null_as_default")]
    pub timestamp: i64,
    #[serde(
        rename = "firstname",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub first_name: String,
    #[serde(
        rename = "lastname",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reason: i64,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: OperationType,
    #[serde(rename = "sn", default, deserialize_with = "null_as_default")]
    pub serial_number: String,
}

// Gates without a registered user send `null` names.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
