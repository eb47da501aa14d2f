pub mod log_record;
pub mod row;

pub use log_record::{LogRecord, OperationStatus, OperationType};
pub use row::{HEADERS, ROW_WIDTH, Row};
