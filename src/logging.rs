// src/logging.rs

use crate::errors::{ParleyError, ParleyResult};
use chrono::{DateTime, Utc};
use flexi_logger::{FileSpec, Logger, LoggerHandle, WriteMode};

/// Records one round trip to the answer service.
#[derive(Debug)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}

/// Starts the file logger. Output must never reach stdout while the
/// terminal is in raw mode, so everything goes to `parley.log`.
pub fn init(log_level: &str) -> ParleyResult<LoggerHandle> {
    Logger::try_with_str(log_level)
        .map_err(|e| ParleyError::config_error(format!("invalid log level: {}", e)))?
        .log_to_file(FileSpec::default().basename("parley").suppress_timestamp())
        .write_mode(WriteMode::BufferAndFlush)
        .start()
        .map_err(|e| ParleyError::config_error(format!("failed to start logger: {}", e)))
}

/// Logs an answer-service call to the log file.
pub fn log_api_call(call: &ApiCallLog) {
    log::info!(
        "[{}] {} - {} - Status: {} - Time: {}ms",
        call.timestamp.to_rfc3339(),
        call.endpoint,
        call.request_summary,
        call.response_status,
        call.response_time_ms
    );
}
