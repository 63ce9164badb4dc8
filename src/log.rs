use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::{handler::Error, utils};

/// Emits one structured line per invocation.
pub fn log_invocation(request_id: &str, status_code: u16, handler_error: Option<&Error>) {
    let logline = LogLine::new(request_id, status_code, handler_error);

    info!("LOGLINE: {}", json!(logline));
}

#[derive(Debug, Serialize)]
pub(crate) struct LogLine {
    timestamp: String,
    request_id: String,
    status_code: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_data: Option<String>,
}

impl LogLine {
    pub(crate) fn new(request_id: &str, status_code: u16, handler_error: Option<&Error>) -> Self {
        LogLine {
            timestamp: chrono::Utc::now().to_rfc3339(),
            request_id: request_id.to_string(),
            status_code,
            error_type: handler_error.map(|er| er.as_ref().to_string()),
            error_data: handler_error.map(utils::error_chain),
        }
    }
}
