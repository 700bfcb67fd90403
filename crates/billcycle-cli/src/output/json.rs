use std::io;

use billcycle_engine::contracts::envelope::failure_from_error;
use billcycle_engine::{EngineError, SuccessEnvelope};
use serde::Serialize;
use serde_json::json;

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    serialize_json_pretty(success)
}

/// Failures omit `ok` so callers can branch on the `error` key alone.
pub fn render_error_json(error: &EngineError) -> io::Result<String> {
    let failure = failure_from_error(error);
    let mut error_value = serde_json::to_value(&failure.error).map_err(io::Error::other)?;
    if let Some(data) = failure.data {
        error_value["data"] = data;
    }
    serialize_json_pretty(&json!({ "error": error_value }))
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}
