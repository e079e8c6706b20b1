//! Classify curl errors and HTTP responses into dispatch outcomes.

use super::error::{DispatchError, TransportKind};
use super::{PredictionBody, RawResponse};
use crate::validate::{sanitize_text, MAX_SANITIZED_CHARS};

/// Classify a curl error into a transport failure kind.
pub fn classify_curl_error(e: &curl::Error) -> TransportKind {
    if e.is_operation_timedout() {
        return TransportKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_ssl_connect_error()
        || e.is_peer_failed_verification()
    {
        return TransportKind::Connection;
    }
    TransportKind::Other
}

/// Turns a completed HTTP exchange into a [`RawResponse`] or the matching error.
///
/// Non-2xx statuses become [`DispatchError::Backend`] regardless of the body;
/// the body only contributes an optional `error` message. A 2xx body must be
/// a JSON object.
pub fn parse_response(status: u32, body: &[u8]) -> Result<RawResponse, DispatchError> {
    if !(200..300).contains(&status) {
        return Err(DispatchError::Backend {
            status,
            message: backend_error_message(body),
        });
    }

    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| DispatchError::MalformedResponse(format!("invalid JSON: {e}")))?;
    if !value.is_object() {
        return Err(DispatchError::MalformedResponse(format!(
            "expected a JSON object, got {}",
            json_type_name(&value)
        )));
    }
    let body: PredictionBody = serde_json::from_value(value)
        .map_err(|e| DispatchError::MalformedResponse(format!("unexpected fields: {e}")))?;

    Ok(RawResponse { status, body })
}

/// Extracts the sanitized `error` string from a failure body, if present.
fn backend_error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let message = value.get("error")?.as_str()?;
    let cleaned = sanitize_text(message, MAX_SANITIZED_CHARS);
    (!cleaned.is_empty()).then_some(cleaned)
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
