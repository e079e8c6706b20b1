//! Dispatch error type. Each variant is a distinct failure signal for the
//! normalizer.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Network-level failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Connect or whole-request timeout elapsed.
    Timeout,
    /// DNS, refused connection, reset, TLS handshake.
    Connection,
    Other,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Timeout => write!(f, "timeout"),
            TransportKind::Connection => write!(f, "connection"),
            TransportKind::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The request never produced an HTTP response.
    #[error("transport failure ({kind}): {detail}")]
    Transport { kind: TransportKind, detail: String },
    /// Non-2xx status; `message` is the sanitized `error` field, if any.
    #[error("backend returned HTTP {status}")]
    Backend { status: u32, message: Option<String> },
    /// 2xx response whose body is not the expected JSON object.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// The abort token was set while the request was in flight.
    #[error("request cancelled")]
    Cancelled,
    /// The dispatch task itself failed (panicked or was torn down) before
    /// any outcome was known.
    #[error("dispatch failed internally: {0}")]
    Internal(String),
}

impl DispatchError {
    pub fn transport(kind: TransportKind, detail: impl Into<String>) -> Self {
        DispatchError::Transport {
            kind,
            detail: detail.into(),
        }
    }
}
