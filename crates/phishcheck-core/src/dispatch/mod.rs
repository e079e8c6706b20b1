//! Request dispatch to the remote prediction endpoint.
//!
//! One `POST {"url": ...}` per analysis, no retry and no caching. The
//! [`Dispatcher`] trait is the seam between the pipeline and the network:
//! [`CurlDispatcher`] talks HTTP through libcurl, tests plug in fakes.

mod abort;
mod classify;
mod http;
mod error;

pub use abort::AbortToken;
pub use classify::{classify_curl_error, parse_response};
pub use http::CurlDispatcher;
pub use error::{DispatchError, TransportKind};

use serde::{Deserialize, Serialize};

use crate::validate::ValidUrl;

/// Request body sent to the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationRequest<'a> {
    pub url: &'a str,
}

impl<'a> ClassificationRequest<'a> {
    pub fn new(url: &'a ValidUrl) -> Self {
        Self { url: url.as_str() }
    }
}

/// Decoded JSON object returned by the classifier.
///
/// Only the fields the client understands are kept; unknown fields are
/// ignored so the backend can add data without breaking clients.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PredictionBody {
    /// Discriminator: stringified boolean, `"True"` meaning phishing.
    pub result: Option<serde_json::Value>,
    /// Error description some backends attach to failures.
    pub error: Option<String>,
}

/// A success response: 2xx status plus a decoded JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u32,
    pub body: PredictionBody,
}

/// Issues one classification request and blocks until it completes.
///
/// Implementations must honour `abort` and return
/// [`DispatchError::Cancelled`] once it is set. The pipeline calls this on
/// tokio's blocking pool.
pub trait Dispatcher: Send + Sync + 'static {
    fn dispatch(&self, url: &ValidUrl, abort: &AbortToken) -> Result<RawResponse, DispatchError>;
}
