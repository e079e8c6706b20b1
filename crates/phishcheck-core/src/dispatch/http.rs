//! libcurl-backed dispatcher: one JSON `POST` per call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::abort::AbortToken;
use super::classify::{classify_curl_error, parse_response};
use super::error::{DispatchError, TransportKind};
use super::{ClassificationRequest, Dispatcher, RawResponse};
use crate::config::PipelineConfig;
use crate::validate::ValidUrl;

/// Upper bound on a classifier response body.
const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Sends classification requests to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct CurlDispatcher {
    endpoint: String,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl CurlDispatcher {
    pub fn new(
        endpoint: impl Into<String>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            connect_timeout,
            request_timeout,
        }
    }

    pub fn from_config(cfg: &PipelineConfig) -> Self {
        Self::new(
            cfg.endpoint_url.clone(),
            cfg.connect_timeout,
            cfg.request_timeout,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn configure(&self, easy: &mut curl::easy::Easy, body: &[u8]) -> Result<(), curl::Error> {
        easy.url(&self.endpoint)?;
        easy.post(true)?;
        easy.post_fields_copy(body)?;
        easy.follow_location(false)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.request_timeout)?;
        // Needed for the progress callback that checks the abort token.
        easy.progress(true)?;

        let mut list = curl::easy::List::new();
        list.append("Content-Type: application/json")?;
        list.append("Accept: application/json")?;
        easy.http_headers(list)?;
        Ok(())
    }

    fn post(&self, body: &[u8], abort: &AbortToken) -> Result<(u32, Vec<u8>), DispatchError> {
        let mut response: Vec<u8> = Vec::new();
        let overflowed = AtomicBool::new(false);

        let mut easy = curl::easy::Easy::new();
        self.configure(&mut easy, body).map_err(|e| {
            DispatchError::transport(classify_curl_error(&e), format!("curl setup: {e}"))
        })?;

        if let Err(e) = perform_transfer(&mut easy, &mut response, &overflowed, abort) {
            if abort.is_aborted() || e.is_aborted_by_callback() {
                return Err(DispatchError::Cancelled);
            }
            if overflowed.load(Ordering::Relaxed) {
                return Err(DispatchError::MalformedResponse(format!(
                    "response body exceeds {MAX_RESPONSE_BYTES} bytes"
                )));
            }
            return Err(DispatchError::transport(
                classify_curl_error(&e),
                e.to_string(),
            ));
        }

        let code = easy.response_code().map_err(|e| {
            DispatchError::transport(classify_curl_error(&e), format!("no response code: {e}"))
        })?;
        Ok((code, response))
    }
}

/// Runs the transfer, collecting at most `MAX_RESPONSE_BYTES` of body.
fn perform_transfer(
    easy: &mut curl::easy::Easy,
    response: &mut Vec<u8>,
    overflowed: &AtomicBool,
    abort: &AbortToken,
) -> Result<(), curl::Error> {
    let mut transfer = easy.transfer();
    transfer.write_function(|data| {
        if response.len() + data.len() > MAX_RESPONSE_BYTES {
            overflowed.store(true, Ordering::Relaxed);
            return Ok(0); // abort transfer
        }
        response.extend_from_slice(data);
        Ok(data.len())
    })?;
    // Returning false aborts the transfer with CURLE_ABORTED_BY_CALLBACK.
    transfer.progress_function(|_, _, _, _| !abort.is_aborted())?;
    transfer.perform()
}

impl Dispatcher for CurlDispatcher {
    fn dispatch(&self, url: &ValidUrl, abort: &AbortToken) -> Result<RawResponse, DispatchError> {
        if abort.is_aborted() {
            return Err(DispatchError::Cancelled);
        }
        let body = serde_json::to_vec(&ClassificationRequest::new(url))
            .map_err(|e| DispatchError::transport(TransportKind::Other, e.to_string()))?;

        tracing::debug!(endpoint = %self.endpoint, url = %url, "POST classification request");
        let (status, bytes) = self.post(&body, abort)?;
        tracing::debug!(status, bytes = bytes.len(), "classification response received");

        parse_response(status, &bytes)
    }
}
