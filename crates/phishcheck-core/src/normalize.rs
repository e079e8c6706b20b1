//! Maps a raw classifier response onto a [`Verdict`].
//!
//! The canonical discriminator is the `result` field holding a stringified
//! boolean: `"True"` means phishing, `"False"` means legitimate. A JSON
//! boolean in the same field is read the same way. Anything else is an
//! `Error` verdict, never `Safe`.

use serde_json::Value;

use crate::dispatch::RawResponse;
use crate::validate::{sanitize_text, ValidUrl};
use crate::verdict::{ErrorCause, Verdict};

/// Longest excerpt of an unrecognized value quoted back in a message.
const MAX_SHAPE_EXCERPT: usize = 64;

/// Normalizes a successful response. Total: every input yields a verdict.
pub fn normalize(raw: &RawResponse, url: &ValidUrl) -> Verdict {
    let source = url.as_str();
    match raw.body.result.as_ref().map(read_discriminator) {
        Some(Ok(true)) => Verdict::suspicious(
            source,
            vec!["The backend detected this URL as: phishing".to_string()],
        ),
        Some(Ok(false)) => Verdict::safe(
            source,
            vec!["The backend detected this URL as: legitimate".to_string()],
        ),
        Some(Err(shape)) => unrecognized(source, &format!("`result` was {shape}")),
        None => unrecognized(source, "the `result` field is missing"),
    }
}

fn unrecognized(source: &str, detail: &str) -> Verdict {
    tracing::warn!(detail, "unrecognized classifier response");
    let mut verdict = Verdict::error(
        source,
        ErrorCause::UnrecognizedDiscriminator,
        "The phishing detection server returned an unrecognized classification.",
    );
    verdict.messages.push(format!("Details: {detail}"));
    verdict
}

/// `Ok(true)` for phishing, `Ok(false)` for legitimate, `Err(shape)` otherwise.
fn read_discriminator(value: &Value) -> Result<bool, String> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(format!(
                "the string \"{}\"",
                sanitize_text(s, MAX_SHAPE_EXCERPT)
            )),
        },
        Value::Null => Err("null".to_string()),
        Value::Number(n) => Err(format!("the number {n}")),
        Value::Array(_) => Err("an array".to_string()),
        Value::Object(_) => Err("an object".to_string()),
    }
}
