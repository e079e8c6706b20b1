//! Input validation: the single canonical URL well-formedness check.
//!
//! Every URL that reaches the dispatcher went through [`validate`]. The check
//! is pure: the same text always yields the same answer.

mod host;
mod sanitize;

pub use host::is_acceptable_host;
pub use sanitize::{escape_html, sanitize_text, MAX_SANITIZED_CHARS};

use host::typed_host;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use url::Url;

/// Scheme assumed when the user typed a bare host such as `example.com`.
const DEFAULT_SCHEME_PREFIX: &str = "http://";

/// Why a piece of input text was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationErrorKind {
    /// Nothing left after trimming.
    Empty,
    /// Text is not a well-formed http(s) URL.
    Malformed,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationErrorKind::Empty => write!(f, "empty"),
            ValidationErrorKind::Malformed => write!(f, "malformed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid URL input: {kind}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    fn empty() -> Self {
        Self {
            kind: ValidationErrorKind::Empty,
        }
    }

    fn malformed() -> Self {
        Self {
            kind: ValidationErrorKind::Malformed,
        }
    }
}

/// A URL that passed [`validate`].
///
/// Keeps the trimmed text exactly as the user typed it (this is what the
/// classifier receives) next to its parsed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidUrl {
    text: String,
    parsed: Url,
}

impl ValidUrl {
    /// Trimmed input text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Parsed URL (scheme filled in when the input had none).
    pub fn url(&self) -> &Url {
        &self.parsed
    }

    /// Normalized host, lowercase and punycode-encoded.
    pub fn host(&self) -> &str {
        self.parsed.host_str().unwrap_or_default()
    }
}

impl fmt::Display for ValidUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Validates raw user input as an http(s) URL.
///
/// Accepts an optional scheme, optional `www.`, a host with a TLD (or an IP
/// literal), and any path/query/fragment.
pub fn validate(text: &str) -> Result<ValidUrl, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty());
    }
    if trimmed
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(ValidationError::malformed());
    }

    let candidate = if has_scheme_prefix(trimmed) {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{trimmed}")
    };

    let parsed = Url::parse(&candidate).map_err(|_| ValidationError::malformed())?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ValidationError::malformed());
    }
    let host = parsed.host().ok_or_else(ValidationError::malformed)?;
    if !is_acceptable_host(&host, typed_host(&candidate)) {
        return Err(ValidationError::malformed());
    }

    Ok(ValidUrl {
        text: trimmed.to_string(),
        parsed,
    })
}

/// True when `text` starts with `scheme://`. A `://` later in the path,
/// query or fragment does not count.
fn has_scheme_prefix(text: &str) -> bool {
    let Some((scheme, _)) = text.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Convenience predicate over [`validate`].
pub fn is_valid_url(text: &str) -> bool {
    validate(text).is_ok()
}
