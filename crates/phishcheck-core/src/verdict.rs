//! Normalized result of one analysis.

use serde::Serialize;

use crate::dispatch::{DispatchError, TransportKind};
use crate::precheck::Finding;
use crate::validate::{ValidationError, ValidationErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Suspicious,
    Safe,
    Error,
}

impl Outcome {
    /// Banner line shown above the messages.
    pub fn headline(self) -> &'static str {
        match self {
            Outcome::Suspicious => "Warning: This URL shows signs of being potentially malicious!",
            Outcome::Safe => "No obvious signs of phishing detected.",
            Outcome::Error => "The URL could not be analyzed.",
        }
    }

    /// Closing advice line, if the outcome has one.
    pub fn advice(self) -> Option<&'static str> {
        match self {
            Outcome::Suspicious => {
                Some("Exercise caution and verify the source before proceeding.")
            }
            Outcome::Safe => Some("However, always be cautious when clicking on unknown links."),
            Outcome::Error => None,
        }
    }
}

/// Which failure produced an `Error` verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorCause {
    Validation { reason: ValidationErrorKind },
    Transport { transport: TransportKind },
    Backend { status: u32 },
    MalformedResponse,
    UnrecognizedDiscriminator,
    Cancelled,
    Internal,
}

/// Normalized verdict handed to a presentation sink.
///
/// `outcome == Error` exactly when `cause` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub outcome: Outcome,
    /// Human-readable lines, plain text. Sinks escape on output.
    pub messages: Vec<String>,
    /// Trimmed input the verdict is about (may be empty for validation errors).
    pub source_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<ErrorCause>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub local_findings: Vec<Finding>,
}

impl Verdict {
    pub fn suspicious(source_url: impl Into<String>, messages: Vec<String>) -> Self {
        Self::new(Outcome::Suspicious, source_url, messages, None)
    }

    pub fn safe(source_url: impl Into<String>, messages: Vec<String>) -> Self {
        Self::new(Outcome::Safe, source_url, messages, None)
    }

    pub fn error(source_url: impl Into<String>, cause: ErrorCause, message: impl Into<String>) -> Self {
        Self::new(Outcome::Error, source_url, vec![message.into()], Some(cause))
    }

    fn new(
        outcome: Outcome,
        source_url: impl Into<String>,
        messages: Vec<String>,
        cause: Option<ErrorCause>,
    ) -> Self {
        Self {
            outcome,
            messages,
            source_url: source_url.into(),
            cause,
            local_findings: Vec::new(),
        }
    }

    pub fn with_findings(mut self, findings: Vec<Finding>) -> Self {
        self.local_findings = findings;
        self
    }

    pub fn is_error(&self) -> bool {
        self.outcome == Outcome::Error
    }

    /// Error verdict for rejected input.
    pub fn from_validation_error(source_url: &str, err: &ValidationError) -> Self {
        let message = match err.kind {
            ValidationErrorKind::Empty => "Please enter a URL to analyze",
            ValidationErrorKind::Malformed => "Please enter a valid URL",
        };
        Self::error(
            source_url.trim(),
            ErrorCause::Validation { reason: err.kind },
            message,
        )
    }

    /// Error verdict for a failed dispatch.
    pub fn from_dispatch_error(source_url: &str, err: &DispatchError) -> Self {
        match err {
            DispatchError::Transport { kind, .. } => {
                let mut verdict = Self::error(
                    source_url,
                    ErrorCause::Transport { transport: *kind },
                    "Failed to connect to phishing detection server.",
                );
                if *kind == TransportKind::Timeout {
                    verdict
                        .messages
                        .push("The server did not answer in time.".to_string());
                }
                verdict
            }
            DispatchError::Backend { status, message } => {
                let mut verdict = Self::error(
                    source_url,
                    ErrorCause::Backend { status: *status },
                    format!("Error fetching analysis results (HTTP {status})."),
                );
                if let Some(text) = message {
                    verdict.messages.push(format!("Server said: {text}"));
                }
                verdict
            }
            DispatchError::MalformedResponse(_) => Self::error(
                source_url,
                ErrorCause::MalformedResponse,
                "The phishing detection server returned an unexpected response.",
            ),
            DispatchError::Cancelled => {
                Self::error(source_url, ErrorCause::Cancelled, "Analysis was cancelled.")
            }
            DispatchError::Internal(_) => Self::error(
                source_url,
                ErrorCause::Internal,
                "The analysis failed unexpectedly before a result was available.",
            ),
        }
    }
}
