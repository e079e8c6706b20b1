//! Terminal presentation: status line on stderr, verdict on stdout.

use std::io::Write;

use phishcheck_core::sink::{render_html, PresentationSink};
use phishcheck_core::validate::{sanitize_text, MAX_SANITIZED_CHARS};
use phishcheck_core::verdict::{Outcome, Verdict};

use super::OutputFormat;

pub struct TerminalSink<O: Write, E: Write> {
    out: O,
    status: E,
    format: OutputFormat,
}

impl TerminalSink<std::io::Stdout, std::io::Stderr> {
    pub fn stdio(format: OutputFormat) -> Self {
        Self::new(std::io::stdout(), std::io::stderr(), format)
    }
}

impl<O: Write, E: Write> TerminalSink<O, E> {
    pub fn new(out: O, status: E, format: OutputFormat) -> Self {
        Self {
            out,
            status,
            format,
        }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (O, E) {
        (self.out, self.status)
    }
}

// Output errors (e.g. a closed pipe) are not worth failing the analysis over.
impl<O: Write, E: Write> PresentationSink for TerminalSink<O, E> {
    fn show_loading(&mut self) {
        if self.format == OutputFormat::Text {
            let _ = writeln!(self.status, "Analyzing...");
        }
    }

    fn hide_loading(&mut self) {
        let _ = self.status.flush();
    }

    fn render(&mut self, verdict: &Verdict) {
        let rendered = match self.format {
            OutputFormat::Text => render_text(verdict),
            OutputFormat::Json => match serde_json::to_string_pretty(verdict) {
                Ok(json) => json + "\n",
                Err(e) => {
                    tracing::error!("failed to serialize verdict: {e}");
                    return;
                }
            },
            OutputFormat::Html => render_html(verdict),
        };
        let _ = self.out.write_all(rendered.as_bytes());
        let _ = self.out.flush();
    }
}

/// Plain-text verdict, one item per line.
pub fn render_text(verdict: &Verdict) -> String {
    let mut lines = Vec::new();
    let icon = match verdict.outcome {
        Outcome::Safe => "✓ ",
        Outcome::Suspicious => "⚠️ ",
        Outcome::Error => "",
    };
    lines.push(format!("{icon}{}", verdict.outcome.headline()));
    if !verdict.source_url.is_empty() {
        // Rejected input reaches here verbatim and may carry escape sequences.
        lines.push(format!(
            "Analysis of: {}",
            sanitize_text(&verdict.source_url, MAX_SANITIZED_CHARS)
        ));
    }
    if verdict.outcome == Outcome::Suspicious {
        lines.push("Detected issues:".to_string());
        lines.extend(verdict.messages.iter().map(|m| format!("  - {m}")));
    } else {
        lines.extend(verdict.messages.iter().cloned());
    }
    if !verdict.local_findings.is_empty() {
        lines.push("Local checks:".to_string());
        lines.extend(
            verdict
                .local_findings
                .iter()
                .map(|f| format!("  - {} ({})", f.message, f.rule)),
        );
    }
    if let Some(advice) = verdict.outcome.advice() {
        lines.push(advice.to_string());
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
