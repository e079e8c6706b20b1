//! HTML result banner. Every interpolated string is escaped.

use std::fmt::Write as _;

use super::PresentationSink;
use crate::validate::escape_html;
use crate::verdict::{Outcome, Verdict};

/// Collects the banner markup for the last rendered verdict.
#[derive(Debug, Default)]
pub struct HtmlSink {
    loading: bool,
    html: Option<String>,
}

impl HtmlSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Markup of the last verdict, if any was rendered.
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    pub fn into_html(self) -> Option<String> {
        self.html
    }
}

impl PresentationSink for HtmlSink {
    fn show_loading(&mut self) {
        self.loading = true;
        self.html = None;
    }

    fn hide_loading(&mut self) {
        self.loading = false;
    }

    fn render(&mut self, verdict: &Verdict) {
        self.html = Some(render_html(verdict));
    }
}

fn banner_class(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Safe => "safe",
        Outcome::Suspicious | Outcome::Error => "danger",
    }
}

fn banner_icon(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Safe => "✓ ",
        Outcome::Suspicious => "⚠️ ",
        Outcome::Error => "",
    }
}

/// Renders the result banner for `verdict`.
pub fn render_html(verdict: &Verdict) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, r#"<div class="result {}">"#, banner_class(verdict.outcome));
    let _ = writeln!(
        out,
        "  <strong>{}{}</strong>",
        banner_icon(verdict.outcome),
        escape_html(verdict.outcome.headline())
    );
    if !verdict.source_url.is_empty() {
        let _ = writeln!(
            out,
            "  <p>Analysis of: {}</p>",
            escape_html(&verdict.source_url)
        );
    }

    match verdict.outcome {
        Outcome::Suspicious => {
            out.push_str("  <p>Detected issues:</p>\n");
            write_list(&mut out, verdict.messages.iter().map(String::as_str));
        }
        Outcome::Safe | Outcome::Error => {
            for message in &verdict.messages {
                let _ = writeln!(out, "  <p>{}</p>", escape_html(message));
            }
        }
    }

    if !verdict.local_findings.is_empty() {
        out.push_str("  <p>Local checks:</p>\n");
        write_list(
            &mut out,
            verdict.local_findings.iter().map(|f| f.message.as_str()),
        );
    }

    if let Some(advice) = verdict.outcome.advice() {
        let _ = writeln!(out, "  <p>{}</p>", escape_html(advice));
    }
    out.push_str("</div>\n");
    out
}

fn write_list<'a>(out: &mut String, items: impl Iterator<Item = &'a str>) {
    out.push_str("  <ul>");
    for item in items {
        let _ = write!(out, "<li>{}</li>", escape_html(item));
    }
    out.push_str("</ul>\n");
}
