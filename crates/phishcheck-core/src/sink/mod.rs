//! Presentation sinks: where verdicts go.
//!
//! The pipeline calls `show_loading` when dispatch starts, `hide_loading`
//! once the minimum display time has passed, then `render` with the verdict.
//! Rejected input and short-circuited pre-checks go straight to `render`.

mod html;

pub use html::{render_html, HtmlSink};

use crate::verdict::Verdict;

pub trait PresentationSink {
    fn show_loading(&mut self);
    fn hide_loading(&mut self);
    fn render(&mut self, verdict: &Verdict);
}
