//! The classification request pipeline.
//!
//! validate → pre-check → dispatch → normalize → timing guard → sink.
//! Every failure is folded into an `Error` verdict; nothing escapes as a
//! Rust error. Each call is independent and shares no mutable state with
//! other calls.

use std::sync::Arc;
use tokio::time::Instant;

use crate::config::PipelineConfig;
use crate::dispatch::{AbortToken, DispatchError, Dispatcher, RawResponse};
use crate::normalize::normalize;
use crate::precheck::{PrecheckMode, RuleChain};
use crate::sink::PresentationSink;
use crate::timing::ensure_minimum_duration;
use crate::validate::{validate, ValidUrl};
use crate::verdict::Verdict;

pub struct Pipeline<D> {
    config: PipelineConfig,
    dispatcher: Arc<D>,
    rules: RuleChain,
}

impl<D: Dispatcher> Pipeline<D> {
    pub fn new(config: PipelineConfig, dispatcher: D, rules: RuleChain) -> Self {
        Self::with_shared(config, Arc::new(dispatcher), rules)
    }

    /// Builds a pipeline around a dispatcher shared with other pipelines.
    pub fn with_shared(config: PipelineConfig, dispatcher: Arc<D>, rules: RuleChain) -> Self {
        Self {
            config,
            dispatcher,
            rules,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Analyzes `input` and delivers the verdict to `sink`.
    pub async fn analyze<S>(&self, input: &str, sink: &mut S) -> Verdict
    where
        S: PresentationSink + ?Sized,
    {
        self.analyze_with_abort(input, sink, &AbortToken::new())
            .await
    }

    /// Like [`Pipeline::analyze`], but the request can be cancelled through `abort`.
    pub async fn analyze_with_abort<S>(
        &self,
        input: &str,
        sink: &mut S,
        abort: &AbortToken,
    ) -> Verdict
    where
        S: PresentationSink + ?Sized,
    {
        let url = match validate(input) {
            Ok(url) => url,
            Err(err) => {
                tracing::debug!(reason = %err.kind, "input rejected before dispatch");
                let verdict = Verdict::from_validation_error(input, &err);
                sink.render(&verdict);
                return verdict;
            }
        };

        let findings = match self.config.precheck {
            PrecheckMode::Off => Vec::new(),
            PrecheckMode::Advisory | PrecheckMode::ShortCircuit => self.rules.evaluate(&url),
        };
        if self.config.precheck == PrecheckMode::ShortCircuit && !findings.is_empty() {
            tracing::info!(url = %url, findings = findings.len(), "local pre-check short-circuit");
            let verdict = Verdict::suspicious(
                url.as_str(),
                vec!["Local checks flagged this URL; the classifier was not contacted.".to_string()],
            )
            .with_findings(findings);
            sink.render(&verdict);
            return verdict;
        }

        sink.show_loading();
        let start = Instant::now();

        let verdict = match self.dispatch(url.clone(), abort.clone()).await {
            Ok(raw) => normalize(&raw, &url),
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "classification request failed");
                Verdict::from_dispatch_error(url.as_str(), &err)
            }
        }
        .with_findings(findings);

        let padded = ensure_minimum_duration(start, self.config.min_display).await;
        sink.hide_loading();
        tracing::info!(
            url = %url,
            outcome = ?verdict.outcome,
            elapsed_ms = start.elapsed().as_millis() as u64,
            padded_ms = padded.as_millis() as u64,
            "analysis finished"
        );
        sink.render(&verdict);
        verdict
    }

    /// Runs the blocking dispatcher on tokio's blocking pool.
    async fn dispatch(&self, url: ValidUrl, abort: AbortToken) -> Result<RawResponse, DispatchError> {
        let dispatcher = Arc::clone(&self.dispatcher);
        tokio::task::spawn_blocking(move || dispatcher.dispatch(&url, &abort))
            .await
            .unwrap_or_else(|e| {
                Err(DispatchError::Internal(format!(
                    "dispatch task failed: {e}"
                )))
            })
    }
}
