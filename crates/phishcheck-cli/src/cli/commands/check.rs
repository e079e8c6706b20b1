//! `phishcheck check [URL]` – analyze one URL through the pipeline.

use anyhow::{Context, Result};
use phishcheck_core::config::PhishcheckConfig;
use phishcheck_core::dispatch::CurlDispatcher;
use phishcheck_core::pipeline::Pipeline;
use phishcheck_core::precheck::{PrecheckMode, RuleChain};
use phishcheck_core::verdict::Outcome;

use crate::cli::terminal::TerminalSink;
use crate::cli::{OutputFormat, EXIT_ERROR, EXIT_SAFE, EXIT_SUSPICIOUS};

/// Flags of `check` that override the loaded config.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub url: Option<String>,
    pub endpoint: Option<String>,
    pub min_display_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub format: OutputFormat,
    pub precheck: Option<PrecheckMode>,
}

pub async fn run_check(cfg: &PhishcheckConfig, opts: CheckOptions) -> Result<i32> {
    let cfg = apply_overrides(cfg, &opts)?;
    let input = match opts.url {
        Some(url) => url,
        None => read_stdin_line()?,
    };

    let runtime = cfg.pipeline_config();
    let dispatcher = CurlDispatcher::from_config(&runtime);
    let rules = RuleChain::builtin().context("compile built-in pre-check rules")?;
    let pipeline = Pipeline::new(runtime, dispatcher, rules);

    let mut sink = TerminalSink::stdio(opts.format);
    let verdict = pipeline.analyze(&input, &mut sink).await;
    Ok(exit_code(verdict.outcome))
}

/// Config with the command-line overrides applied and re-validated.
pub(crate) fn apply_overrides(
    cfg: &PhishcheckConfig,
    opts: &CheckOptions,
) -> Result<PhishcheckConfig> {
    let mut cfg = cfg.clone();
    if let Some(endpoint) = &opts.endpoint {
        cfg.endpoint_url = endpoint.clone();
    }
    if let Some(ms) = opts.min_display_ms {
        cfg.min_display_millis = ms;
    }
    if let Some(secs) = opts.timeout_secs {
        cfg.request_timeout_secs = secs;
    }
    if let Some(mode) = opts.precheck {
        cfg.precheck = mode;
    }
    cfg.validate().context("invalid check options")?;
    Ok(cfg)
}

pub(crate) fn exit_code(outcome: Outcome) -> i32 {
    match outcome {
        Outcome::Safe => EXIT_SAFE,
        Outcome::Suspicious => EXIT_SUSPICIOUS,
        Outcome::Error => EXIT_ERROR,
    }
}

fn read_stdin_line() -> Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("read URL from stdin")?;
    Ok(line)
}
