//! CLI for the phishcheck URL classifier client.

mod commands;
mod terminal;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use phishcheck_core::config::{self, PhishcheckConfig};
use phishcheck_core::precheck::PrecheckMode;
use std::path::{Path, PathBuf};

use commands::{
    run_check, run_completions, run_config, run_man, run_rules, run_validate, CheckOptions,
};

/// Exit status for a `Safe` verdict.
pub const EXIT_SAFE: i32 = 0;
/// Exit status for an `Error` verdict or a failed command.
pub const EXIT_ERROR: i32 = 1;
/// Exit status for a `Suspicious` verdict.
pub const EXIT_SUSPICIOUS: i32 = 2;

/// Top-level CLI for phishcheck.
#[derive(Debug, Parser)]
#[command(name = "phishcheck")]
#[command(about = "phishcheck: ask a phishing classifier whether a URL looks malicious", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the XDG config path.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// How `check` prints its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Analyze a URL. Exit status: 0 safe, 2 suspicious, 1 error.
    Check {
        /// URL to analyze. Read from the first line of stdin when omitted.
        url: Option<String>,

        /// Prediction endpoint, overriding the config file.
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,

        /// Minimum time in milliseconds the "Analyzing..." state is shown.
        #[arg(long, value_name = "N")]
        min_display_ms: Option<u64>,

        /// Whole-request timeout in seconds.
        #[arg(long, value_name = "N")]
        timeout_secs: Option<u64>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Local pre-check mode: off, advisory or short-circuit.
        #[arg(long, value_name = "MODE")]
        precheck: Option<PrecheckMode>,
    },

    /// Run only the input validator on a URL.
    Validate {
        url: String,
    },

    /// List the local pre-check rules, or evaluate them against a URL.
    Rules {
        url: Option<String>,
    },

    /// Show the config file path and effective values.
    Config,

    /// Generate shell completions on stdout.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Render the man page on stdout.
    Man,
}

impl CliCommand {
    /// Parses arguments, runs the command and returns the process exit status.
    pub async fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();
        let config_override = cli.config;

        match cli.command {
            CliCommand::Check {
                url,
                endpoint,
                min_display_ms,
                timeout_secs,
                format,
                precheck,
            } => {
                let cfg = load_config(config_override.as_deref())?;
                let opts = CheckOptions {
                    url,
                    endpoint,
                    min_display_ms,
                    timeout_secs,
                    format,
                    precheck,
                };
                run_check(&cfg, opts).await
            }
            CliCommand::Validate { url } => Ok(run_validate(&url)),
            CliCommand::Rules { url } => run_rules(url.as_deref()),
            CliCommand::Config => {
                let cfg = load_config(config_override.as_deref())?;
                let path = match config_override {
                    Some(path) => path,
                    None => config::config_path()?,
                };
                run_config(&path, &cfg);
                Ok(EXIT_SAFE)
            }
            CliCommand::Completions { shell } => {
                run_completions(shell);
                Ok(EXIT_SAFE)
            }
            CliCommand::Man => {
                run_man()?;
                Ok(EXIT_SAFE)
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<PhishcheckConfig> {
    let cfg = match path {
        Some(path) => config::load_from_path(path)?,
        None => config::load_or_init()?,
    };
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

#[cfg(test)]
mod tests;
