//! CLI command handlers, one file per command.

mod check;
mod completions;
mod config;
mod rules;
mod validate;

pub use check::{run_check, CheckOptions};
#[cfg(test)]
pub(crate) use check::{apply_overrides, exit_code};
pub use completions::{run_completions, run_man};
pub use config::run_config;
pub use rules::run_rules;
pub use validate::run_validate;
