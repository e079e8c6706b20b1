//! `phishcheck config` – show where the config lives and what it says.

use phishcheck_core::config::PhishcheckConfig;
use std::path::Path;

pub fn run_config(path: &Path, cfg: &PhishcheckConfig) {
    println!("config file: {}", path.display());
    println!("endpoint_url         = {}", cfg.endpoint_url);
    println!("min_display_millis   = {}", cfg.min_display_millis);
    println!("connect_timeout_secs = {}", cfg.connect_timeout_secs);
    println!("request_timeout_secs = {}", cfg.request_timeout_secs);
    println!("precheck             = {}", cfg.precheck);
}
