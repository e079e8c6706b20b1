use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::precheck::PrecheckMode;

/// Endpoint used when no config file overrides it (the classifier's dev server).
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:5000/predict";

/// Global configuration loaded from `~/.config/phishcheck/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhishcheckConfig {
    /// Prediction endpoint receiving `POST {"url": ...}`.
    pub endpoint_url: String,
    /// Minimum time in milliseconds the loading state stays visible.
    pub min_display_millis: u64,
    /// TCP/TLS connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds (connect + transfer).
    pub request_timeout_secs: u64,
    /// Local heuristic pre-check: "off", "advisory" (default) or "short-circuit".
    #[serde(default)]
    pub precheck: PrecheckMode,
}

impl Default for PhishcheckConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            min_display_millis: 800,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            precheck: PrecheckMode::default(),
        }
    }
}

impl PhishcheckConfig {
    /// Rejects values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        let endpoint = url::Url::parse(&self.endpoint_url)
            .with_context(|| format!("invalid endpoint_url: {}", self.endpoint_url))?;
        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            anyhow::bail!(
                "endpoint_url must use http or https, got {}",
                endpoint.scheme()
            );
        }
        if self.connect_timeout_secs == 0 {
            anyhow::bail!("connect_timeout_secs must be greater than zero");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than zero");
        }
        Ok(())
    }

    /// Runtime view handed to [`crate::pipeline::Pipeline::new`].
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            endpoint_url: self.endpoint_url.clone(),
            min_display: Duration::from_millis(self.min_display_millis),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            precheck: self.precheck,
        }
    }
}

/// Explicit configuration value passed into the pipeline at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub endpoint_url: String,
    pub min_display: Duration,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub precheck: PrecheckMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PhishcheckConfig::default().pipeline_config()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("phishcheck")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PhishcheckConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PhishcheckConfig::default();
        write_config(&path, &default_cfg)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load and validate configuration from an explicit path.
pub fn load_from_path(path: &Path) -> Result<PhishcheckConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: PhishcheckConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

fn write_config(path: &Path, cfg: &PhishcheckConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml).with_context(|| format!("write config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_values() {
        let cfg = PhishcheckConfig::default();
        assert_eq!(cfg.endpoint_url, "http://127.0.0.1:5000/predict");
        assert_eq!(cfg.min_display_millis, 800);
        assert_eq!(cfg.connect_timeout_secs, 10);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.precheck, PrecheckMode::Advisory);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = PhishcheckConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: PhishcheckConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            endpoint_url = "https://classifier.internal/predict"
            min_display_millis = 0
            connect_timeout_secs = 3
            request_timeout_secs = 5
            precheck = "short-circuit"
        "#;
        let cfg: PhishcheckConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.endpoint_url, "https://classifier.internal/predict");
        assert_eq!(cfg.min_display_millis, 0);
        assert_eq!(cfg.precheck, PrecheckMode::ShortCircuit);

        let runtime = cfg.pipeline_config();
        assert_eq!(runtime.min_display, Duration::ZERO);
        assert_eq!(runtime.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn precheck_defaults_when_missing() {
        let toml = r#"
            endpoint_url = "http://localhost:5000/predict"
            min_display_millis = 800
            connect_timeout_secs = 10
            request_timeout_secs = 30
        "#;
        let cfg: PhishcheckConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.precheck, PrecheckMode::Advisory);
    }

    #[test]
    fn validate_rejects_bad_endpoint_and_timeouts() {
        let mut cfg = PhishcheckConfig::default();
        cfg.endpoint_url = "ftp://example.com/predict".to_string();
        assert!(cfg.validate().is_err());

        cfg.endpoint_url = "not a url".to_string();
        assert!(cfg.validate().is_err());

        let mut cfg = PhishcheckConfig::default();
        cfg.request_timeout_secs = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = PhishcheckConfig::default();
        cfg.connect_timeout_secs = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn load_from_path_reads_written_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = PhishcheckConfig::default();
        cfg.min_display_millis = 250;
        write_config(&path, &cfg).unwrap();

        let loaded = load_from_path(&path).unwrap();
        assert_eq!(loaded.min_display_millis, 250);
    }

    #[test]
    fn load_from_path_rejects_invalid_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "endpoint_url = \"file:///etc/passwd\"\nmin_display_millis = 1\nconnect_timeout_secs = 1\nrequest_timeout_secs = 1\n",
        )
        .unwrap();
        assert!(load_from_path(&path).is_err());
    }
}
