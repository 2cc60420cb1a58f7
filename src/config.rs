//! Run configuration: built-in defaults, optionally overridden by a
//! JSON file passed on the command line.

use crate::Result;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn default_report_size() -> usize {
    1000
}

fn default_error_limit_perc() -> u64 {
    5
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("./reports")
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("./log")
}

/// Keys mirror the override-file spelling. Missing keys fall back to
/// the defaults; unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Row cap for the emitted report.
    #[serde(rename = "REPORT_SIZE", default = "default_report_size")]
    pub report_size: usize,

    /// Tolerated share of unparsable lines, 0-100.
    #[serde(rename = "ERROR_LIMIT_PERC", default = "default_error_limit_perc")]
    pub error_limit_perc: u64,

    #[serde(rename = "REPORT_DIR", default = "default_report_dir")]
    pub report_dir: PathBuf,

    #[serde(rename = "LOG_DIR", default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            report_size: default_report_size(),
            error_limit_perc: default_error_limit_perc(),
            report_dir: default_report_dir(),
            log_dir: default_log_dir(),
        }
    }
}

impl Config {
    /// Load defaults, merged with the override file if one was given.
    /// An explicitly named file that cannot be read or parsed is a
    /// caller error, not a silent fallback.
    pub fn load(override_path: Option<&Path>) -> Result<Config> {
        let Some(path) = override_path else {
            return Ok(Config::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parse config file {}", path.display()))?;
        Ok(config)
    }
}
