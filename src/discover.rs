//! Locating the newest ui access log in a directory and opening it as a
//! lazy line stream.
//!
//! Candidate names look like `nginx-access-ui.log-20170630` or
//! `nginx-access-ui.log-20170630.gz`: the stem before the first `.`
//! must end in `-ui`, the extension must start with `gz` or `log`, and
//! the first digit run in the name carries the date.

use crate::Result;
use anyhow::Context;
use chrono::NaiveDate;
use flate2::read::GzDecoder;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

const VALID_FORMATS: [&str; 2] = ["gz", "log"];

/// A selected log file: name decides decompression, date names the
/// report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub name: String,
    pub path: PathBuf,
    pub date: NaiveDate,
}

fn is_ui_log(name: &str) -> bool {
    let stem = name.split('.').next().unwrap_or_default();
    stem.rsplit('-').next() == Some("ui")
}

fn is_valid_format(name: &str) -> bool {
    let suffix = name.rsplit('.').next().unwrap_or_default();
    VALID_FORMATS.iter().any(|ext| suffix.starts_with(ext))
}

fn date_from_name(name: &str) -> Option<NaiveDate> {
    let re = Regex::new(r"\d{8}").ok()?;
    let digits = re.find(name)?.as_str();
    let year: i32 = digits[..4].parse().ok()?;
    let month: u32 = digits[4..6].parse().ok()?;
    let day: u32 = digits[6..].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Scan `log_dir` for the candidate with the newest embedded date.
/// A missing or empty directory yields `None`, not an error.
pub fn find_latest_log(log_dir: &Path) -> Result<Option<LogFile>> {
    if !log_dir.exists() {
        return Ok(None);
    }

    let mut latest: Option<LogFile> = None;
    let entries = std::fs::read_dir(log_dir)
        .with_context(|| format!("read log directory {}", log_dir.display()))?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_ui_log(&name) || !is_valid_format(&name) {
            continue;
        }
        let Some(date) = date_from_name(&name) else {
            tracing::warn!(name = name.as_str(), "log name has no parsable date, skipping");
            continue;
        };

        let newer = latest.as_ref().is_none_or(|cur| date > cur.date);
        if newer {
            latest = Some(LogFile { name, path, date });
        }
    }

    Ok(latest)
}

/// Open the selected log as a buffered line reader, decompressing on
/// the fly when the name says gzip.
pub fn open_lines(log: &LogFile) -> Result<Box<dyn BufRead>> {
    let file =
        File::open(&log.path).with_context(|| format!("open log file {}", log.path.display()))?;
    if log.name.ends_with("gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
