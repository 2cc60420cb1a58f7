//! Line-level parsing for the nginx ui access log.
//!
//! One raw line yields exactly one [`ParseOutcome`]: either a
//! `(url, elapsed)` pair or a typed failure carrying the raw line for
//! diagnostics. A failed parse is the expected path for malformed lines
//! and never aborts the run by itself; the error budget decides that.

use crate::Result;
use regex::Regex;

/// Why a line failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// No quoted `"METHOD url` request field found.
    MissingUrl,
    /// No trailing request-time token found.
    MissingTime,
    /// The request-time token was present but not a valid non-negative
    /// decimal.
    MalformedTime,
}

/// The successful parse result.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEntry {
    pub url: String,
    pub elapsed: f64,
}

/// Result of parsing one raw line.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Entry(ParsedEntry),
    Failure { reason: FailureReason, raw: String },
}

impl ParseOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ParseOutcome::Failure { .. })
    }

    fn failure(reason: FailureReason, raw: &str) -> Self {
        ParseOutcome::Failure {
            reason,
            raw: raw.to_string(),
        }
    }
}

/// Extracts `(url, elapsed)` pairs from raw log lines.
///
/// Log format (ui_short):
/// `$remote_addr $remote_user $http_x_real_ip [$time_local] "$request" $status
/// $body_bytes_sent "$http_referer" ... $request_time`
pub struct LineParser {
    url_re: Regex,
    time_re: Regex,
}

impl LineParser {
    pub fn new() -> Result<Self> {
        // Capture:
        // 1) url: the token after the method inside the quoted request field
        let url_re = Regex::new(r#""(?:GET|POST|PUT|HEAD|OPTIONS)\s+(\S+)"#)?;
        // 2) elapsed: $request_time, the last whitespace-separated token
        let time_re = Regex::new(r"\s([0-9.]+)\s*$")?;
        Ok(LineParser { url_re, time_re })
    }

    /// Parse one raw line. Never fails; malformed input maps to a typed
    /// failure outcome.
    pub fn parse(&self, line: &str) -> ParseOutcome {
        let Some(url_caps) = self.url_re.captures(line) else {
            return ParseOutcome::failure(FailureReason::MissingUrl, line);
        };
        let url = url_caps.get(1).map(|m| m.as_str()).unwrap_or_default();

        let Some(time_caps) = self.time_re.captures(line) else {
            return ParseOutcome::failure(FailureReason::MissingTime, line);
        };
        let token = time_caps.get(1).map(|m| m.as_str()).unwrap_or_default();

        // The charset above admits tokens like "1.2.3"; reject them here.
        match token.parse::<f64>() {
            Ok(elapsed) if elapsed.is_finite() && elapsed >= 0.0 => {
                ParseOutcome::Entry(ParsedEntry {
                    url: url.to_string(),
                    elapsed,
                })
            }
            _ => ParseOutcome::failure(FailureReason::MalformedTime, line),
        }
    }
}
