//! Parse-error budget: how many unparsable lines a run may tolerate
//! before its output can no longer be trusted.

use crate::parse::ParseOutcome;

/// Running counters over the whole pass.
///
/// The denominator for the budget is total lines read, failures
/// included. The check is post-hoc: the threshold depends on the final
/// line count, so the verdict is rendered once after the stream ends.
#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorBudget {
    lines_seen: u64,
    lines_failed: u64,
}

/// Final verdict plus the numbers behind it, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetVerdict {
    pub lines_seen: u64,
    pub lines_failed: u64,
    pub threshold: u64,
    pub usable: bool,
}

impl ErrorBudget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one line's outcome.
    pub fn record(&mut self, outcome: &ParseOutcome) {
        self.lines_seen += 1;
        if outcome.is_failure() {
            self.lines_failed += 1;
        }
    }

    pub fn lines_seen(&self) -> u64 {
        self.lines_seen
    }

    pub fn lines_failed(&self) -> u64 {
        self.lines_failed
    }

    /// Maximum tolerable failed-line count:
    /// `floor(lines_seen * limit_perc / 100)`.
    pub fn threshold(&self, limit_perc: u64) -> u64 {
        self.lines_seen * limit_perc / 100
    }

    /// End-of-pass decision. A run is unusable when failures exceed the
    /// threshold, or when nothing parsed at all against a zero
    /// threshold. An empty input is usable (there is nothing to
    /// validate).
    pub fn verdict(&self, limit_perc: u64) -> BudgetVerdict {
        let threshold = self.threshold(limit_perc);
        let usable = if self.lines_seen == 0 {
            true
        } else if self.lines_failed > threshold {
            false
        } else {
            let parsed = self.lines_seen - self.lines_failed;
            !(parsed == 0 && threshold == 0)
        };
        BudgetVerdict {
            lines_seen: self.lines_seen,
            lines_failed: self.lines_failed,
            threshold,
            usable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{FailureReason, ParseOutcome, ParsedEntry};

    fn entry() -> ParseOutcome {
        ParseOutcome::Entry(ParsedEntry {
            url: "/a".to_string(),
            elapsed: 1.0,
        })
    }

    fn failure() -> ParseOutcome {
        ParseOutcome::Failure {
            reason: FailureReason::MissingUrl,
            raw: String::new(),
        }
    }

    fn budget_with(ok: u64, failed: u64) -> ErrorBudget {
        let mut b = ErrorBudget::new();
        for _ in 0..ok {
            b.record(&entry());
        }
        for _ in 0..failed {
            b.record(&failure());
        }
        b
    }

    #[test]
    fn failures_at_threshold_are_tolerated() {
        // 100 lines at 5%: 5 failures pass, 6 do not.
        let verdict = budget_with(95, 5).verdict(5);
        assert_eq!(verdict.threshold, 5);
        assert!(verdict.usable);

        let verdict = budget_with(94, 6).verdict(5);
        assert!(!verdict.usable);
    }

    #[test]
    fn threshold_is_floored() {
        // 39 lines at 5% -> floor(1.95) = 1.
        assert_eq!(budget_with(39, 0).threshold(5), 1);
    }

    #[test]
    fn empty_input_is_usable() {
        assert!(ErrorBudget::new().verdict(5).usable);
    }

    #[test]
    fn all_failures_are_fatal() {
        let verdict = budget_with(0, 10).verdict(5);
        assert!(!verdict.usable);
    }

    #[test]
    fn zero_parsed_zero_threshold_is_fatal() {
        // One bad line under a 0% limit: threshold 0, nothing parsed.
        let verdict = budget_with(0, 1).verdict(0);
        assert_eq!(verdict.threshold, 0);
        assert!(!verdict.usable);
    }
}
