//! The single-pass aggregation pipeline: raw lines in, ordered report
//! rows (or a "log unusable" verdict) out.
//!
//! One sequential consumer: each line goes through the parser, the
//! outcome is recorded against the error budget, and successful entries
//! fold into the aggregation table. After the stream ends the budget
//! renders its verdict, the table finalizes, and the assembler sorts
//! and caps the rows. The engine never exits the process; the caller
//! decides what a verdict means.

use crate::Result;
use crate::config::Config;
use crate::parse::{LineParser, ParseOutcome};
use crate::report;
use crate::stats::{AggregationTable, BudgetVerdict, ErrorBudget, ReportRow};
use anyhow::Context;
use std::io::BufRead;

/// Discriminated run result: either the finalized rows, or the budget
/// numbers explaining why no report was produced.
#[derive(Debug, PartialEq)]
pub enum RunOutcome {
    Report(Vec<ReportRow>),
    Unusable(BudgetVerdict),
}

/// Consume the whole line stream and produce the run outcome.
///
/// I/O errors from the reader are caller-level failures and propagate;
/// unparsable lines are not errors here, only budget entries.
pub fn run(lines: impl BufRead, config: &Config) -> Result<RunOutcome> {
    let parser = LineParser::new()?;
    let mut budget = ErrorBudget::new();
    let mut table = AggregationTable::new();

    for line in lines.lines() {
        let line = line.context("read log line")?;
        let outcome = parser.parse(&line);
        budget.record(&outcome);
        match outcome {
            ParseOutcome::Entry(entry) => table.observe(&entry.url, entry.elapsed),
            ParseOutcome::Failure { reason, raw } => {
                tracing::warn!(?reason, line = raw.as_str(), "unparsable line");
            }
        }
    }

    let verdict = budget.verdict(config.error_limit_perc);
    if !verdict.usable {
        return Ok(RunOutcome::Unusable(verdict));
    }

    tracing::info!(
        lines = verdict.lines_seen,
        failed = verdict.lines_failed,
        urls = table.distinct_urls(),
        "aggregation pass complete"
    );

    let rows = report::assemble(table.finalize(), config.report_size);
    Ok(RunOutcome::Report(rows))
}
