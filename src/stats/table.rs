//! Per-URL aggregation: running accumulators during the pass, finalized
//! report rows afterwards.

use crate::stats::median::median;
use serde::Serialize;
use std::collections::HashMap;

/// Running statistics for one URL.
///
/// The full value list is retained so the exact median can be computed
/// at finalization; this is the dominant memory cost of a run.
#[derive(Debug, Clone)]
pub struct KeyAccumulator {
    url: String,
    count: u64,
    time_sum: f64,
    time_max: f64,
    values: Vec<f64>,
}

/// Totals across all keys, updated alongside every accumulator.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobalTotals {
    pub total_requests: u64,
    pub total_time: f64,
}

/// One finalized summary line for one URL. Percentages and averages are
/// rounded to 3 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub url: String,
    pub count: u64,
    pub count_perc: f64,
    pub time_sum: f64,
    pub time_perc: f64,
    pub time_avg: f64,
    pub time_max: f64,
    pub time_med: f64,
}

/// Maps URL to its accumulator, preserving first-encounter order so the
/// final descending sort breaks ties deterministically.
#[derive(Debug, Default)]
pub struct AggregationTable {
    index: HashMap<String, usize>,
    keys: Vec<KeyAccumulator>,
    totals: GlobalTotals,
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

impl AggregationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn totals(&self) -> &GlobalTotals {
        &self.totals
    }

    pub fn distinct_urls(&self) -> usize {
        self.keys.len()
    }

    /// Fold one parsed entry into the table. O(1) amortized.
    pub fn observe(&mut self, url: &str, elapsed: f64) {
        self.totals.total_requests += 1;
        self.totals.total_time += elapsed;

        match self.index.get(url) {
            Some(&i) => {
                let acc = &mut self.keys[i];
                acc.count += 1;
                acc.time_sum += elapsed;
                acc.values.push(elapsed);
                if elapsed > acc.time_max {
                    acc.time_max = elapsed;
                }
            }
            None => {
                self.index.insert(url.to_string(), self.keys.len());
                self.keys.push(KeyAccumulator {
                    url: url.to_string(),
                    count: 1,
                    time_sum: elapsed,
                    time_max: elapsed,
                    values: vec![elapsed],
                });
            }
        }
    }

    /// Consume the table and derive one row per key, in first-encounter
    /// order. Value lists are dropped here, after the median is taken.
    ///
    /// With no observed entries there is nothing to normalize against,
    /// so the row sequence is empty and no percentage is computed.
    pub fn finalize(self) -> Vec<ReportRow> {
        if self.totals.total_requests == 0 {
            return Vec::new();
        }

        let total_requests = self.totals.total_requests as f64;
        let total_time = self.totals.total_time;

        self.keys
            .into_iter()
            .map(|acc| ReportRow {
                count_perc: round3(100.0 * acc.count as f64 / total_requests),
                time_perc: round3(100.0 * acc.time_sum / total_time),
                time_avg: round3(acc.time_sum / acc.count as f64),
                time_med: round3(median(&acc.values)),
                time_sum: round3(acc.time_sum),
                time_max: acc.time_max,
                count: acc.count,
                url: acc.url,
            })
            .collect()
    }
}
