//! Streaming statistics: per-URL accumulators, the parse-error budget,
//! and the order statistics used at finalization.

pub mod budget;
pub mod median;
pub mod table;

pub use budget::{BudgetVerdict, ErrorBudget};
pub use table::{AggregationTable, GlobalTotals, ReportRow};
