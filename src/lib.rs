//! Per-endpoint latency reports from nginx ui access logs.
//!
//! One run: find the newest log in the log directory, skip it if its
//! report already exists, stream it through the aggregation engine, and
//! render the ranked rows into a self-contained HTML report.

pub mod config;
pub mod discover;
pub mod engine;
pub mod parse;
pub mod render;
pub mod report;
pub mod stats;

pub type Result<T> = anyhow::Result<T>;
