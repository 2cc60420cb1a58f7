use anyhow::bail;
use clap::Parser;
use std::path::PathBuf;

use nginx_latency_report::engine::RunOutcome;
use nginx_latency_report::{Result, config, discover, engine, render, report};

#[derive(Parser)]
#[command(name = "latency-report")]
#[command(about = "Per-endpoint latency report from nginx ui access logs", long_about = None)]
struct Cli {
    /// Path to a JSON config file merged over the built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured log directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Override the configured report directory.
    #[arg(long)]
    report_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut cfg = config::Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.log_dir {
        cfg.log_dir = dir;
    }
    if let Some(dir) = cli.report_dir {
        cfg.report_dir = dir;
    }

    // 1) Pick the newest candidate log.
    let Some(logfile) = discover::find_latest_log(&cfg.log_dir)? else {
        tracing::info!(dir = %cfg.log_dir.display(), "no log files to analyze");
        return Ok(());
    };
    tracing::info!(name = logfile.name.as_str(), date = %logfile.date, "selected log");

    // 2) Idempotency gate: a report for this date means nothing to do.
    if report::report_exists(logfile.date, &cfg.report_dir) {
        tracing::info!(date = %logfile.date, "report already exists, skipping");
        return Ok(());
    }

    // 3) One streaming pass over the (possibly gzipped) log.
    let lines = discover::open_lines(&logfile)?;
    let rows = match engine::run(lines, &cfg)? {
        RunOutcome::Report(rows) => rows,
        RunOutcome::Unusable(verdict) => {
            bail!(
                "log {} is unusable: {} of {} lines failed to parse (budget {})",
                logfile.name,
                verdict.lines_failed,
                verdict.lines_seen,
                verdict.threshold
            );
        }
    };

    // 4) Render and write the report.
    let html = render::render_html_report(&rows, logfile.date)?;
    std::fs::create_dir_all(&cfg.report_dir)?;
    let out = report::report_path(logfile.date, &cfg.report_dir);
    std::fs::write(&out, html)?;
    tracing::info!(path = %out.display(), rows = rows.len(), "wrote report");

    Ok(())
}
