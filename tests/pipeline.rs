//! End-to-end pipeline tests: log discovery through rendered report.

use nginx_latency_report::engine::{self, RunOutcome};
use nginx_latency_report::{config::Config, discover, render, report};

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::Path;

fn access_line(url: &str, elapsed: f64) -> String {
    format!(
        "1.196.116.32 -  - [29/Jun/2017:03:50:22 +0300] \"GET {} HTTP/1.1\" 200 927 \"-\" \
         \"Lynx/2.8.8dev.9\" \"-\" \"1498697422-2190034393-4708-9752759\" \"dc7161be3\" {:.3}",
        url, elapsed
    )
}

fn write_plain_log(dir: &Path, name: &str, lines: &[String]) {
    std::fs::write(dir.join(name), lines.join("\n")).unwrap();
}

fn write_gzip_log(dir: &Path, name: &str, lines: &[String]) {
    let file = std::fs::File::create(dir.join(name)).unwrap();
    let mut enc = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    enc.write_all(lines.join("\n").as_bytes()).unwrap();
    enc.finish().unwrap();
}

#[test]
fn discovers_runs_and_writes_a_report() {
    let log_dir = tempfile::tempdir().unwrap();
    let report_dir = tempfile::tempdir().unwrap();

    // Two candidates; the gzipped one is newer and must win.
    write_plain_log(
        log_dir.path(),
        "nginx-access-ui.log-20170630",
        &[access_line("/stale", 9.0)],
    );
    write_gzip_log(
        log_dir.path(),
        "nginx-access-ui.log-20170701.gz",
        &[
            access_line("/a", 1.0),
            access_line("/a", 3.0),
            access_line("/b", 10.0),
        ],
    );

    let logfile = discover::find_latest_log(log_dir.path()).unwrap().unwrap();
    assert_eq!(logfile.date, NaiveDate::from_ymd_opt(2017, 7, 1).unwrap());
    assert!(!report::report_exists(logfile.date, report_dir.path()));

    let cfg = Config::default();
    let lines = discover::open_lines(&logfile).unwrap();
    let rows = match engine::run(lines, &cfg).unwrap() {
        RunOutcome::Report(rows) => rows,
        other => panic!("expected report, got {:?}", other),
    };

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].url, "/b");
    assert_eq!(rows[0].time_sum, 10.0);
    assert_eq!(rows[1].url, "/a");
    assert_eq!(rows[1].count, 2);
    assert_eq!(rows[1].time_avg, 2.0);
    assert_eq!(rows[1].time_med, 2.0);

    let html = render::render_html_report(&rows, logfile.date).unwrap();
    let out = report::report_path(logfile.date, report_dir.path());
    std::fs::write(&out, html).unwrap();

    assert!(report::report_exists(logfile.date, report_dir.path()));
    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains(r#""url":"/b""#));
    assert!(written.contains("Latency report 2017.07.01"));
}

#[test]
fn existing_report_short_circuits_before_any_parsing() {
    let log_dir = tempfile::tempdir().unwrap();
    let report_dir = tempfile::tempdir().unwrap();

    write_plain_log(
        log_dir.path(),
        "nginx-access-ui.log-20240102",
        &[access_line("/a", 1.0)],
    );
    std::fs::write(report_dir.path().join("report-2024.01.02.html"), "done").unwrap();

    let logfile = discover::find_latest_log(log_dir.path()).unwrap().unwrap();
    // The gate answers yes; the caller must not touch the engine.
    assert!(report::report_exists(logfile.date, report_dir.path()));

    // Untouched report content proves nothing was regenerated.
    let content = std::fs::read_to_string(report_dir.path().join("report-2024.01.02.html")).unwrap();
    assert_eq!(content, "done");
}

#[test]
fn corrupt_log_produces_no_report_rows() {
    let cfg = Config::default();
    let garbage: Vec<String> = (0..10).map(|i| format!("not a log line {}", i)).collect();

    let outcome = engine::run(std::io::Cursor::new(garbage.join("\n")), &cfg).unwrap();
    match outcome {
        RunOutcome::Unusable(verdict) => {
            assert_eq!(verdict.lines_failed, 10);
            assert!(verdict.lines_failed > verdict.threshold);
        }
        other => panic!("expected unusable, got {:?}", other),
    }
}

#[test]
fn identical_inputs_render_identical_reports() {
    let cfg = Config::default();
    let date = NaiveDate::from_ymd_opt(2017, 7, 1).unwrap();
    let lines: Vec<String> = (0..40)
        .map(|i| access_line(&format!("/page/{}", i % 5), 0.25 * (i % 9) as f64))
        .collect();

    let mut outputs = Vec::new();
    for _ in 0..2 {
        let outcome = engine::run(std::io::Cursor::new(lines.join("\n")), &cfg).unwrap();
        let RunOutcome::Report(rows) = outcome else {
            panic!("expected report");
        };
        outputs.push(render::render_html_report(&rows, date).unwrap());
    }
    assert_eq!(outputs[0], outputs[1]);
}
