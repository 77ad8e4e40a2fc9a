use std::path::PathBuf;

use playwright_report::{AttemptRecord, Outcome, TestIdentity};

/// Absolute path of a file under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).unwrap()
}

/// Fresh scratch directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("playwright_report_{}_{}", name, std::process::id()));
    std::fs::remove_dir_all(&dir).ok();
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Single-browser attempt in suite `suite.spec.js`.
pub fn attempt(name: &str, outcome: Outcome, secs: f64) -> AttemptRecord {
    AttemptRecord {
        suite_name: "suite.spec.js".to_string(),
        identity: TestIdentity::new("suite.spec.js", name),
        elapsed_seconds: secs,
        outcome,
        failure_message: match outcome {
            Outcome::Fail => Some(format!("{} failed", name)),
            Outcome::Pass => None,
        },
        host_label: None,
    }
}

pub fn pass(name: &str, secs: f64) -> AttemptRecord {
    attempt(name, Outcome::Pass, secs)
}

pub fn fail(name: &str, secs: f64) -> AttemptRecord {
    attempt(name, Outcome::Fail, secs)
}

/// Attempt produced on a given browser host.
pub fn on_host(mut record: AttemptRecord, host: &str) -> AttemptRecord {
    record.host_label = Some(host.to_string());
    record
}

/// Move an attempt into another suite (classname follows the suite).
pub fn in_suite(mut record: AttemptRecord, suite: &str) -> AttemptRecord {
    record.suite_name = suite.to_string();
    record.identity.classname = suite.to_string();
    record
}
