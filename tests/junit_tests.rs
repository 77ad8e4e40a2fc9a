use playwright_report::ReportError;
use playwright_report::junit::attempt::Outcome;
use playwright_report::junit::loader::{EMPTY_RESULTS_XML, load_or_create_results, load_results};
use playwright_report::junit::parser::parse_results;

use crate::common::builders::{fixture, fixture_path, scratch_dir};

mod common;

// ============================================================================
// 1. Flattening a retry run
// ============================================================================

#[test]
fn retry_fixture_yields_one_attempt_per_testcase() {
    let run = parse_results(&fixture("retry_run.xml"));
    assert_eq!(run.attempts.len(), 6);
    assert_eq!(run.suites.len(), 2);

    let names: Vec<&str> = run.attempts.iter().map(|a| a.identity.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "logs in with valid credentials",
            "rejects a wrong password",
            "rejects a wrong password",
            "shows the signup link",
            "creates a user",
            "rejects a duplicate e-mail",
        ]
    );
}

#[test]
fn attempts_carry_suite_and_host() {
    let run = parse_results(&fixture("retry_run.xml"));
    let first = &run.attempts[0];
    assert_eq!(first.suite_name, "frontend/Login.spec.js");
    assert_eq!(first.identity.classname, "frontend/Login.spec.js");
    assert_eq!(first.host_label.as_deref(), Some("chromium"));
    assert_eq!(first.elapsed_seconds, 3.1);

    let last = run.attempts.last().unwrap();
    assert_eq!(last.suite_name, "api/Cadastro.spec.js");
    assert_eq!(last.outcome, Outcome::Pass);
}

// ============================================================================
// 2. Failure detection and messages
// ============================================================================

#[test]
fn cdata_failure_body_is_preferred() {
    let run = parse_results(&fixture("retry_run.xml"));
    let failed = &run.attempts[1];
    assert_eq!(failed.outcome, Outcome::Fail);
    assert_eq!(
        failed.failure_message.as_deref(),
        Some("Error: expect(locator).toBeVisible() failed\n    at Login.spec.js:30:7")
    );
}

#[test]
fn blank_failure_body_falls_back_to_message_attribute() {
    let run = parse_results(&fixture("retry_run.xml"));
    let failed = &run.attempts[3];
    assert_eq!(failed.outcome, Outcome::Fail);
    assert_eq!(failed.failure_message.as_deref(), Some("timeout waiting for link"));
}

#[test]
fn error_child_counts_as_failure() {
    let xml = r#"<testsuites><testsuite name="s">
        <testcase classname="c" name="t"><error message="boom"/></testcase>
    </testsuite></testsuites>"#;
    let run = parse_results(xml);
    assert_eq!(run.attempts[0].outcome, Outcome::Fail);
    assert_eq!(run.attempts[0].failure_message.as_deref(), Some("boom"));
}

#[test]
fn escaped_text_is_unescaped() {
    let xml = r#"<testsuites><testsuite name="s">
        <testcase classname="c" name="a &amp; b"><failure>expected &lt;div&gt;</failure></testcase>
    </testsuite></testsuites>"#;
    let run = parse_results(xml);
    assert_eq!(run.attempts[0].identity.name, "a & b");
    assert_eq!(run.attempts[0].failure_message.as_deref(), Some("expected <div>"));
}

#[test]
fn passing_attempt_has_no_message() {
    let run = parse_results(&fixture("retry_run.xml"));
    assert!(run.attempts[2].failure_message.is_none());
    assert_eq!(run.attempts[2].outcome, Outcome::Pass);
}

// ============================================================================
// 3. Durations
// ============================================================================

#[test]
fn root_time_is_the_run_duration() {
    let run = parse_results(&fixture("retry_run.xml"));
    assert_eq!(run.declared_seconds, Some(42.5));
    assert_eq!(run.total_seconds(), 42.5);
}

#[test]
fn suite_times_are_summed_without_root_time() {
    let run = parse_results(&fixture("multi_browser.xml"));
    assert_eq!(run.declared_seconds, None);
    assert_eq!(run.total_seconds(), 20.0);
}

#[test]
fn non_numeric_times_read_as_zero() {
    let xml = r#"<testsuites><testsuite name="s" time="abc">
        <testcase classname="c" name="t" time="-3"/>
    </testsuite></testsuites>"#;
    let run = parse_results(xml);
    assert_eq!(run.attempts[0].elapsed_seconds, 0.0);
    assert_eq!(run.total_seconds(), 0.0);
}

// ============================================================================
// 4. Degenerate documents
// ============================================================================

#[test]
fn empty_string_is_an_empty_run() {
    let run = parse_results("");
    assert!(run.is_empty());
    assert!(run.suites.is_empty());
}

#[test]
fn wrong_root_is_an_empty_run() {
    let xml = r#"<testsuite name="s"><testcase classname="c" name="t"/></testsuite>"#;
    assert!(parse_results(xml).is_empty());
}

#[test]
fn malformed_document_is_an_empty_run() {
    let xml = r#"<testsuites><testsuite name="s"><testcase classname="c" name="t"></testsuite>"#;
    assert!(parse_results(xml).is_empty());
}

#[test]
fn minimal_empty_document_parses_to_zero_tests() {
    let run = parse_results(EMPTY_RESULTS_XML);
    assert!(run.is_empty());
    assert_eq!(run.total_seconds(), 0.0);
}

#[test]
fn self_closing_root_is_an_empty_run() {
    let run = parse_results(r#"<testsuites time="3"/>"#);
    assert!(run.is_empty());
    assert_eq!(run.total_seconds(), 3.0);
}

// ============================================================================
// 5. Discovered info
// ============================================================================

#[test]
fn discovered_suites_and_hosts_are_distinct_and_ordered() {
    let run = parse_results(&fixture("multi_browser.xml"));
    assert_eq!(run.available_suites(), vec!["frontend/Cadastro.spec.js".to_string()]);
    assert_eq!(
        run.executed_hosts(),
        vec!["chromium".to_string(), "firefox".to_string()]
    );
    assert_eq!(run.first_timestamp(), Some("2025-06-01T09:00:00"));
}

#[test]
fn failing_attempts_are_kept_per_host() {
    let run = parse_results(&fixture("multi_browser.xml"));
    let failed: Vec<(&str, Option<&str>)> = run
        .attempts
        .iter()
        .filter(|a| a.outcome == Outcome::Fail)
        .map(|a| (a.identity.name.as_str(), a.host_label.as_deref()))
        .collect();
    assert_eq!(failed, vec![("registers a new user", Some("firefox"))]);
}

// ============================================================================
// 6. Loading from disk
// ============================================================================

#[test]
fn load_existing_file() {
    let run = load_results(&fixture_path("retry_run.xml")).unwrap();
    assert_eq!(run.attempts.len(), 6);
}

#[test]
fn load_missing_file_is_input_missing() {
    let path = fixture_path("does_not_exist.xml");
    match load_results(&path) {
        Err(ReportError::InputMissing { path: p }) => assert_eq!(p, path),
        other => panic!("Expected InputMissing, got {:?}", other),
    }
}

#[test]
fn input_missing_message_names_the_path() {
    let err = load_results(&fixture_path("nope.xml")).unwrap_err();
    assert!(err.to_string().contains("nope.xml"));
}

#[test]
fn load_or_create_writes_minimal_document() {
    let dir = scratch_dir("load_or_create");
    let path = dir.join("nested").join("output.xml");

    let run = load_or_create_results(&path).unwrap();
    assert!(run.is_empty());
    assert!(path.exists());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), EMPTY_RESULTS_XML);

    std::fs::remove_dir_all(&dir).ok();
}
