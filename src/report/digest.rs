use std::path::Path;

use indexmap::IndexMap;

use crate::junit::attempt::ParsedRun;
use crate::reconcile::engine::RunSummary;
use crate::report::format::format_minutes_seconds;

/// Default digest title.
pub const DEFAULT_TITLE: &str = "📋 AUTOMATED TEST REPORT";

/// Rendered in place of an empty failure list.
pub const NO_FAILURES: &str = "No failed tests 🎉";

/// Rendered when no suite had any tests.
pub const NO_FILES: &str = "No test files were processed.";

// ============================================================================
// Webhook digest: bullet-structured text for chat webhooks
// ============================================================================

/// Inputs for one digest.
pub struct DigestInput<'a> {
    pub title: &'a str,

    /// Reconciled main run
    pub summary: &'a RunSummary,

    /// Raw main run, for declared suite durations
    pub run: &'a ParsedRun,

    /// Reconciled rerun of the failures, when the pipeline ran one
    pub rerun: Option<&'a RunSummary>,
}

#[derive(Debug, Default)]
struct FileStats {
    total: usize,
    passed: usize,
    failed: usize,
    seconds: f64,
}

/// Build the digest text.
///
/// Produces output like:
/// ```text
/// *📋 AUTOMATED TEST REPORT*
///
/// *🚀 Total tests:* 3
/// *✅ Passed:* 2
/// *🔁 Recovered after retry:* 1
/// *❌ Failed (final):* 1
///
/// *⚠️ Failed tests (after retries):*
/// - login.spec.js -> rejects bad password
///
/// *📌 Results by file:*
///
/// - *File: `login.spec.js`*
///   • Total: 3
///   • Passed: 2
///   • Failed: 1
///   • Duration: 0m12s
///
/// *📊 Total execution time:* 0m12s
/// ```
pub fn build_digest(input: &DigestInput<'_>) -> String {
    let stats = input.summary.stats;
    let mut parts: Vec<String> = vec![format!("*{}*\n", input.title)];

    parts.push(format!("*🚀 Total tests:* {}", stats.total));
    parts.push(format!("*✅ Passed:* {}", stats.total_passed()));
    parts.push(format!("*🔁 Recovered after retry:* {}", stats.recovered));
    parts.push(format!("*❌ Failed (final):* {}", stats.final_failures));

    match input.rerun {
        Some(rerun) => {
            parts.push(format!(
                "*🔁 Still failing after rerun:* {}",
                rerun.stats.final_failures
            ));
            parts.push(format!(
                "\n*⚠️ Tests that failed in the rerun:*\n{}",
                format_failure_list(&failed_labels(rerun))
            ));
        }
        None => {
            parts.push(format!(
                "\n*⚠️ Failed tests (after retries):*\n{}",
                format_failure_list(&failed_labels(input.summary))
            ));
        }
    }

    parts.push("\n*📌 Results by file:*".to_string());
    let files = file_stats(input.summary, input.run);
    if files.is_empty() {
        parts.push(NO_FILES.to_string());
    } else {
        for (file, info) in &files {
            parts.push(format!(
                "\n- *File: `{}`*\n  • Total: {}\n  • Passed: {}\n  • Failed: {}\n  • Duration: {}",
                basename(file),
                info.total,
                info.passed,
                info.failed,
                format_minutes_seconds(info.seconds)
            ));
        }
    }

    let main_seconds = input.summary.total_seconds;
    match input.rerun {
        Some(rerun) => {
            let rerun_seconds = rerun.total_seconds;
            parts.push("\n*📊 Execution times:*".to_string());
            parts.push(format!("*🕐 Main run:* {}", format_minutes_seconds(main_seconds)));
            parts.push(format!("*🔄 Rerun:* {}", format_minutes_seconds(rerun_seconds)));
            parts.push(format!(
                "*⏳ Total (sum):* {}",
                format_minutes_seconds(main_seconds + rerun_seconds)
            ));
        }
        None => parts.push(format!(
            "\n*📊 Total execution time:* {}",
            format_minutes_seconds(main_seconds)
        )),
    }

    parts.join("\n")
}

/// Bullet list of failures, or the fixed no-failures line.
pub fn format_failure_list(items: &[String]) -> String {
    if items.is_empty() {
        return NO_FAILURES.to_string();
    }
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reconciled counts per suite, with declared suite durations.
///
/// Suites without tests are left out.
fn file_stats(summary: &RunSummary, run: &ParsedRun) -> IndexMap<String, FileStats> {
    let mut files: IndexMap<String, FileStats> = IndexMap::new();
    for suite in &run.suites {
        files.entry(suite.name.clone()).or_default().seconds += suite.declared_seconds;
    }
    for test in &summary.tests {
        let entry = files.entry(test.suite.clone()).or_default();
        entry.total += 1;
        if test.is_pass() {
            entry.passed += 1;
        } else {
            entry.failed += 1;
        }
    }
    files.retain(|_, info| info.total > 0);
    files
}

fn basename(file: &str) -> &str {
    Path::new(file)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file)
}

/// Final failures as `source file -> name`.
fn failed_labels(summary: &RunSummary) -> Vec<String> {
    summary
        .failed_tests()
        .map(|t| format!("{} -> {}", t.source_file, t.name))
        .collect()
}
