use std::io::ErrorKind;
use std::path::Path;

use crate::error::ReportError;
use crate::junit::attempt::ParsedRun;
use crate::junit::parser::parse_results;

/// Minimal document written in place of a missing results file.
pub const EMPTY_RESULTS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuites name="empty" tests="0" failures="0" time="0">
</testsuites>
"#;

/// Read and parse a results document from disk.
///
/// A missing file is `InputMissing`, any other read failure is `Read`.
/// Both mean "no data available"; what to do about it is the caller's call.
/// Content problems never error: they parse to an empty run.
pub fn load_results(path: &Path) -> Result<ParsedRun, ReportError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ReportError::InputMissing {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(ReportError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let run = parse_results(&content);
    tracing::debug!(
        "parsed {}: {} suites, {} attempts",
        path.display(),
        run.suites.len(),
        run.attempts.len()
    );
    Ok(run)
}

/// Load a results document, creating a minimal empty one if it is missing.
///
/// Used by the webhook path, where an absent file is a degraded but
/// successful run.
pub fn load_or_create_results(path: &Path) -> Result<ParsedRun, ReportError> {
    match load_results(path) {
        Err(ReportError::InputMissing { .. }) => {
            tracing::warn!(
                "results file not found: {}; creating an empty one to continue",
                path.display()
            );
            write_empty_results(path)?;
            Ok(parse_results(EMPTY_RESULTS_XML))
        }
        other => other,
    }
}

fn write_empty_results(path: &Path) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ReportError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, EMPTY_RESULTS_XML).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("created empty results file at {}", path.display());
    Ok(())
}
