use crate::report::report_model::DashboardModel;

// ============================================================================
// Console reporter (short terminal summary after the dashboard is written)
// ============================================================================

/// Format a dashboard model for terminal output.
///
/// Produces output like:
/// ```text
/// === Test Run: 12/05/2025 (retry mode) ===
///
/// ✓ Passed           10 (83.33%)
/// ↻ Recovered         1 (50.00% of initial failures)
/// ✗ Final failures    1 (8.33%)
///
///   [FAIL] login.spec.js: rejects bad password
///
/// === 12 tests in 00:01:05 ===
/// ```
pub fn format_console_summary(model: &DashboardModel) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Test Run: {} ({} mode) ===\n\n",
        model.execution_date, model.mode
    ));

    out.push_str(&format!(
        "\u{2713} Passed         {:>4} ({}%)\n",
        model.total_passed, model.passed_percentage
    ));
    out.push_str(&format!(
        "\u{21bb} Recovered      {:>4} ({}% of initial failures)\n",
        model.recovered, model.recovered_percentage
    ));
    out.push_str(&format!(
        "\u{2717} Final failures {:>4} ({}%)\n",
        model.final_failures, model.final_failures_percentage
    ));

    let failed: Vec<String> = model
        .suites
        .iter()
        .flat_map(|suite| {
            suite
                .tests
                .iter()
                .filter(|t| t.status == "FAIL")
                .map(move |t| format!("  [FAIL] {}: {}\n", suite.name, t.name))
        })
        .collect();
    if !failed.is_empty() {
        out.push('\n');
        for line in failed {
            out.push_str(&line);
        }
    }

    out.push_str(&format!(
        "\n=== {} tests in {} ===\n",
        model.total_tests, model.total_execution_time
    ));

    out
}
