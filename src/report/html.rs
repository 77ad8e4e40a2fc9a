use serde::Serialize;

use crate::error::ReportError;
use crate::report::report_model::{DashboardModel, SuiteListing};

// ============================================================================
// HTML dashboard: self-contained page with chart payloads
// ============================================================================

/// Render the dashboard page.
///
/// Features:
/// - Green/red header based on final failures
/// - Summary cards with counts and percentages
/// - Run configuration panel
/// - Four charts fed by inline JSON payloads
/// - One collapsible block per suite, opened when it has failures
/// - Inline CSS; Chart.js is the only external asset
pub fn render_dashboard(model: &DashboardModel) -> Result<String, ReportError> {
    let header_color = if model.all_passed() {
        "#4CAF50"
    } else {
        "#f44336"
    };

    let status_text = if model.all_passed() {
        "ALL TESTS PASSED"
    } else {
        "SOME TESTS FAILED"
    };

    let status_json = script_json(&model.status_distribution)?;
    let suite_time_json = script_json(&model.suite_time_chart)?;
    let suite_results_json = script_json(&model.suite_results_chart)?;
    let slowest_json = script_json(&model.slowest_tests_chart)?;

    let suites: String = model.suites.iter().map(render_suite).collect();

    Ok(format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Test Dashboard - {date}</title>
<script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
<style>
body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 0; padding: 0; background: #f5f5f5; }}
.header {{ background: {header_color}; color: white; padding: 20px 30px; }}
.header h1 {{ margin: 0 0 8px 0; font-size: 24px; }}
.header p {{ margin: 0; font-size: 16px; opacity: 0.9; }}
.content {{ max-width: 1100px; margin: 20px auto; padding: 0 20px; }}
.cards {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 12px; margin-bottom: 20px; }}
.card {{ background: white; border-radius: 6px; padding: 14px 18px; }}
.card .value {{ font-size: 26px; font-weight: bold; }}
.card .label {{ color: #666; font-size: 13px; }}
.card.pass .value {{ color: #2e7d32; }}
.card.recovered .value {{ color: #ef6c00; }}
.card.fail .value {{ color: #c62828; }}
.info {{ background: white; border-radius: 6px; padding: 14px 18px; margin-bottom: 20px; font-size: 14px; }}
.info span {{ margin-right: 24px; }}
.charts {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(480px, 1fr)); gap: 12px; margin-bottom: 20px; }}
.chart {{ background: white; border-radius: 6px; padding: 14px; }}
details.suite {{ background: white; border-radius: 6px; padding: 12px 20px; margin-bottom: 12px; border-left: 4px solid #4CAF50; }}
details.suite.fail {{ border-left-color: #f44336; }}
details.suite summary {{ cursor: pointer; font-weight: bold; }}
table {{ width: 100%; border-collapse: collapse; margin-top: 10px; font-size: 14px; }}
td, th {{ text-align: left; padding: 6px 8px; border-bottom: 1px solid #eee; vertical-align: top; }}
.status-passed {{ color: #2e7d32; font-weight: bold; }}
.status-recovered {{ color: #ef6c00; font-weight: bold; }}
.status-failed {{ color: #c62828; font-weight: bold; }}
pre.failure {{ background: #fff3f3; color: #c62828; padding: 8px; white-space: pre-wrap; font-size: 12px; margin: 6px 0 0 0; }}
</style>
</head>
<body>
<div class="header">
<h1>{status_text}</h1>
<p>{total} tests, {passed} passed, {final_failures} failed in {time} ({date})</p>
</div>
<div class="content">
<div class="cards">
<div class="card"><div class="value">{total}</div><div class="label">Total tests</div></div>
<div class="card pass"><div class="value">{passed}</div><div class="label">Passed ({passed_pct}%)</div></div>
<div class="card"><div class="value">{initial}</div><div class="label">Initial failures</div></div>
<div class="card recovered"><div class="value">{recovered}</div><div class="label">Recovered ({recovered_pct}% of initial failures)</div></div>
<div class="card fail"><div class="value">{final_failures}</div><div class="label">Final failures ({final_pct}%)</div></div>
<div class="card"><div class="value">{time}</div><div class="label">Total execution time</div></div>
</div>
<div class="info">
<span><b>Browser:</b> {browser}</span>
<span><b>Resolution:</b> {resolution}</span>
<span><b>Frontend:</b> {frontend}</span>
<span><b>Backend:</b> {backend}</span>
<span><b>Workers:</b> {workers}</span>
<span><b>Mode:</b> {mode}</span>
</div>
<div class="charts">
<div class="chart"><canvas id="statusChart"></canvas></div>
<div class="chart"><canvas id="suiteTimeChart"></canvas></div>
<div class="chart"><canvas id="suiteResultsChart"></canvas></div>
<div class="chart"><canvas id="slowestChart"></canvas></div>
</div>
{suites}
</div>
<script>
const statusDistribution = {status_json};
const suiteTimeData = {suite_time_json};
const suiteResultsData = {suite_results_json};
const slowestTestsData = {slowest_json};
if (typeof Chart !== "undefined") {{
  new Chart(document.getElementById("statusChart"), {{
    type: "doughnut",
    data: {{ labels: statusDistribution.labels, datasets: [{{ data: statusDistribution.data, backgroundColor: ["#4CAF50", "#FF9800", "#f44336"] }}] }},
    options: {{ plugins: {{ title: {{ display: true, text: "Status distribution" }} }} }}
  }});
  const timed = (id, payload, title) => new Chart(document.getElementById(id), {{
    type: "bar",
    data: {{ labels: payload.labels, datasets: [{{ label: "seconds", data: payload.data, backgroundColor: "#2196F3" }}] }},
    options: {{ indexAxis: "y", plugins: {{ title: {{ display: true, text: title }},
      tooltip: {{ callbacks: {{ label: (ctx) => payload.formatted_times[ctx.dataIndex] }} }} }} }}
  }});
  timed("suiteTimeChart", suiteTimeData, "Time per suite");
  timed("slowestChart", slowestTestsData, "Slowest tests");
  new Chart(document.getElementById("suiteResultsChart"), {{
    type: "bar",
    data: {{ labels: suiteResultsData.labels, datasets: [
      {{ label: "Passed", data: suiteResultsData.passed_data, backgroundColor: "#4CAF50" }},
      {{ label: "Failed", data: suiteResultsData.failed_data, backgroundColor: "#f44336" }}
    ] }},
    options: {{ scales: {{ x: {{ stacked: true }}, y: {{ stacked: true }} }},
      plugins: {{ title: {{ display: true, text: "Results per suite" }} }} }}
  }});
}}
</script>
</body>
</html>"##,
        header_color = header_color,
        status_text = status_text,
        date = escape_html(&model.execution_date),
        total = model.total_tests,
        passed = model.total_passed,
        initial = model.initial_failures,
        recovered = model.recovered,
        final_failures = model.final_failures,
        passed_pct = model.passed_percentage,
        recovered_pct = model.recovered_percentage,
        final_pct = model.final_failures_percentage,
        time = model.total_execution_time,
        browser = escape_html(&model.run_info.browser),
        resolution = escape_html(&model.run_info.resolution),
        frontend = escape_html(&model.run_info.frontend_url),
        backend = escape_html(&model.run_info.backend_url),
        workers = escape_html(&model.run_info.workers),
        mode = model.mode,
        suites = suites,
        status_json = status_json,
        suite_time_json = suite_time_json,
        suite_results_json = suite_results_json,
        slowest_json = slowest_json,
    ))
}

fn render_suite(suite: &SuiteListing) -> String {
    let mut rows = String::new();
    for test in &suite.tests {
        let status_class = format!("status-{}", test.status_label.to_lowercase());
        let browsers = if test.browsers.is_empty() {
            String::new()
        } else {
            format!(" <small>[{}]</small>", escape_html(&test.browsers.join(", ")))
        };
        let failure = if test.message.is_empty() {
            String::new()
        } else {
            format!(
                "<pre class=\"failure\">{}</pre>",
                escape_html(&test.message)
            )
        };

        rows.push_str(&format!(
            "<tr><td>{name}{browsers}<br><small>File: {file}</small>{failure}</td>\
             <td class=\"{class}\">{label}</td><td>{elapsed}</td><td>{attempts}</td></tr>\n",
            name = escape_html(&test.name),
            browsers = browsers,
            file = escape_html(&test.source_file),
            failure = failure,
            class = status_class,
            label = test.status_label,
            elapsed = test.elapsed,
            attempts = test.attempts,
        ));
    }

    format!(
        "<details class=\"suite {class}\"{open}>\n<summary>{name} ({count} tests)</summary>\n\
         <table>\n<tr><th>Test</th><th>Status</th><th>Duration</th><th>Attempts</th></tr>\n\
         {rows}</table>\n</details>\n",
        class = if suite.has_failures { "fail" } else { "pass" },
        open = if suite.has_failures { " open" } else { "" },
        name = escape_html(&suite.name),
        count = suite.tests.len(),
        rows = rows,
    )
}

/// JSON for embedding inside a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> Result<String, ReportError> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
