use std::path::{Path, PathBuf};

use crate::cli::config::{
    AppConfig, DashboardArgs, DiscoveredInfo, ReportConfig, WebhookArgs, WebhookConfig,
};
use crate::cli::scrape::scrape_runner_config_file;
use crate::cli::sidecar::{default_sidecar_path, read_worker_count};
use crate::error::ReportError;
use crate::junit::loader::{load_or_create_results, load_results};
use crate::reconcile::engine::RunSummary;
use crate::report::console::format_console_summary;
use crate::report::digest::{DigestInput, build_digest};
use crate::report::html::render_dashboard;
use crate::report::report_model::{DashboardModel, RunInfo};
use crate::webhook::client::WebhookClient;

// ============================================================================
// dashboard subcommand
// ============================================================================

/// Generate the HTML dashboard and return the path it was written to.
///
/// A missing results file, or one that yields zero tests, is fatal here.
pub fn cmd_dashboard(args: &DashboardArgs, app: &AppConfig) -> Result<PathBuf, ReportError> {
    tracing::info!("generating dashboard from {}", args.results.display());

    let run = load_results(&args.results)?;
    if run.is_empty() {
        return Err(ReportError::NoData {
            path: args.results.clone(),
        });
    }

    let scraped = scrape_runner_config_file(&args.runner_config);
    let discovered = DiscoveredInfo::from_run(&run);
    let config = ReportConfig::resolve(&scraped, &discovered, &app.dashboard, args);
    tracing::debug!("resolved dashboard config: {:?}", config);

    let summary = RunSummary::from_run(&run, config.mode);

    let metadata_path = args
        .metadata
        .clone()
        .unwrap_or_else(|| default_sidecar_path(&args.results));
    let workers = read_worker_count(&metadata_path);

    let model = DashboardModel::build(&summary, &config.suites).with_run_info(RunInfo {
        browser: config.browser.clone(),
        resolution: config.resolution.clone(),
        frontend_url: config.frontend_url.clone(),
        backend_url: config.backend_url.clone(),
        workers: workers.map_or_else(|| RunInfo::default().workers, |w| w.to_string()),
    });

    let html = render_dashboard(&model)?;
    let output_path = config.output_path();
    write_report(&config.output_dir, &output_path, &html)?;

    print!("{}", format_console_summary(&model));
    println!("Dashboard written to {}", display_path(&output_path));
    Ok(output_path)
}

/// Create the output directory (idempotent) and then write the file.
pub fn write_report(dir: &Path, path: &Path, content: &str) -> Result<(), ReportError> {
    std::fs::create_dir_all(dir).map_err(|source| ReportError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    std::fs::write(path, content).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// webhook subcommand
// ============================================================================

/// Build the digest for a results file (and optional rerun file).
///
/// Missing results files are replaced with an empty document on disk, so
/// an absent file produces a zero-test digest rather than an error.
pub fn build_webhook_digest(args: &WebhookArgs, config: &WebhookConfig) -> Result<String, ReportError> {
    let run = load_or_create_results(&args.results)?;
    let rerun = match &args.rerun {
        Some(path) => Some(RunSummary::from_run(&load_or_create_results(path)?, config.mode)),
        None => None,
    };

    let summary = RunSummary::from_run(&run, config.mode);
    Ok(build_digest(&DigestInput {
        title: &config.title,
        summary: &summary,
        run: &run,
        rerun: rerun.as_ref(),
    }))
}

/// Send the digest. `WEBHOOK_URL` is checked before any file is touched.
pub fn cmd_webhook(args: &WebhookArgs, app: &AppConfig) -> Result<(), ReportError> {
    let client = WebhookClient::from_env()?;
    let config = WebhookConfig::resolve(&app.webhook, args);

    tracing::info!("processing results file {}", args.results.display());
    let digest = build_webhook_digest(args, &config)?;
    tracing::debug!("digest:\n{}", digest);

    client.send(&digest)?;
    println!("Report sent to webhook.");
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Absolute form of a path for messages, falling back to the path as given.
fn display_path(path: &Path) -> String {
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
