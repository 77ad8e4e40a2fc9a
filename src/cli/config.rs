use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::cli::scrape::ScrapedConfig;
use crate::junit::attempt::ParsedRun;
use crate::reconcile::mode::ReconcileMode;
use crate::report::digest::DEFAULT_TITLE;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "playwright-report",
    version,
    about = "Aggregate multi-attempt JUnit results into a dashboard and a webhook digest"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: playwright-report.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the HTML dashboard from a results XML file
    Dashboard(DashboardArgs),

    /// Send a text digest of a results XML file to WEBHOOK_URL
    Webhook(WebhookArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct DashboardArgs {
    /// Path to the main results XML file
    pub results: PathBuf,

    /// How repeated attempts are reconciled: retry or multi-env
    #[arg(long)]
    pub mode: Option<ReconcileMode>,

    /// Suites to chart, comma separated (default: all suites)
    #[arg(short, long, value_delimiter = ',')]
    pub suites: Vec<String>,

    /// Directory the report is written to
    #[arg(short = 'd', long)]
    pub output_dir: Option<String>,

    /// Report file name (.html is appended when missing)
    #[arg(short, long)]
    pub filename: Option<String>,

    /// Browser the run used
    #[arg(long)]
    pub browser: Option<String>,

    /// Screen resolution, e.g. 1920x1080
    #[arg(long)]
    pub resolution: Option<String>,

    /// Frontend environment URL
    #[arg(long)]
    pub frontend_url: Option<String>,

    /// Backend environment URL
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Test runner config to scrape for browser/resolution settings
    #[arg(long, default_value = "playwright.config.js")]
    pub runner_config: PathBuf,

    /// Runner JSON results with run metadata (default: test-results.json next to the XML)
    #[arg(long)]
    pub metadata: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct WebhookArgs {
    /// Path to the main results XML file
    pub results: PathBuf,

    /// Results XML of a separate rerun of the failures
    #[arg(long)]
    pub rerun: Option<PathBuf>,

    /// How repeated attempts are reconciled: retry or multi-env
    #[arg(long)]
    pub mode: Option<ReconcileMode>,

    /// Report title
    #[arg(short, long)]
    pub title: Option<String>,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `playwright-report.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub dashboard: DashboardFileConfig,
    #[serde(default)]
    pub webhook: WebhookFileConfig,
}

/// Every field optional so unset keys fall through to earlier layers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardFileConfig {
    pub mode: Option<ReconcileMode>,
    pub output_dir: Option<String>,
    pub filename: Option<String>,
    pub browser: Option<String>,
    pub resolution: Option<String>,
    pub frontend_url: Option<String>,
    pub backend_url: Option<String>,
    pub suites: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookFileConfig {
    pub mode: Option<ReconcileMode>,
    pub title: Option<String>,
}

// ============================================================================
// Config File Loading
// ============================================================================

pub const DEFAULT_CONFIG_FILE: &str = "playwright-report.yaml";

/// Load config from a YAML file. Returns defaults if the file is missing,
/// unreadable or malformed; only a missing file goes unreported.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_FILE);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("ignoring malformed config file {}: {}", config_path, e);
            AppConfig::default()
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
        Err(e) => {
            tracing::warn!("ignoring unreadable config file {}: {}", config_path, e);
            AppConfig::default()
        }
    }
}

// ============================================================================
// Resolved configuration (defaults → scraped → discovered → file → CLI)
// ============================================================================

pub const DEFAULT_OUTPUT_DIR: &str = "logs";
pub const DEFAULT_FILENAME: &str = "dashboard_playwright.html";
pub const DEFAULT_BROWSER: &str = "Chromium";
pub const DEFAULT_RESOLUTION: &str = "1280x720";
pub const DEFAULT_FRONTEND_URL: &str = "https://front.serverest.dev";
pub const DEFAULT_BACKEND_URL: &str = "https://serverest.dev";

/// Facts read off the parsed results document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveredInfo {
    pub available_suites: Vec<String>,
    pub executed_browsers: Vec<String>,
}

impl DiscoveredInfo {
    pub fn from_run(run: &ParsedRun) -> Self {
        Self {
            available_suites: run.available_suites(),
            executed_browsers: run.executed_hosts(),
        }
    }

    /// First executed host, capitalized (`chromium` → `Chromium`).
    pub fn primary_browser(&self) -> Option<String> {
        self.executed_browsers.first().map(|b| capitalize(b))
    }
}

/// Final settings for one dashboard invocation. Built once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub mode: ReconcileMode,
    pub output_dir: PathBuf,
    pub filename: String,
    pub browser: String,
    pub resolution: String,
    pub frontend_url: String,
    pub backend_url: String,

    /// Suites to chart; empty charts every suite
    pub suites: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            mode: ReconcileMode::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            filename: DEFAULT_FILENAME.to_string(),
            browser: DEFAULT_BROWSER.to_string(),
            resolution: DEFAULT_RESOLUTION.to_string(),
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            suites: Vec::new(),
        }
    }
}

impl ReportConfig {
    /// Layer every source over the defaults; later layers win field by field.
    pub fn resolve(
        scraped: &ScrapedConfig,
        discovered: &DiscoveredInfo,
        file: &DashboardFileConfig,
        cli: &DashboardArgs,
    ) -> Self {
        let mut config = ReportConfig::default();

        // Runner config source
        if let Some(dir) = &scraped.output_dir {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(res) = &scraped.resolution {
            config.resolution = res.clone();
        }

        // Results document
        if let Some(browser) = discovered.primary_browser() {
            config.browser = browser;
        }
        if !discovered.available_suites.is_empty() {
            config.suites = discovered.available_suites.clone();
        }

        // Config file
        apply(&mut config.mode, file.mode);
        apply_path(&mut config.output_dir, file.output_dir.as_deref());
        apply(&mut config.filename, file.filename.clone());
        apply(&mut config.browser, file.browser.clone());
        apply(&mut config.resolution, file.resolution.clone());
        apply(&mut config.frontend_url, file.frontend_url.clone());
        apply(&mut config.backend_url, file.backend_url.clone());
        if let Some(suites) = &file.suites {
            let suites = clean_suites(suites);
            if !suites.is_empty() {
                config.suites = suites;
            }
        }

        // CLI flags
        apply(&mut config.mode, cli.mode);
        apply_path(&mut config.output_dir, cli.output_dir.as_deref());
        apply(&mut config.filename, cli.filename.clone());
        apply(&mut config.browser, cli.browser.clone());
        apply(&mut config.resolution, cli.resolution.clone());
        apply(&mut config.frontend_url, cli.frontend_url.clone());
        apply(&mut config.backend_url, cli.backend_url.clone());
        let cli_suites = clean_suites(&cli.suites);
        if !cli_suites.is_empty() {
            config.suites = cli_suites;
        }

        config.filename = ensure_html_extension(&config.filename);
        config
    }

    /// Where the dashboard ends up.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.filename)
    }
}

/// Settings for one webhook invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookConfig {
    pub mode: ReconcileMode,
    pub title: String,
}

impl WebhookConfig {
    pub fn resolve(file: &WebhookFileConfig, cli: &WebhookArgs) -> Self {
        let mut config = WebhookConfig {
            mode: ReconcileMode::default(),
            title: DEFAULT_TITLE.to_string(),
        };
        apply(&mut config.mode, file.mode);
        apply(&mut config.title, file.title.clone());
        apply(&mut config.mode, cli.mode);
        apply(&mut config.title, cli.title.clone());
        config
    }
}

/// Append `.html` unless the name already ends with it (any case).
pub fn ensure_html_extension(filename: &str) -> String {
    if filename.to_lowercase().ends_with(".html") {
        filename.to_string()
    } else {
        format!("{}.html", filename)
    }
}

fn apply<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

fn apply_path(slot: &mut PathBuf, value: Option<&str>) {
    if let Some(v) = value {
        *slot = Path::new(v).to_path_buf();
    }
}

fn clean_suites(suites: &[String]) -> Vec<String> {
    suites
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
