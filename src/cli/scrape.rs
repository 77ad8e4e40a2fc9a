use std::collections::BTreeMap;
use std::path::Path;

use regex::Regex;

/// Resolution of the stock desktop devices.
const DEVICE_RESOLUTIONS: &[(&str, &str)] = &[
    ("Desktop Chrome", "1280x720"),
    ("Desktop Firefox", "1280x720"),
    ("Desktop Safari", "1280x720"),
];

/// Settings recovered from the test runner's config source.
///
/// Best effort: every field is optional and defaulted downstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapedConfig {
    /// Parent directory of the runner's `outputDir`
    pub output_dir: Option<String>,
    pub resolution: Option<String>,
    pub configured_devices: Vec<String>,

    /// Project name → `WxH`
    pub browser_resolutions: BTreeMap<String, String>,
}

/// Read and scrape a runner config file. Missing or unreadable → empty.
pub fn scrape_runner_config_file(path: &Path) -> ScrapedConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => scrape_runner_config(&content),
        Err(e) => {
            tracing::debug!("runner config {} not read: {}", path.display(), e);
            ScrapedConfig::default()
        }
    }
}

/// Pull output dir, devices and viewport sizes out of config source text.
pub fn scrape_runner_config(content: &str) -> ScrapedConfig {
    let mut scraped = ScrapedConfig::default();

    if let Some(dir) = capture(r#"outputDir:\s*['"]([^'"]+)['"]"#, content) {
        scraped.output_dir = Some(parent_dir(&dir));
    }

    if let Ok(re) = Regex::new(r"devices\['([^']+)'\]") {
        scraped.configured_devices = re
            .captures_iter(content)
            .map(|c| c[1].to_string())
            .collect();
    }

    let project_re = Regex::new(
        r#"name:\s*['"](\w+)['"],\s*use:\s*\{[\s\S]*?viewport:\s*\{\s*width:\s*(\d+),\s*height:\s*(\d+)\s*\}"#,
    );
    let mut first_project: Option<String> = None;
    if let Ok(re) = project_re {
        for c in re.captures_iter(content) {
            let resolution = format!("{}x{}", &c[2], &c[3]);
            first_project.get_or_insert_with(|| resolution.clone());
            scraped.browser_resolutions.insert(c[1].to_string(), resolution);
        }
    }

    let first_viewport = Regex::new(r"viewport:\s*\{\s*width:\s*(\d+),\s*height:\s*(\d+)\s*\}")
        .ok()
        .and_then(|re| re.captures(content).map(|c| format!("{}x{}", &c[1], &c[2])));

    let from_devices = scraped.configured_devices.iter().find_map(|device| {
        DEVICE_RESOLUTIONS
            .iter()
            .find(|(name, _)| name == device)
            .map(|(_, res)| res.to_string())
    });

    scraped.resolution = first_project.or(first_viewport).or(from_devices);
    scraped
}

fn capture(pattern: &str, content: &str) -> Option<String> {
    Regex::new(pattern)
        .ok()?
        .captures(content)
        .map(|c| c[1].to_string())
}

/// `logs/test-output` → `logs`; a bare name has `.` as parent.
fn parent_dir(path: &str) -> String {
    match Path::new(path).parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_string_lossy().into_owned(),
        _ => ".".to_string(),
    }
}
