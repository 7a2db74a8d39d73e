use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

// =============================================================================
// File locations
// =============================================================================

/// Default URL list, one page URL per line
pub const URL_FILE: &str = "urls_to_check.txt";

/// Default ledger of last reported versions
pub const TRACKING_FILE: &str = "versions_tracker.json";

/// Default update report
pub const OUTPUT_FILE: &str = "updates_found.json";

/// Environment variable naming the CI step-output file
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

// =============================================================================
// Fetch-related constants
// =============================================================================

/// Timeout for page fetches in seconds
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Class of the element marking a rendered download section
pub const DEFAULT_MARKER_CLASS: &str = "downloadbox";

/// Browser-like user agent sent with page requests
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Run configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckerConfig {
    pub paths: PathsConfig,
    pub fetch: FetchConfig,
}

impl CheckerConfig {
    /// Load the configuration from a JSON file, or the defaults when no file is
    /// given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }
}

/// Input and output file locations
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PathsConfig {
    pub urls: PathBuf,
    pub tracker: PathBuf,
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            urls: PathBuf::from(URL_FILE),
            tracker: PathBuf::from(TRACKING_FILE),
            output: PathBuf::from(OUTPUT_FILE),
        }
    }
}

/// Page fetch configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub marker_class: String,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: FETCH_TIMEOUT_SECS,
            marker_class: DEFAULT_MARKER_CLASS.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Returns the CI step-output file, if the environment names one.
pub fn github_output_path() -> Option<PathBuf> {
    github_output_path_with_env(std::env::var(GITHUB_OUTPUT_ENV).ok())
}

fn github_output_path_with_env(value: Option<String>) -> Option<PathBuf> {
    value.filter(|v| !v.trim().is_empty()).map(PathBuf::from)
}
