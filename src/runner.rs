//! One complete check run
//!
//! Reads the URL list, scrapes every supported page against the ledger, then
//! persists the update report and the merged ledger.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use scraper::Html;
use tracing::{error, info, warn};

use crate::config::{FetchConfig, PathsConfig};
use crate::fetch::PageSource;
use crate::page::{PageScraper, UpdateRecord, scraper_for};
use crate::tracking::ledger::{Ledger, write_json};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every listed page was attempted
    Completed,
    /// The URL list file does not exist; an empty report was written
    MissingUrlFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub status: RunStatus,
    pub updates: Vec<UpdateRecord>,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Completed
    }
}

/// Page URLs from the contents of a URL list.
///
/// Blank lines and `#` comments are skipped and a leading byte-order mark is
/// removed.
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let url = match line.strip_prefix(BYTE_ORDER_MARK) {
                Some(stripped) => {
                    info!("Removed byte-order mark from URL '{}'", stripped.trim());
                    stripped.trim()
                }
                None => line,
            };
            (!url.is_empty() && !url.starts_with('#')).then(|| url.to_string())
        })
        .collect()
}

/// Read the URL list, or `None` when the file does not exist.
pub fn read_url_list(path: &Path) -> anyhow::Result<Option<Vec<String>>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read URL list {}", path.display()))?;
    Ok(Some(parse_url_list(&content)))
}

/// Append the update count to the CI step-output file.
pub fn write_step_output(path: &Path, updates_count: usize) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open step output {}", path.display()))?;
    writeln!(file, "updates_count={updates_count}")
        .with_context(|| format!("Failed to write step output {}", path.display()))?;
    Ok(())
}

/// Parse `markup` and hand it to `scraper`.
///
/// The parsed document never outlives this call, so callers can keep awaiting
/// afterwards.
pub fn scrape_markup(
    scraper: &dyn PageScraper,
    page_url: &str,
    markup: &str,
    ledger: &Ledger,
) -> Vec<UpdateRecord> {
    let document = Html::parse_document(markup);
    scraper.scrape(page_url, &document, ledger)
}

/// Fetch and scrape every URL in order, comparing against `ledger`.
///
/// Pages without a scraper or whose fetch fails are logged and skipped.
pub async fn check_pages(
    urls: &[String],
    source: &dyn PageSource,
    scrapers: &[Arc<dyn PageScraper>],
    ledger: &Ledger,
    marker_class: &str,
) -> Vec<UpdateRecord> {
    let mut updates = Vec::new();
    for (index, url) in urls.iter().enumerate() {
        info!("[{}/{}] Checking {}", index + 1, urls.len(), url);

        let Some(scraper) = scraper_for(scrapers, url) else {
            warn!("No scraper for {}, skipping", url);
            continue;
        };

        let markup = match source.fetch_page(url, marker_class).await {
            Ok(markup) => markup,
            Err(e) => {
                error!("Failed to fetch page {}: {}", url, e);
                continue;
            }
        };

        let found = scrape_markup(scraper.as_ref(), url, &markup, ledger);
        info!(
            "{} update(s) on {} ({} scraper)",
            found.len(),
            url,
            scraper.site().as_str()
        );
        updates.extend(found);
    }
    updates
}

/// Run a full check: read URLs, scrape, then persist the report and the ledger.
pub async fn run(
    paths: &PathsConfig,
    fetch: &FetchConfig,
    source: &dyn PageSource,
    scrapers: &[Arc<dyn PageScraper>],
    step_output: Option<&Path>,
) -> anyhow::Result<RunOutcome> {
    let Some(urls) = read_url_list(&paths.urls)? else {
        error!("URL list {} not found", paths.urls.display());
        finish(paths, &[], step_output)?;
        return Ok(RunOutcome {
            status: RunStatus::MissingUrlFile,
            updates: Vec::new(),
        });
    };

    if urls.is_empty() {
        info!("No URLs to check in {}", paths.urls.display());
        finish(paths, &[], step_output)?;
        return Ok(RunOutcome {
            status: RunStatus::Completed,
            updates: Vec::new(),
        });
    }

    let ledger = Ledger::load(&paths.tracker);
    info!(
        "Checking {} page(s) against {} tracked version(s)",
        urls.len(),
        ledger.len()
    );

    let updates = check_pages(&urls, source, scrapers, &ledger, &fetch.marker_class).await;

    let mut merged = ledger.clone();
    merged.apply(&updates);
    let _ = merged.save(&paths.tracker).inspect_err(|e| {
        error!(
            "Failed to save ledger {}: {}",
            paths.tracker.display(),
            e
        )
    });

    finish(paths, &updates, step_output)?;
    info!("Found {} update(s)", updates.len());

    Ok(RunOutcome {
        status: RunStatus::Completed,
        updates,
    })
}

fn finish(
    paths: &PathsConfig,
    updates: &[UpdateRecord],
    step_output: Option<&Path>,
) -> anyhow::Result<()> {
    write_json(&paths.output, updates)
        .with_context(|| format!("Failed to write report {}", paths.output.display()))?;
    if let Some(path) = step_output {
        write_step_output(path, updates.len())?;
    }
    Ok(())
}
