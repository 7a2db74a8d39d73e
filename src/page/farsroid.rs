//! Download-box page scraper
//!
//! Pages list their artifacts as:
//!
//! ```text
//! section.downloadbox
//!   ul.download-links
//!     li.download-link
//!       a.download-btn[href]
//!         span.txt   (link text)
//! ```
//!
//! Missing structure at any level is not an error, it only means the page
//! contributes no artifacts.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::extract::canonical::canonicalize;
use crate::extract::name::extract_name;
use crate::page::artifact::{build_candidate, extract_artifact};
use crate::page::traits::PageScraper;
use crate::page::types::{SiteKind, UpdateRecord, detect_site};
use crate::tracking::compare::is_newer;
use crate::tracking::ledger::Ledger;

static DOWNLOAD_BOX: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("section.downloadbox").unwrap());
static LINK_LIST: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ul.download-links").unwrap());
static LINK_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.download-link").unwrap());
static LINK_ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.download-btn").unwrap());
static LINK_TEXT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.txt").unwrap());

pub struct FarsroidScraper;

impl PageScraper for FarsroidScraper {
    fn site(&self) -> SiteKind {
        SiteKind::Farsroid
    }

    fn can_scrape(&self, url: &str) -> bool {
        detect_site(url) == Some(SiteKind::Farsroid)
    }

    fn scrape(&self, page_url: &str, document: &Html, ledger: &Ledger) -> Vec<UpdateRecord> {
        process_page(page_url, document, ledger)
    }
}

/// Download links on the page, in document order.
fn download_links(document: &Html) -> Vec<ElementRef<'_>> {
    let Some(download_box) = document.select(&DOWNLOAD_BOX).next() else {
        debug!("No download section found");
        return Vec::new();
    };
    let Some(link_list) = download_box.select(&LINK_LIST).next() else {
        debug!("No download link list found");
        return Vec::new();
    };
    link_list.select(&LINK_ITEM).collect()
}

/// Find every artifact on a download-box page and return the ones newer than
/// `ledger`.
pub fn process_page(page_url: &str, document: &Html, ledger: &Ledger) -> Vec<UpdateRecord> {
    let display_name = extract_name(document, page_url);
    let base_name = canonicalize(&display_name);
    info!(
        "Processing {} (display name '{}', base name '{}')",
        page_url, display_name, base_name
    );

    let items = download_links(document);
    if items.is_empty() {
        info!("No download links on {}", page_url);
        return Vec::new();
    }
    info!("Found {} download links", items.len());

    let mut updates = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        debug!("Processing download link #{}", index + 1);

        let Some(anchor) = item.select(&LINK_ANCHOR).next() else {
            continue;
        };
        let Some(href) = anchor.value().attr("href").filter(|h| !h.trim().is_empty()) else {
            continue;
        };
        let link_text = anchor
            .select(&LINK_TEXT)
            .next()
            .map(|span| span.text().collect::<String>())
            .unwrap_or_default();

        let Some(candidate) = build_candidate(page_url, href, &link_text) else {
            continue;
        };
        let Some(artifact) = extract_artifact(&display_name, &base_name, candidate) else {
            continue;
        };

        let last_version = ledger.last_version(&artifact.tracking_key);
        if is_newer(&artifact.version, last_version) {
            info!(
                "    => Update for {}: {} (previous {})",
                artifact.tracking_key, artifact.version, last_version
            );
            updates.push(UpdateRecord::from_artifact(artifact, page_url));
        } else {
            info!(
                "    => {} is up to date (current {}, previous {})",
                artifact.tracking_key, artifact.version, last_version
            );
        }
    }
    updates
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://www.farsroid.com/example-app/";

    fn page(links: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><head><title>Example App - Farsroid</title></head><body>
            <h1 class="post-title">Example App 5.1.0</h1>
            <section class="downloadbox"><ul class="download-links">{links}</ul></section>
            </body></html>"#
        ))
    }

    #[test]
    fn can_scrape_matches_site_domain() {
        assert!(FarsroidScraper.can_scrape(PAGE_URL));
        assert!(!FarsroidScraper.can_scrape("https://example.com/app/"));
    }

    #[test]
    fn skips_items_without_anchor_or_href() {
        let document = page(
            r#"<li class="download-link"><span>no anchor</span></li>
            <li class="download-link"><a class="download-btn"><span class="txt">v1.0.0</span></a></li>
            <li class="download-link"><a class="download-btn" href="/dl/example-2.0.0.apk"><span class="txt">2.0.0</span></a></li>"#,
        );

        let updates = process_page(PAGE_URL, &document, &Ledger::new());

        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].version, "2.0.0");
        assert_eq!(updates[0].download_url, "https://www.farsroid.com/dl/example-2.0.0.apk");
    }

    #[test]
    fn missing_text_span_uses_url_for_version() {
        let document = page(
            r#"<li class="download-link"><a class="download-btn" href="https://dl.example.com/files/example%209.1%20setup.zip">Download</a></li>"#,
        );

        let updates = process_page(PAGE_URL, &document, &Ledger::new());

        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].version, "9.1");
        assert_eq!(updates[0].variant, "Default");
        assert_eq!(updates[0].tracking_key, "example_app");
    }

    #[test]
    fn keeps_document_order() {
        let document = page(
            r#"<li class="download-link"><a class="download-btn" href="/dl/a.apk"><span class="txt">Arm64-v8a 3.0.0</span></a></li>
            <li class="download-link"><a class="download-btn" href="/dl/b.apk"><span class="txt">Armeabi-v7a 3.0.0</span></a></li>"#,
        );

        let keys: Vec<String> = process_page(PAGE_URL, &document, &Ledger::new())
            .into_iter()
            .map(|u| u.tracking_key)
            .collect();

        assert_eq!(keys, vec!["example_app_arm64_v8a", "example_app_armeabi_v7a"]);
    }
}
