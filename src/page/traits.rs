//! Page scraper trait definition

use scraper::Html;

use crate::page::types::{SiteKind, UpdateRecord};
use crate::tracking::ledger::Ledger;

/// Trait for turning one parsed distribution page into update records
pub trait PageScraper: Send + Sync {
    /// Site this scraper understands
    fn site(&self) -> SiteKind;

    /// Check if this scraper can handle the given page URL
    fn can_scrape(&self, url: &str) -> bool;

    /// Extract every artifact on the page and return those newer than the
    /// ledger. A page without the expected structure yields no records.
    fn scrape(&self, page_url: &str, document: &Html, ledger: &Ledger) -> Vec<UpdateRecord>;
}
