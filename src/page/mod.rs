//! Page scraper layer
//! - traits.rs: PageScraper trait definition
//! - types.rs: Common types (ArtifactCandidate, ExtractedArtifact, UpdateRecord, SiteKind)
//! - artifact.rs: per-link extraction shared by scrapers
//! - farsroid.rs: download-box page scraper

use std::sync::Arc;

pub mod artifact;
pub mod farsroid;
pub mod traits;
pub mod types;

pub use farsroid::{FarsroidScraper, process_page};
pub use traits::PageScraper;
pub use types::{ArtifactCandidate, ExtractedArtifact, SiteKind, UpdateRecord, detect_site};

/// Every scraper the checker knows about.
pub fn default_scrapers() -> Vec<Arc<dyn PageScraper>> {
    vec![Arc::new(FarsroidScraper)]
}

/// First scraper able to handle `url`.
pub fn scraper_for<'a>(
    scrapers: &'a [Arc<dyn PageScraper>],
    url: &str,
) -> Option<&'a Arc<dyn PageScraper>> {
    scrapers.iter().find(|scraper| scraper.can_scrape(url))
}
