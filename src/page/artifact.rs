//! Per-link artifact extraction shared by every page scraper

use tracing::{info, warn};
use url::Url;

use crate::extract::file_type::{resolve_extension, split_extension, url_basename};
use crate::extract::patterns::SITE_CREDIT_ANYWHERE;
use crate::extract::variant;
use crate::extract::version::extract_version;
use crate::page::types::{ArtifactCandidate, ExtractedArtifact};
use crate::tracking::key::build_key;

/// Resolve `href` against the page URL.
pub fn resolve_download_url(page_url: &str, href: &str) -> Option<String> {
    let resolved = match Url::parse(page_url) {
        Ok(base) => base.join(href),
        Err(_) => Url::parse(href),
    };
    resolved.ok().map(String::from)
}

/// Percent-decoded last path segment of `download_url`.
pub fn filename_from_url(download_url: &str) -> String {
    let basename = url_basename(download_url);
    urlencoding::decode(&basename)
        .map(|cow| cow.into_owned())
        .unwrap_or(basename)
}

/// Filename to save the artifact under: the URL filename without the site
/// credit, with `extension` reattached if the cleaning left none.
pub fn suggest_filename(filename: &str, extension: &str) -> String {
    let cleaned = SITE_CREDIT_ANYWHERE.replace_all(filename, "").trim().to_string();
    if split_extension(&cleaned).1.is_some() {
        return cleaned;
    }
    let (stem, _) = split_extension(filename);
    let stem = SITE_CREDIT_ANYWHERE.replace_all(stem, "");
    format!("{}{}", stem.trim(), extension)
}

/// Build a candidate from a link's href and text.
pub fn build_candidate(page_url: &str, href: &str, link_text: &str) -> Option<ArtifactCandidate> {
    let Some(download_url) = resolve_download_url(page_url, href) else {
        warn!("Could not resolve href '{}' against {}", href, page_url);
        return None;
    };
    let filename = filename_from_url(&download_url);
    Some(ArtifactCandidate {
        download_url,
        link_text: link_text.trim().to_string(),
        filename,
    })
}

/// Run version, variant and file-type extraction for one candidate.
///
/// Returns `None` when no version can be found; such artifacts cannot be
/// tracked.
pub fn extract_artifact(
    display_name: &str,
    base_name: &str,
    candidate: ArtifactCandidate,
) -> Option<ExtractedArtifact> {
    info!(
        "  URL: {}, link text: '{}'",
        candidate.download_url, candidate.link_text
    );

    let Some(version) = extract_version(&candidate.link_text, &candidate.filename) else {
        warn!("  No version found for {}", candidate.download_url);
        return None;
    };
    info!("  Version: {}", version);

    let scan = variant::scan_text(&candidate.link_text, &candidate.filename);
    let tags = variant::classify_scan(&scan);
    let extension = resolve_extension(&candidate.download_url, &scan);
    info!("  File extension: {}", extension);

    let tags = variant::apply_extension(tags, &extension);
    let variant = variant::variant_label(&tags, &extension);
    info!("  Variant: '{}'", variant);

    let tracking_key = build_key(base_name, &variant, &extension);
    info!("  Tracking key: {}", tracking_key);

    let suggested_filename = suggest_filename(&candidate.filename, &extension);
    info!("  Suggested filename: {}", suggested_filename);

    Some(ExtractedArtifact {
        display_name: display_name.to_string(),
        base_name: base_name.to_string(),
        variant_tags: tags,
        variant,
        extension,
        version,
        tracking_key,
        suggested_filename,
        download_url: candidate.download_url,
    })
}
