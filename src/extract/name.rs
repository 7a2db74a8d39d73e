//! Application display name extraction
//!
//! Preference order:
//! 1. the first `<h1>` whose class contains "title"
//! 2. the document `<title>`, minus site-name and "download" suffixes
//! 3. the last non-empty segment of the page URL path
//!
//! The result is lightly cleaned for display; [`canonicalize`] does the
//! aggressive cleaning used for tracking keys.
//!
//! [`canonicalize`]: crate::extract::canonical::canonicalize

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};
use url::Url;

use crate::extract::file_type::{DOUBLE_EXTENSIONS, KNOWN_EXTENSIONS};
use crate::extract::patterns::{
    SITE_CREDIT_SUFFIX, WholeWord, collapse_whitespace, strip_trailing_versions, strip_versions,
    trim_separators,
};

/// Returned when no source yields a name.
pub const UNKNOWN_APP: &str = "UnknownApp";

/// Localized "Download " prefixes stripped from headings.
const DOWNLOAD_PREFIXES: &[&str] = &["دانلود ", "download "];

static HEADING_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());

static TITLE_SUFFIXES: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)\s*[-|–—]\s*(?:فارسروید|farsroid|دانلود.*|download.*)$").unwrap(),
        Regex::new(r"(?i)\s*–\s*اپلیکیشن.*$").unwrap(),
    ]
});

static FILE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = DOUBLE_EXTENSIONS
        .iter()
        .chain(KNOWN_EXTENSIONS)
        .map(|ext| regex::escape(ext.trim_start_matches('.')))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\.(?:{alternatives})$")).unwrap()
});

static GENERIC_URL_TERMS: LazyLock<WholeWord> = LazyLock::new(|| {
    WholeWord::pattern(r"دانلود|Download|برنامه|App|Apk|Farsroid|Android")
});

static WORD_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_]+").unwrap());

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of the first `<h1>` with a class containing "title", if non-empty.
fn heading_text(document: &Html) -> Option<String> {
    document
        .select(&HEADING_SELECTOR)
        .find(|h1| {
            h1.value()
                .classes()
                .any(|class| class.to_lowercase().contains("title"))
        })
        .map(element_text)
        .filter(|text| !text.is_empty())
}

/// Document title with trailing site-name and "download" suffixes removed.
fn title_text(document: &Html) -> Option<String> {
    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())?;

    let stripped = TITLE_SUFFIXES.iter().fold(title, |acc, re| {
        re.replace(&acc, "").trim().to_string()
    });
    Some(stripped)
}

/// Light display cleaning: drop a "Download " prefix, a trailing site credit
/// and trailing version text.
pub fn clean_display_name(candidate: &str) -> String {
    let mut name = candidate.trim();
    let lowered = name.to_lowercase();
    if let Some(prefix) = DOWNLOAD_PREFIXES.iter().find(|p| lowered.starts_with(*p)) {
        // Both prefixes are case-stable, so the byte length carries over.
        name = name[prefix.len()..].trim();
    }

    let without_credit = SITE_CREDIT_SUFFIX.replace(name, "");
    let without_version = strip_trailing_versions(without_credit.trim());
    let trimmed = without_version.trim_matches(|c: char| matches!(c, ' ' | '-' | '–' | '—'));
    collapse_whitespace(trimmed)
}

/// Guess a name from the last segment of the page URL.
pub fn name_from_url(page_url: &str) -> Option<String> {
    let path = Url::parse(page_url)
        .map(|url| url.path().to_string())
        .unwrap_or_else(|_| page_url.to_string());
    let decoded = urlencoding::decode(&path)
        .map(|cow| cow.into_owned())
        .unwrap_or(path);

    let segment = decoded.split('/').rev().find(|part| !part.is_empty())?;

    let without_ext = FILE_EXTENSION.replace(segment, "");
    let without_version = strip_versions(&without_ext);
    let without_terms = GENERIC_URL_TERMS.remove_all(&without_version);
    let trimmed = trim_separators(&without_terms);

    let words: Vec<String> = WORD_SEPARATORS
        .split(trimmed)
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect();
    let guessed = collapse_whitespace(&words.join(" "));

    (!guessed.is_empty()).then_some(guessed)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Derive the application display name for a page. Never fails; returns
/// [`UNKNOWN_APP`] when every source comes up empty.
pub fn extract_name(document: &Html, page_url: &str) -> String {
    if let Some(candidate) = heading_text(document).or_else(|| title_text(document)) {
        let cleaned = clean_display_name(&candidate);
        if !cleaned.is_empty() {
            info!(
                "Application name from heading/title: '{}' (raw '{}')",
                cleaned, candidate
            );
            return cleaned;
        }
    }

    info!(
        "No usable heading or title, guessing application name from URL {}",
        page_url
    );
    if let Some(guessed) = name_from_url(page_url) {
        info!("Application name guessed from URL: '{}'", guessed);
        return guessed;
    }

    warn!("Could not derive an application name for {}", page_url);
    UNKNOWN_APP.to_string()
}
