//! Tracking key derivation
//!
//! A tracking key identifies one (application, variant) pair in the ledger.
//! It is a pure function of the canonical base name, the variant string and
//! the artifact extension.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::file_type::APK_EXTENSION;

/// Used when both the name and the variant sanitize to nothing.
pub const UNKNOWN_KEY: &str = "unknown_app_variant";

/// Variant suffixes that carry no information for non-package artifacts.
const GENERIC_SUFFIXES: &[&str] = &[
    "default",
    "archive",
    "image",
    "audio",
    "video",
    "document",
    "font",
    "universal",
];

static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9\-_]").unwrap());
static SEPARATOR_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_]+").unwrap());
static UNDERSCORE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Reduce `text` to `[a-z0-9_]` with single underscores between words.
pub fn sanitize(text: &str) -> String {
    let lowered: String = text
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '–' | '—' => '-',
            c if c.is_whitespace() => '-',
            c => c,
        })
        .collect();
    let kept = DISALLOWED.replace_all(&lowered, "");
    let joined = SEPARATOR_RUNS.replace_all(&kept, "_");
    joined.trim_matches('_').to_string()
}

/// Build the ledger key for `base_name` and `variant`.
///
/// `extension` decides whether a generic variant suffix is kept: it only
/// disambiguates APK builds.
pub fn build_key(base_name: &str, variant: &str, extension: &str) -> String {
    let name_part = sanitize(base_name);
    let variant_part = sanitize(variant);

    match (name_part.is_empty(), variant_part.is_empty()) {
        (true, true) => return UNKNOWN_KEY.to_string(),
        (true, false) => return variant_part,
        (false, true) => return name_part,
        (false, false) => {}
    }

    let joined = format!("{name_part}_{variant_part}");
    let key = UNDERSCORE_RUNS.replace_all(&joined, "_");
    let key = key.trim_matches('_');

    if extension != APK_EXTENSION
        && let Some(stripped) = GENERIC_SUFFIXES
            .iter()
            .find_map(|suffix| key.strip_suffix(suffix)?.strip_suffix('_'))
    {
        return stripped.to_string();
    }
    key.to_string()
}
