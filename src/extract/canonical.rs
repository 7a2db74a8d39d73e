//! Canonical base names for tracking keys
//!
//! Collapses cosmetic differences in a display name (a version bump, a moved
//! variant word) so the same application always maps to the same identity.

use crate::extract::name::UNKNOWN_APP;
use crate::extract::patterns::{
    NAME_NOISE_TABLE, SITE_CREDIT_SUFFIX, SITE_NAME_SUFFIX, collapse_whitespace, strip_versions,
};

/// Aggressively normalize `display_name` into a stable base name.
///
/// Never returns an empty string: when everything is stripped away the first
/// whitespace-delimited token of the input is used instead.
pub fn canonicalize(display_name: &str) -> String {
    let without_versions = strip_versions(display_name);
    let without_keywords = NAME_NOISE_TABLE.strip(&without_versions);

    let without_credit = SITE_CREDIT_SUFFIX.replace(&without_keywords, "");
    let without_site = SITE_NAME_SUFFIX.replace(without_credit.trim(), "");
    let trimmed = without_site
        .trim()
        .trim_matches(|c: char| matches!(c, ' ' | '-' | '–' | '—'));
    let cleaned = collapse_whitespace(trimmed);

    if !cleaned.is_empty() {
        return cleaned;
    }
    display_name
        .split_whitespace()
        .next()
        .unwrap_or(UNKNOWN_APP)
        .to_string()
}
