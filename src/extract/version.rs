//! Version string extraction from link text and URLs
//!
//! Strategies are tried in order, each against the link text first and then
//! the URL:
//! - rich: `v1.2.3-beta.4`, 2-4 numeric components plus suffix tokens
//! - loose: `v1.2.3`, 2-3 numeric components only
//! - fallback: the first `N.N` run with whatever follows it, no boundary rule
//!
//! The first two must not touch a longer token: the character before the
//! match may not be a word character, `.` or `-`, and the character after it
//! may not be a word character or `.`.

use std::sync::LazyLock;

use regex::Regex;

/// A version pattern compiled twice: anchored at the start for greedy
/// matching, and anchored at both ends to validate shorter candidates.
struct BoundedPattern {
    prefix: Regex,
    full: Regex,
}

impl BoundedPattern {
    fn new(body: &str) -> Self {
        Self {
            prefix: Regex::new(&format!("^(?:{body})")).unwrap(),
            full: Regex::new(&format!("^(?:{body})$")).unwrap(),
        }
    }

    /// Find the leftmost bounded match and return its first capture group.
    ///
    /// When the greedy match is followed by a forbidden character, shorter
    /// candidates ending right before a `-` inside the match are tried from
    /// longest to shortest; any other cut point would end next to a word
    /// character or `.` and fail the boundary anyway.
    fn find<'a>(&self, text: &'a str) -> Option<&'a str> {
        for (start, _) in text.char_indices() {
            if text[..start].chars().next_back().is_some_and(blocks_start) {
                continue;
            }
            let rest = &text[start..];
            let Some(greedy) = self.prefix.captures(rest) else {
                continue;
            };
            let greedy_end = greedy.get(0).map_or(0, |m| m.end());

            let shorter = rest[..greedy_end]
                .char_indices()
                .filter(|&(i, c)| c == '-' && i > 0)
                .map(|(i, _)| i)
                .rev();

            for end in std::iter::once(greedy_end).chain(shorter) {
                if rest[end..].chars().next().is_some_and(blocks_end) {
                    continue;
                }
                let caps = if end == greedy_end {
                    Some(greedy.get(1))
                } else {
                    self.full.captures(&rest[..end]).map(|c| c.get(1))
                };
                if let Some(Some(group)) = caps {
                    return Some(group.as_str());
                }
            }
        }
        None
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn blocks_start(c: char) -> bool {
    is_word_char(c) || c == '.' || c == '-'
}

fn blocks_end(c: char) -> bool {
    is_word_char(c) || c == '.'
}

static BOUNDED_PATTERNS: LazyLock<[BoundedPattern; 2]> = LazyLock::new(|| {
    [
        BoundedPattern::new(r"[vV]?(\d+(?:\.\d+){1,3}(?:(?:[-._]?[a-zA-Z0-9]+)+)?)"),
        BoundedPattern::new(r"[vV]?(\d+(?:\.\d+){1,2})"),
    ]
});

static FALLBACK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+(?:\.\d+){0,2}(?:[.-]?[a-zA-Z0-9]+)*)").unwrap());

/// Extract a version string from `text`, falling back to `url`.
///
/// Returns `None` when no strategy matches either input; callers must skip
/// the artifact since a version is required for tracking.
pub fn extract_version(text: &str, url: &str) -> Option<String> {
    let inputs = [text, url];

    let bounded = inputs.iter().filter(|s| !s.is_empty()).find_map(|input| {
        BOUNDED_PATTERNS
            .iter()
            .find_map(|pattern| pattern.find(input))
    });

    let found = bounded.or_else(|| {
        inputs
            .iter()
            .filter(|s| !s.is_empty())
            .find_map(|input| FALLBACK_PATTERN.captures(input)?.get(1))
            .map(|m| m.as_str())
    })?;

    let trimmed = found.trim_matches(|c: char| matches!(c, '-' | '_' | ' '));
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
