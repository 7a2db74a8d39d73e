//! Shared static tables for the extraction layer
//!
//! Every regex and keyword table is built once on first use and never
//! mutated afterwards. The keyword tables go through [`KeywordTable`], which
//! provides the two operations the extractors need: classifying text by the
//! tags whose surface forms occur in it, and stripping those forms out.

use std::sync::LazyLock;

use regex::Regex;

/// Patterns used to remove version-looking substrings from names.
///
/// Applied in order; the third one catches bare trailing numbers such as
/// "Example 2".
pub static VERSION_CLEANING: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\s*[vV]?\d+(?:\.\d+){1,3}(?:(?:[-._]?[a-zA-Z0-9]+)+)?\b",
        r"(?i)\s*[vV]?\d+(?:\.\d+){1,2}\b",
        r"(?i)\s+\d+(?:\.\d+)*\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// The same cleaning family anchored at the end of the input.
pub static TRAILING_VERSION_CLEANING: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    VERSION_CLEANING
        .iter()
        .map(|re| Regex::new(&format!("{}$", re.as_str())).unwrap())
        .collect()
});

/// Site-credit parenthetical at the end of a name, e.g. "(www.farsroid.com)".
pub static SITE_CREDIT_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*\((?:www\.)?farsroid\.com.*?\)\s*$").unwrap()
});

/// Site-credit parenthetical anywhere in a filename.
pub static SITE_CREDIT_ANYWHERE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*\((?:www\.)?farsroid\.com.*?\)\s*").unwrap()
});

/// Trailing " - SiteName" suffix.
pub static SITE_NAME_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*[-–—]\s*Farsroid\s*$").unwrap());

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Variant, edition, platform and brand words removed from names before
/// deriving a tracking identity. Bilingual; order does not matter because
/// [`KeywordTable::stripping`] sorts longest-first.
#[rustfmt::skip]
pub const NAME_NOISE_WORDS: &[&str] = &[
    "Mod-Extra", "مود اکسترا", "موداکسترا",
    "Mod-Lite", "مود لایت", "مودلایت",
    "Ad-Free", "بدون تبلیغات",
    "Unlocked", "آنلاک شده", "آنلاک\u{200c}شده", "آنلاک",
    "Patched", "پچ شده",
    "Premium", "پرمیوم",
    "Persian", "فارسی",
    "English", "انگلیسی",
    "Universal", "یونیورسال",
    "Original", "اورجینال", "اصلی", "معمولی",
    "Arm64-v8a", "Armeabi-v7a", "x86_64",
    "Arm64", "Armv7", "Arm", "x86",
    "Windows", "ویندوز", "PC", "کامپیوتر",
    "macOS", "Mac", "OSX",
    "Linux", "لینوکس",
    "Ultra", "اولترا",
    "Clone", "کلون",
    "Beta", "بتا",
    "Full", "کامل",
    "Lite", "لایت",
    "Main",
    "Data", "دیتا", "Obb",
    "Mod", "مود",
    "Pro", "پرو",
    "VIP", "وی آی پی",
    "Plus", "پلاس",
    "Image", "تصویر",
    "Audio", "صوتی",
    "Video", "ویدیو",
    "Document", "سند", "Text", "متن",
    "Archive", "آرشیو",
    "Font", "فونت",
];

/// Canonical variant tag and the surface forms that select it, in priority
/// order.
pub const VARIANT_RULES: &[(&str, &[&str])] = &[
    ("Mod-Extra", &["mod-extra", "مود اکسترا"]),
    ("Mod-Lite", &["mod-lite", "مود لایت"]),
    ("Ad-Free", &["ad-free", "بدون تبلیغات"]),
    ("Unlocked", &["unlocked", "آنلاک"]),
    ("Patched", &["patched", "پچ شده"]),
    ("Premium", &["premium", "پرمیوم"]),
    ("Ultra", &["ultra", "اولترا"]),
    ("Clone", &["clone", "کلون"]),
    ("Beta", &["beta", "بتا"]),
    ("Full", &["full", "کامل"]),
    ("Lite", &["lite", "لایت"]),
    ("Main", &["main"]),
    ("Pro", &["pro", "پرو"]),
    ("VIP", &["vip"]),
    ("Plus", &["plus", "پلاس"]),
    ("Persian", &["persian", "فارسی"]),
    ("English", &["english", "انگلیسی"]),
    ("Arm64-v8a", &["arm64-v8a", "arm64"]),
    ("Armeabi-v7a", &["armeabi-v7a", "armv7"]),
    ("x86_64", &["x86_64"]),
    ("x86", &["x86"]),
    ("Arm", &["arm"]),
    ("Mod", &["mod", "مود"]),
    ("PC", &["pc", "کامپیوتر"]),
    ("Windows", &["windows", "ویندوز"]),
    ("Data", &["data", "obb", "دیتا"]),
];

/// Zero-width (non-)joiners glue Persian word parts together without being
/// part of either word.
const JOINERS: [char; 2] = ['\u{200c}', '\u{200d}'];

fn is_word_char(c: char) -> bool {
    (c.is_alphanumeric() || c == '_') && !JOINERS.contains(&c)
}

/// Case-insensitive pattern that only matches whole words.
///
/// The `regex` crate's `\b` treats joiners as word characters, which would
/// hide "آنلاک" inside "آنلاک\u{200c}شده"; the boundary is checked on the
/// neighbouring characters instead.
pub struct WholeWord {
    re: Regex,
}

impl WholeWord {
    /// Match the literal `form` as a whole word.
    pub fn literal(form: &str) -> Self {
        Self::pattern(&regex::escape(form))
    }

    /// Match the regex `pattern` as a whole word.
    pub fn pattern(pattern: &str) -> Self {
        Self {
            re: Regex::new(&format!("(?i)(?:{pattern})")).unwrap(),
        }
    }

    /// Byte ranges of the bounded, non-overlapping matches in `text`.
    fn ranges(&self, text: &str) -> Vec<(usize, usize)> {
        let mut found = Vec::new();
        let mut at = 0;
        while let Some(m) = self.re.find_at(text, at) {
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
                found.push((m.start(), m.end()));
                at = m.end().max(m.start() + 1);
            } else {
                at = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
            }
            if at > text.len() {
                break;
            }
        }
        found
    }

    pub fn is_match(&self, text: &str) -> bool {
        !self.ranges(text).is_empty()
    }

    /// Remove every bounded match from `text`.
    pub fn remove_all(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut last = 0;
        for (start, end) in self.ranges(text) {
            result.push_str(&text[last..start]);
            last = end;
        }
        result.push_str(&text[last..]);
        result
    }
}

/// A tag together with compiled whole-word matchers for its surface forms.
struct KeywordEntry {
    tag: &'static str,
    forms: Vec<WholeWord>,
}

/// Ordered table of (tag, surface forms) with whole-word, case-insensitive
/// matching.
pub struct KeywordTable {
    entries: Vec<KeywordEntry>,
}

impl KeywordTable {
    /// Table whose entries keep the given priority order.
    pub fn ordered(rules: &[(&'static str, &[&str])]) -> Self {
        let entries = rules
            .iter()
            .map(|&(tag, forms)| KeywordEntry {
                tag,
                forms: forms.iter().map(|f| WholeWord::literal(f)).collect(),
            })
            .collect();
        Self { entries }
    }

    /// Table of single words sorted longest-first so multi-word phrases are
    /// removed before their substrings.
    pub fn stripping(words: &[&'static str]) -> Self {
        let mut unique: Vec<&'static str> = Vec::new();
        for &word in words {
            if !unique.contains(&word) {
                unique.push(word);
            }
        }
        unique.sort_by_key(|w| std::cmp::Reverse(w.chars().count()));

        let entries = unique
            .into_iter()
            .map(|word| KeywordEntry {
                tag: word,
                forms: vec![WholeWord::literal(word)],
            })
            .collect();
        Self { entries }
    }

    /// Iterate over the tags that have at least one form occurring in `text`,
    /// in table order.
    pub fn matching_tags<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        self.entries
            .iter()
            .filter(|entry| entry.forms.iter().any(|re| re.is_match(text)))
            .map(|entry| entry.tag)
    }

    /// Remove every whole-word occurrence of every form, tidying separators
    /// after each removal until the text stops changing.
    pub fn strip(&self, text: &str) -> String {
        let mut current = text.to_string();
        for entry in &self.entries {
            for re in &entry.forms {
                loop {
                    let next = tidy(&re.remove_all(&current));
                    if next == current {
                        break;
                    }
                    current = next;
                }
            }
        }
        current
    }
}

pub static NAME_NOISE_TABLE: LazyLock<KeywordTable> =
    LazyLock::new(|| KeywordTable::stripping(NAME_NOISE_WORDS));

pub static VARIANT_TABLE: LazyLock<KeywordTable> =
    LazyLock::new(|| KeywordTable::ordered(VARIANT_RULES));

/// Collapse whitespace runs to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Trim spaces, dashes, underscores and joiners from both ends.
pub fn trim_separators(text: &str) -> &str {
    text.trim_matches(|c: char| matches!(c, '-' | '_' | ' ') || JOINERS.contains(&c))
}

/// Trim separators, collapse whitespace, trim again.
pub fn tidy(text: &str) -> String {
    trim_separators(&collapse_whitespace(trim_separators(text))).to_string()
}

/// Remove every version-looking substring, repeating until nothing changes.
pub fn strip_versions(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let mut next = current.clone();
        for re in VERSION_CLEANING.iter() {
            next = tidy(&re.replace_all(&next, ""));
        }
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Remove version-looking text only where it ends the input.
pub fn strip_trailing_versions(text: &str) -> String {
    let mut current = text.to_string();
    for re in TRAILING_VERSION_CLEANING.iter() {
        current = trim_separators(&re.replace(&current, "")).to_string();
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Super App v3.2.1", "Super App")]
    #[case("Super App 3.2 build", "Super App build")]
    #[case("Example 2", "Example")]
    #[case("Telegram 10.14.5-beta", "Telegram")]
    #[case("No Version Here", "No Version Here")]
    fn strip_versions_removes_embedded_versions(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_versions(input), expected);
    }

    #[test]
    fn strip_trailing_versions_keeps_inner_versions() {
        assert_eq!(strip_trailing_versions("App 2.0 Edition"), "App 2.0 Edition");
        assert_eq!(strip_trailing_versions("App Edition 2.0"), "App Edition");
    }

    #[test]
    fn stripping_table_removes_longest_phrases_first() {
        // "Mod" would leave "-Extra" behind if it ran before "Mod-Extra".
        assert_eq!(NAME_NOISE_TABLE.strip("Super App Mod-Extra"), "Super App");
        assert_eq!(NAME_NOISE_TABLE.strip("تلگرام مود اکسترا"), "تلگرام");
    }

    #[rstest]
    #[case("نسخه آنلاک\u{200c}شده", true)]
    #[case("تلگرام\u{200c}آنلاک", true)]
    #[case("آنلاکر", false)]
    #[case("x آنلاک_y", false)]
    fn whole_word_treats_joiners_as_separators(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(WholeWord::literal("آنلاک").is_match(text), expected);
    }

    #[test]
    fn whole_word_remove_all_keeps_neighbours() {
        let digits = WholeWord::pattern(r"\d+");
        assert_eq!(digits.remove_all("v8a 5.1.0 x64"), "v8a .. x64");
    }

    #[test]
    fn strip_only_removes_whole_words() {
        assert_eq!(NAME_NOISE_TABLE.strip("Modern Proxy"), "Modern Proxy");
    }

    #[test]
    fn matching_tags_follows_table_order() {
        let tags: Vec<_> = VARIANT_TABLE
            .matching_tags("windows version pro arm64-v8a")
            .collect();
        assert_eq!(tags, vec!["Pro", "Arm64-v8a", "Windows"]);
    }

    #[test]
    fn tidy_collapses_and_trims() {
        assert_eq!(tidy("  - Super   App _ "), "Super App");
    }
}
