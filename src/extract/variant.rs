//! Build variant classification
//!
//! A variant describes which build of an application an artifact is
//! (architecture, edition, platform, language). Tags come from the
//! [`VARIANT_RULES`](crate::extract::patterns::VARIANT_RULES) table matched
//! against a scan string built from the filename and link text.

use std::sync::LazyLock;

use crate::extract::file_type::{APK_EXTENSION, WINDOWS_EXECUTABLE_EXTENSION};
use crate::extract::patterns::{VARIANT_TABLE, WholeWord};

pub const UNIVERSAL_VARIANT: &str = "Universal";
pub const WINDOWS_VARIANT: &str = "Windows";
pub const DEFAULT_VARIANT: &str = "Default";

const ARCHITECTURE_TAGS: &[&str] = &["Arm64-v8a", "Armeabi-v7a", "x86_64", "x86", "Arm"];

/// Literal phrases dropped from the scan string before matching.
const BOILERPLATE_PHRASES: &[&str] = &[
    "(farsroid.com)",
    "دانلود فایل نصبی",
    "برنامه با لینک مستقیم",
];

static BOILERPLATE_WORDS: LazyLock<WholeWord> =
    LazyLock::new(|| WholeWord::pattern(r"با لینک مستقیم|direct link|مگابایت|\d+"));

/// Build the lowercased text that variant keywords are matched against.
///
/// Site credits, "direct link" boilerplate, size units and bare numbers are
/// removed so they cannot trigger tags.
pub fn scan_text(link_text: &str, filename: &str) -> String {
    let mut text = format!("{} {}", filename.to_lowercase(), link_text.to_lowercase());
    for phrase in BOILERPLATE_PHRASES {
        text = text.replace(phrase, "");
    }
    BOILERPLATE_WORDS.remove_all(text.trim()).trim().to_string()
}

/// Tags whose surface forms occur as whole words in `scan`, in table order.
///
/// The generic "Mod" tag is suppressed when "Mod-Extra" or "Mod-Lite" is
/// already present, and "Lite" when "Mod-Lite" is.
pub fn classify_scan(scan: &str) -> Vec<&'static str> {
    let mut tags: Vec<&'static str> = Vec::new();
    for tag in VARIANT_TABLE.matching_tags(scan) {
        let shadowed = match tag {
            "Mod" => tags.iter().any(|t| matches!(*t, "Mod-Extra" | "Mod-Lite")),
            "Lite" => tags.contains(&"Mod-Lite"),
            _ => false,
        };
        if !shadowed && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Classify an artifact from its link text and filename.
pub fn classify(link_text: &str, filename: &str) -> Vec<&'static str> {
    classify_scan(&scan_text(link_text, filename))
}

/// Apply extension-driven adjustments to the classified tags: a Windows
/// executable drops the generic "PC" tag in favour of "Windows".
pub fn apply_extension(mut tags: Vec<&'static str>, extension: &str) -> Vec<&'static str> {
    if extension == WINDOWS_EXECUTABLE_EXTENSION {
        tags.retain(|t| *t != "PC");
        if !tags.contains(&WINDOWS_VARIANT) {
            tags.push(WINDOWS_VARIANT);
        }
    }
    tags
}

/// Whether any architecture tag is present.
pub fn has_architecture(tags: &[&str]) -> bool {
    tags.iter().any(|t| ARCHITECTURE_TAGS.contains(t))
}

/// Sorted, deduplicated, dash-joined tag list.
pub fn join_tags(tags: &[&str]) -> String {
    let mut sorted: Vec<&str> = tags.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.join("-")
}

/// Final variant string used for display and tracking.
///
/// Falls back to `Universal` for an APK with no architecture tag, `Windows`
/// for an executable and `Default` otherwise.
pub fn variant_label(tags: &[&str], extension: &str) -> String {
    let joined = join_tags(tags);
    if !joined.is_empty() {
        return joined;
    }
    if extension == APK_EXTENSION && !has_architecture(tags) {
        UNIVERSAL_VARIANT.to_string()
    } else if extension == WINDOWS_EXECUTABLE_EXTENSION {
        WINDOWS_VARIANT.to_string()
    } else {
        DEFAULT_VARIANT.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn scan_text_strips_boilerplate_and_numbers() {
        assert_eq!(
            scan_text("Arm64-v8a 5.1.0", "example-5.1.0-arm64.apk"),
            "example-..-arm64.apk arm64-v8a .."
        );
    }

    #[rstest]
    #[case("Arm64-v8a 5.1.0", "example-5.1.0-arm64.apk", vec!["Arm64-v8a"])]
    #[case("Mod-Extra version", "app-mod-extra.apk", vec!["Mod-Extra"])]
    #[case("Mod-Lite", "app.apk", vec!["Mod-Lite"])]
    #[case("Mod version", "app.apk", vec!["Mod"])]
    #[case("نسخه مود اکسترا", "app.apk", vec!["Mod-Extra"])]
    #[case("Pro Persian armv7", "app.apk", vec!["Pro", "Persian", "Armeabi-v7a"])]
    #[case("x86_64", "app.apk", vec!["x86_64"])]
    #[case("Data file", "app-data.zip", vec!["Data"])]
    #[case("Direct link", "app.apk", vec![])]
    #[case("نسخه آنلاک\u{200c}شده", "app.apk", vec!["Unlocked"])]
    #[case("نسخه\u{200c}مود اکسترا", "app.apk", vec!["Mod-Extra"])]
    fn classify_returns_expected_tags(
        #[case] link_text: &str,
        #[case] filename: &str,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(classify(link_text, filename), expected);
    }

    #[test]
    fn executable_replaces_pc_with_windows() {
        let tags = apply_extension(vec!["PC", "Pro"], ".exe");
        assert_eq!(tags, vec!["Pro", "Windows"]);
    }

    #[test]
    fn non_executable_keeps_pc() {
        assert_eq!(apply_extension(vec!["PC"], ".zip"), vec!["PC"]);
    }

    #[rstest]
    #[case(vec![], ".apk", "Universal")]
    #[case(vec![], ".exe", "Windows")]
    #[case(vec![], ".zip", "Default")]
    #[case(vec!["Mod", "Arm64-v8a"], ".apk", "Arm64-v8a-Mod")]
    #[case(vec!["Arm64-v8a", "Mod", "Mod"], ".apk", "Arm64-v8a-Mod")]
    fn variant_label_returns_expected(
        #[case] tags: Vec<&str>,
        #[case] extension: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(variant_label(&tags, extension), expected);
    }
}
