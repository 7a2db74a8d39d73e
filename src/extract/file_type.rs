//! File extension resolution for download artifacts

use url::Url;

pub const APK_EXTENSION: &str = ".apk";
pub const WINDOWS_EXECUTABLE_EXTENSION: &str = ".exe";
pub const FALLBACK_EXTENSION: &str = ".bin";

/// Multi-part extensions, checked by suffix before the single-extension split.
pub const DOUBLE_EXTENSIONS: &[&str] = &[".tar.gz", ".tar.bz2", ".tar.xz"];

#[rustfmt::skip]
pub const KNOWN_EXTENSIONS: &[&str] = &[
    // packages and installers
    ".apk", ".zip", ".exe", ".rar", ".xapk", ".apks", ".7z", ".gz", ".bz2", ".xz",
    ".msi", ".dmg", ".pkg", ".deb", ".rpm", ".appimage", ".tgz", ".tbz2", ".txz",
    // images
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".tif", ".webp", ".svg", ".ico",
    // audio
    ".mp3", ".wav", ".ogg", ".aac", ".flac", ".m4a", ".wma",
    // video
    ".mp4", ".mkv", ".avi", ".mov", ".wmv", ".flv", ".webm", ".mpeg", ".mpg",
    // documents
    ".txt", ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx",
    ".odt", ".ods", ".odp", ".rtf", ".csv", ".html", ".htm", ".xml", ".json", ".md",
    // fonts
    ".ttf", ".otf", ".woff", ".woff2", ".eot",
];

/// Keyword hints used when the URL does not carry a known extension.
/// Matched as plain substrings of the lowercased variant scan text.
const KEYWORD_HINTS: &[(&[&str], &str)] = &[
    (&["windows", "pc"], ".exe"),
    (&["macos", "mac"], ".dmg"),
    (&["linux"], ".appimage"),
    (&["data", "obb"], ".zip"),
    (&["font"], ".zip"),
];

/// Last path segment of a URL, without query or fragment.
pub fn url_basename(url: &str) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };
    path.rsplit('/').next().unwrap_or_default().to_string()
}

/// Split off the extension the way a path library does: the text from the
/// last `.`, ignoring leading dots of the name.
pub fn split_extension(filename: &str) -> (&str, Option<&str>) {
    let leading_dots = filename.len() - filename.trim_start_matches('.').len();
    match filename[leading_dots..].rfind('.') {
        Some(pos) => {
            let split = leading_dots + pos;
            (&filename[..split], Some(&filename[split..]))
        }
        None => (filename, None),
    }
}

/// Resolve the extension of the artifact behind `url`.
///
/// Never fails: unknown extensions fall back to keyword inference over
/// `variant_scan_text`, then to the raw extension, then to `.bin`.
pub fn resolve_extension(url: &str, variant_scan_text: &str) -> String {
    let basename = url_basename(url);
    let lowered = basename.to_lowercase();

    if let Some(double) = DOUBLE_EXTENSIONS.iter().find(|ext| lowered.ends_with(*ext)) {
        return double.to_string();
    }

    let raw = split_extension(&basename).1.map(str::to_lowercase);
    if let Some(ext) = raw.as_deref().filter(|ext| KNOWN_EXTENSIONS.contains(ext)) {
        return ext.to_string();
    }

    let scan = variant_scan_text.to_lowercase();
    let hinted = KEYWORD_HINTS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| scan.contains(kw)))
        .map(|(_, ext)| ext.to_string());

    hinted
        .or(raw)
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string())
}
