//! Common types for page scrapers

use serde::{Deserialize, Serialize};

/// Distribution site a page belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteKind {
    /// farsroid.com application pages
    Farsroid,
}

impl SiteKind {
    /// Returns the string representation of the site kind
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteKind::Farsroid => "farsroid",
        }
    }

    /// Domain fragment that identifies pages of this site
    pub fn domain(&self) -> &'static str {
        match self {
            SiteKind::Farsroid => "farsroid.com",
        }
    }
}

/// Detect which site a page URL belongs to
pub fn detect_site(url: &str) -> Option<SiteKind> {
    let lowered = url.to_lowercase();
    [SiteKind::Farsroid]
        .into_iter()
        .find(|site| lowered.contains(site.domain()))
}

/// One download link found on a page, before any extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactCandidate {
    /// Absolute download URL (href resolved against the page URL)
    pub download_url: String,
    /// Visible link text, empty when the link has no text span
    pub link_text: String,
    /// Percent-decoded last path segment of the download URL
    pub filename: String,
}

/// Everything derived from an [`ArtifactCandidate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArtifact {
    pub display_name: String,
    pub base_name: String,
    /// Classified tags after extension adjustments, in discovery order
    pub variant_tags: Vec<&'static str>,
    /// Sorted, dash-joined tags or an extension default
    pub variant: String,
    pub extension: String,
    pub version: String,
    pub tracking_key: String,
    pub suggested_filename: String,
    pub download_url: String,
}

/// An artifact whose version is newer than the ledger entry for its key
///
/// Field names on the wire match the report format consumed by the
/// notification step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecord {
    pub app_name: String,
    pub version: String,
    pub variant: String,
    pub download_url: String,
    pub page_url: String,
    #[serde(rename = "tracking_id")]
    pub tracking_key: String,
    pub suggested_filename: String,
    /// Value written back into the ledger under `tracking_key`
    #[serde(rename = "current_version_for_tracking")]
    pub version_for_tracking: String,
}

impl UpdateRecord {
    pub fn from_artifact(artifact: ExtractedArtifact, page_url: &str) -> Self {
        Self {
            app_name: artifact.display_name,
            version_for_tracking: artifact.version.clone(),
            version: artifact.version,
            variant: artifact.variant,
            download_url: artifact.download_url,
            page_url: page_url.to_string(),
            tracking_key: artifact.tracking_key,
            suggested_filename: artifact.suggested_filename,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("https://www.farsroid.com/telegram-android/", Some(SiteKind::Farsroid))]
    #[case("https://FARSROID.COM/app/", Some(SiteKind::Farsroid))]
    #[case("https://example.com/app/", None)]
    fn detect_site_returns_expected(#[case] url: &str, #[case] expected: Option<SiteKind>) {
        assert_eq!(detect_site(url), expected);
    }

    #[test]
    fn update_record_serializes_with_report_field_names() {
        let record = UpdateRecord {
            app_name: "Example App".to_string(),
            version: "5.1.0".to_string(),
            variant: "Arm64-v8a".to_string(),
            download_url: "https://dl.example.com/example-5.1.0-arm64.apk".to_string(),
            page_url: "https://www.farsroid.com/example-app/".to_string(),
            tracking_key: "example_app_arm64_v8a".to_string(),
            suggested_filename: "example-5.1.0-arm64.apk".to_string(),
            version_for_tracking: "5.1.0".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "app_name": "Example App",
                "version": "5.1.0",
                "variant": "Arm64-v8a",
                "download_url": "https://dl.example.com/example-5.1.0-arm64.apk",
                "page_url": "https://www.farsroid.com/example-app/",
                "tracking_id": "example_app_arm64_v8a",
                "suggested_filename": "example-5.1.0-arm64.apk",
                "current_version_for_tracking": "5.1.0"
            })
        );
    }
}
