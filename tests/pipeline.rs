//! Page pipeline tests: markup in, update records out

mod helper;

use app_update_checker::extract::canonicalize;
use app_update_checker::page::{FarsroidScraper, PageScraper, process_page};
use app_update_checker::tracking::{Ledger, build_key, is_newer};

use helper::{Link, PAGE_URL, download_page, page_without_downloads, parse};

const ARM64_URL: &str = "https://dl.example.com/files/example-5.1.0-arm64.apk";

#[test]
fn reports_newer_artifact_with_tracking_fields() {
    let document = parse(&download_page(
        "Example App",
        &[Link::new(ARM64_URL, "Arm64-v8a 5.1.0")],
    ));
    let ledger = Ledger::from_iter([
        ("example_app_arm64-v8a", "4.9.0"),
        ("example_app_arm64_v8a", "4.9.0"),
    ]);

    let updates = process_page(PAGE_URL, &document, &ledger);

    assert_eq!(updates.len(), 1);
    let update = &updates[0];
    assert_eq!(update.tracking_key, "example_app_arm64_v8a");
    assert_eq!(update.version, "5.1.0");
    assert_eq!(update.version_for_tracking, "5.1.0");
    assert_eq!(update.variant, "Arm64-v8a");
    assert_eq!(update.app_name, "Example App");
    assert_eq!(update.download_url, ARM64_URL);
    assert_eq!(update.page_url, PAGE_URL);
    assert_eq!(update.suggested_filename, "example-5.1.0-arm64.apk");
}

#[test]
fn skips_artifact_already_in_ledger() {
    let document = parse(&download_page(
        "Example App",
        &[Link::new(ARM64_URL, "Arm64-v8a 5.1.0")],
    ));
    let ledger = Ledger::from_iter([("example_app_arm64_v8a", "5.1.0")]);

    assert!(process_page(PAGE_URL, &document, &ledger).is_empty());
}

#[test]
fn skips_artifact_older_than_ledger() {
    let document = parse(&download_page(
        "Example App",
        &[Link::new(ARM64_URL, "Arm64-v8a 5.1.0")],
    ));
    let ledger = Ledger::from_iter([("example_app_arm64_v8a", "5.2.0")]);

    assert!(process_page(PAGE_URL, &document, &ledger).is_empty());
}

#[test]
fn page_without_download_section_yields_nothing() {
    let document = parse(&page_without_downloads("Example App"));

    assert!(process_page(PAGE_URL, &document, &Ledger::new()).is_empty());
}

#[test]
fn link_without_version_is_skipped() {
    let document = parse(&download_page(
        "Example App",
        &[
            Link::new("https://dl.example.com/files/example.apk", "Direct link"),
            Link::new(ARM64_URL, "Arm64-v8a 5.1.0"),
        ],
    ));

    let updates = process_page(PAGE_URL, &document, &Ledger::new());

    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].tracking_key, "example_app_arm64_v8a");
}

#[test]
fn default_variants_follow_extension() {
    let document = parse(&download_page(
        "Example App",
        &[
            Link::new("https://dl.example.com/files/example.apk", "Version 5.1.0"),
            Link::new("https://dl.example.com/files/example-setup.exe", "Version 5.1.0"),
        ],
    ));

    let updates = process_page(PAGE_URL, &document, &Ledger::new());
    let variants: Vec<(&str, &str)> = updates
        .iter()
        .map(|u| (u.variant.as_str(), u.tracking_key.as_str()))
        .collect();

    assert_eq!(
        variants,
        vec![
            ("Universal", "example_app_universal"),
            ("Windows", "example_app_windows"),
        ]
    );
}

#[test]
fn reordered_variant_text_maps_to_same_key() {
    let first = parse(&download_page(
        "Example App 5.1.0",
        &[Link::new(ARM64_URL, "Arm64-v8a Mod-Lite 5.1.0")],
    ));
    let second = parse(&download_page(
        "Example App v5.2.0",
        &[Link::new(ARM64_URL, "Mod-Lite Arm64-v8a 5.1.0")],
    ));

    let first = process_page(PAGE_URL, &first, &Ledger::new());
    let second = process_page(PAGE_URL, &second, &Ledger::new());

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(first[0].tracking_key, second[0].tracking_key);
    assert_eq!(first[0].variant, "Arm64-v8a-Mod-Lite");
}

#[test]
fn joiner_separated_edition_gets_its_own_key() {
    let document = parse(&download_page(
        "Example App",
        &[
            Link::new("https://dl.example.com/files/a.apk", "نسخه آنلاک\u{200c}شده 5.1.0"),
            Link::new("https://dl.example.com/files/b.apk", "نسخه معمولی 5.1.0"),
        ],
    ));

    let keys: Vec<String> = process_page(PAGE_URL, &document, &Ledger::new())
        .into_iter()
        .map(|u| u.tracking_key)
        .collect();

    assert_eq!(keys, vec!["example_app_unlocked", "example_app_universal"]);
}

#[test]
fn scraper_trait_matches_process_page() {
    let document = parse(&download_page(
        "Example App",
        &[Link::new(ARM64_URL, "Arm64-v8a 5.1.0")],
    ));

    assert!(FarsroidScraper.can_scrape(PAGE_URL));
    assert_eq!(
        FarsroidScraper.scrape(PAGE_URL, &document, &Ledger::new()),
        process_page(PAGE_URL, &document, &Ledger::new())
    );
}

#[test]
fn canonical_names_ignore_variant_word_order() {
    assert_eq!(
        canonicalize("Super App Mod-Extra v3.2.1"),
        canonicalize("Super App v3.2.1 Mod-Extra")
    );
}

#[test]
fn tracking_key_is_deterministic() {
    assert_eq!(
        build_key("Example App", "Arm64-v8a", ".apk"),
        build_key("Example App", "Arm64-v8a", ".apk")
    );
}

#[test]
fn comparator_properties_hold() {
    assert!(is_newer("2.0.0", "1.9.9"));
    assert!(!is_newer("1.0.0", "1.0.0"));
    assert!(is_newer("1.0", "0.0.0"));
    assert!(!is_newer("", "1.0.0"));
    assert!(is_newer("build-42", "build-41"));
    assert!(!is_newer("build-41", "build-42"));
}
