//! Update detection between an extracted version and the ledger
//!
//! Versions are ordered under PEP 440 rules (release segments plus optional
//! pre, post, dev and local parts). Anything that does not parse falls back
//! to plain string ordering.

use std::str::FromStr;

use pep508_rs::pep440_rs::Version;
use tracing::{debug, warn};

/// Ledger value meaning "never seen".
pub const UNSEEN_VERSION: &str = "0.0.0";

/// Whether `current` should be reported as newer than `last`.
///
/// - empty `current`: never newer
/// - empty `last` or [`UNSEEN_VERSION`]: always newer
/// - both parse: newer when greater; when equal under version ordering but
///   spelled differently, the lexicographically greater spelling wins
/// - otherwise: lexicographic comparison
pub fn is_newer(current: &str, last: &str) -> bool {
    debug!("Comparing versions: current='{}', last='{}'", current, last);

    if current.is_empty() {
        warn!("Current version is empty, cannot confirm an update");
        return false;
    }
    if last.is_empty() || last == UNSEEN_VERSION {
        debug!("No previous version recorded, '{}' is new", current);
        return true;
    }

    let parsed = Version::from_str(current).and_then(|c| Version::from_str(last).map(|l| (c, l)));
    match parsed {
        Ok((parsed_current, parsed_last)) => match parsed_current.cmp(&parsed_last) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => is_lexicographically_newer(current, last),
        },
        Err(e) => {
            warn!(
                "Failed to parse '{}' or '{}' as a version ({}), comparing as strings",
                current, last, e
            );
            is_lexicographically_newer(current, last)
        }
    }
}

fn is_lexicographically_newer(current: &str, last: &str) -> bool {
    current != last && current > last
}
