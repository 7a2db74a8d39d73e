//! Extraction layer
//! - patterns.rs: static regex and keyword tables, strip/classify routine
//! - version.rs: version strings from link text and URLs
//! - name.rs: application display names from headings, titles and URLs
//! - canonical.rs: aggressive base names for tracking keys
//! - variant.rs: build variant tags (architecture, edition, platform, language)
//! - file_type.rs: artifact file extensions

pub mod canonical;
pub mod file_type;
pub mod name;
pub mod patterns;
pub mod variant;
pub mod version;

pub use canonical::canonicalize;
pub use file_type::resolve_extension;
pub use name::extract_name;
pub use variant::classify;
pub use version::extract_version;
