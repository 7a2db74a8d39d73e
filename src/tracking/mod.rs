//! Version tracking layer
//!
//! # Modules
//!
//! - [`key`]: tracking key derivation from base name and variant
//! - [`compare`]: update detection with PEP 440 ordering and string fallback
//! - [`ledger`]: persisted tracking key to last-seen version mapping
//! - [`error`]: error types for ledger and report persistence

pub mod compare;
pub mod error;
pub mod key;
pub mod ledger;

pub use compare::{UNSEEN_VERSION, is_newer};
pub use error::LedgerError;
pub use key::build_key;
pub use ledger::Ledger;
