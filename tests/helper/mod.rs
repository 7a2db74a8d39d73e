//! Shared fixtures for integration tests
#![allow(dead_code)]

mod page;
mod source;

pub use page::*;
pub use source::*;
