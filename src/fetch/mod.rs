//! Page content providers
//!
//! The scraping pipeline never touches the network itself; it is handed the
//! markup of each page by a [`PageSource`].

pub mod error;
pub mod http;
pub mod source;

pub use error::FetchError;
pub use http::HttpPageSource;
pub use source::PageSource;
