//! Page source trait for retrieving page markup

#[cfg(test)]
use mockall::automock;

use crate::fetch::error::FetchError;

/// Trait for retrieving the markup of a distribution page
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the markup of `url`
    ///
    /// # Arguments
    /// * `url` - Absolute page URL
    /// * `marker_class` - Class of the element whose presence signals that the
    ///   download section is available
    ///
    /// # Returns
    /// * `Ok(String)` - Complete page markup
    /// * `Err(FetchError)` - If the page could not be retrieved
    async fn fetch_page(&self, url: &str, marker_class: &str) -> Result<String, FetchError>;
}
