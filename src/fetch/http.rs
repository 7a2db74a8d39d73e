//! HTTP page source
//!
//! Downloads the page as served. Client-side scripts are not executed, so a
//! page that only builds its download section in the browser is returned
//! without it; a warning is logged when the marker element is missing.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

use crate::config::FetchConfig;
use crate::fetch::error::FetchError;
use crate::fetch::source::PageSource;

pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

/// Whether the markup contains an element carrying `marker_class`.
fn contains_marker(body: &str, marker_class: &str) -> bool {
    let Ok(selector) = Selector::parse(&format!(".{marker_class}")) else {
        warn!("Marker class '{}' is not a valid selector", marker_class);
        return false;
    };
    Html::parse_document(body).select(&selector).next().is_some()
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, url: &str, marker_class: &str) -> Result<String, FetchError> {
        debug!("Fetching page: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

        if marker_class.is_empty() || contains_marker(&body, marker_class) {
            info!("Fetched page source for {}", url);
        } else {
            warn!(
                "Marker element '.{}' not found on {}, returning page as served",
                marker_class, url
            );
        }
        Ok(body)
    }
}
