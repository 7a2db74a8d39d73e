//! Page source test utilities

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use app_update_checker::fetch::{FetchError, PageSource};

/// Page source serving fixed markup per URL
#[derive(Default)]
pub struct StubPageSource {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl StubPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, markup: String) -> Self {
        self.pages.insert(url.to_string(), markup);
        self
    }

    /// URLs fetched so far, in request order
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for StubPageSource {
    async fn fetch_page(&self, url: &str, _marker_class: &str) -> Result<String, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}
