//! HTTP content source
//!
//! Talks to the learning backend's content endpoint. One GET per page,
//! query-string parameters, JSON body with a `content` array.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::source::ContentSource;
use crate::types::{Category, ContentItem, ContentPage};

/// Content source backed by the remote learning API
pub struct HttpContentSource {
    client: Client,
    base_url: String,
}

impl HttpContentSource {
    /// Create a new HTTP source from API configuration
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` if the HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch_page(
        &self,
        category: Category,
        page: u32,
        limit: u32,
    ) -> Result<Vec<ContentItem>> {
        debug!(category = %category, page, limit, "requesting content page");

        let page_param = page.to_string();
        let limit_param = limit.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("type", category.as_str()),
                ("page", page_param.as_str()),
                ("limit", limit_param.as_str()),
            ])
            .send()
            .await
            .map_err(ApiError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()).into());
        }

        let body: ContentPage = response.json().await.map_err(ApiError::Request)?;
        let items = body.into_items();

        // Tolerate malformed quiz entries from the backend, but leave a trace
        for item in &items {
            if !item.has_consistent_answer() {
                warn!(id = %item.id, title = %item.title, "correctAnswer is not among the options");
            }
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_source_construction() {
        let config = Config::default_config();
        let source = HttpContentSource::new(&config.api);
        assert!(source.is_ok());
    }

    #[test]
    fn test_source_keeps_configured_url() {
        let mut config = Config::default_config();
        config.api.base_url = "http://localhost:9000/api/v1/content".to_string();

        let source = HttpContentSource::new(&config.api).unwrap();
        assert_eq!(source.base_url, "http://localhost:9000/api/v1/content");
    }
}
