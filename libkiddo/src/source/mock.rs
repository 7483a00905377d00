//! Mock content source for testing
//!
//! Serves scripted pages, simulates failures and latency, and records every
//! request so tests can verify fetch behavior without network access.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ApiError, Result};
use crate::source::ContentSource;
use crate::types::{Category, ContentItem};

/// Configuration for mock source behavior
#[derive(Debug, Clone)]
pub struct MockSourceConfig {
    /// Whether fetches should succeed
    pub fetch_succeeds: bool,
    /// Status code reported when a fetch fails
    pub failure_status: u16,
    /// Delay before responding (simulates network latency)
    pub delay: Duration,
    /// Scripted pages, served front to back; an empty page once exhausted
    pub pages: Arc<Mutex<VecDeque<Vec<ContentItem>>>>,
    /// Number of times fetch_page has been called
    pub fetch_call_count: Arc<Mutex<usize>>,
    /// Requests seen so far, as (category, page, limit)
    pub requests: Arc<Mutex<Vec<(Category, u32, u32)>>>,
}

impl Default for MockSourceConfig {
    fn default() -> Self {
        Self {
            fetch_succeeds: true,
            failure_status: 503,
            delay: Duration::from_millis(0),
            pages: Arc::new(Mutex::new(VecDeque::new())),
            fetch_call_count: Arc::new(Mutex::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Mock content source with configurable behavior
pub struct MockContentSource {
    config: MockSourceConfig,
}

impl MockContentSource {
    /// Create a new mock source with the given configuration
    pub fn new(config: MockSourceConfig) -> Self {
        Self { config }
    }

    /// Create a mock that serves the given pages in order, then empty pages
    pub fn with_pages(pages: Vec<Vec<ContentItem>>) -> Self {
        Self::new(MockSourceConfig {
            pages: Arc::new(Mutex::new(pages.into())),
            ..Default::default()
        })
    }

    /// Create a mock that serves a single page, then empty pages
    pub fn single_page(items: Vec<ContentItem>) -> Self {
        Self::with_pages(vec![items])
    }

    /// Create a mock that always serves empty pages
    pub fn empty() -> Self {
        Self::new(MockSourceConfig::default())
    }

    /// Create a mock that fails every fetch with the given status
    pub fn failure(status: u16) -> Self {
        Self::new(MockSourceConfig {
            fetch_succeeds: false,
            failure_status: status,
            ..Default::default()
        })
    }

    /// Create a mock with a response delay
    pub fn with_delay(pages: Vec<Vec<ContentItem>>, delay: Duration) -> Self {
        Self::new(MockSourceConfig {
            pages: Arc::new(Mutex::new(pages.into())),
            delay,
            ..Default::default()
        })
    }

    /// Get the number of fetch calls made
    pub fn fetch_call_count(&self) -> usize {
        *self.config.fetch_call_count.lock().unwrap()
    }

    /// Get all requests seen so far
    pub fn requests(&self) -> Vec<(Category, u32, u32)> {
        self.config.requests.lock().unwrap().clone()
    }

    /// Get a handle to the shared configuration (for cloning into a store
    /// while keeping access to the counters)
    pub fn config(&self) -> MockSourceConfig {
        self.config.clone()
    }
}

#[async_trait]
impl ContentSource for MockContentSource {
    async fn fetch_page(
        &self,
        category: Category,
        page: u32,
        limit: u32,
    ) -> Result<Vec<ContentItem>> {
        *self.config.fetch_call_count.lock().unwrap() += 1;
        self.config
            .requests
            .lock()
            .unwrap()
            .push((category, page, limit));

        if !self.config.delay.is_zero() {
            tokio::time::sleep(self.config.delay).await;
        }

        if !self.config.fetch_succeeds {
            return Err(ApiError::Status(self.config.failure_status).into());
        }

        let served = self
            .config
            .pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        Ok(served)
    }
}
