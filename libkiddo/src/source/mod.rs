//! Content source abstraction and implementations
//!
//! The store talks to the learning backend through the `ContentSource`
//! trait so tests can substitute a scripted mock for the real endpoint.
//!
//! # Examples
//!
//! ```no_run
//! use libkiddo::config::Config;
//! use libkiddo::source::{ContentSource, HttpContentSource};
//! use libkiddo::types::Category;
//!
//! # async fn example() -> libkiddo::error::Result<()> {
//! let config = Config::default_config();
//! let source = HttpContentSource::new(&config.api)?;
//!
//! let items = source.fetch_page(Category::Animal, 1, 10).await?;
//! println!("fetched {} items", items.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Category, ContentItem};

pub mod http;

// Mock source is available for all builds (not just tests) to support integration tests
pub mod mock;

pub use http::HttpContentSource;
pub use mock::MockContentSource;

/// A paged provider of categorized content
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch one page of content for a category.
    ///
    /// Pages are 1-based. An empty result means the category has no more
    /// content at this page; callers treat it as the exhaustion signal.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Request` on transport failure and
    /// `ApiError::Status` when the server answers with a non-success code.
    async fn fetch_page(&self, category: Category, page: u32, limit: u32)
        -> Result<Vec<ContentItem>>;
}
