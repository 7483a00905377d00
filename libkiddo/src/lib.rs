//! Kiddolearn - offline-friendly content tools for early-learning quizzes
//!
//! This library provides the shared content store behind the kiddolearn
//! command-line tools: fetching categorized learning content from the remote
//! endpoint, caching it for offline use, generating arithmetic questions
//! locally, and tracking quiz scores across runs.

pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod logging;
pub mod math;
pub mod source;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use db::Database;
pub use error::{KiddoError, Result};
pub use events::{EventReceiver, StoreEvent};
pub use source::{ContentSource, HttpContentSource, MockContentSource};
pub use store::{ContentStore, FetchOutcome, StoreSnapshot};
pub use types::{Category, ContentItem, Progress};
