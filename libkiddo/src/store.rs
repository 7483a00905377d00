//! Process-wide content store
//!
//! Coordinates fetching, caching, and pagination of categorized learning
//! content, and tracks quiz scoring counters that survive restarts. Front-ends
//! hold one `ContentStore` behind an `Arc` and drive it through three
//! operations: `fetch_by_category`, `fetch_more`, and `track_answer`.
//!
//! Network failures are absorbed: a failed fetch falls back to the per-category
//! offline cache (or an empty list) and reports what happened through the
//! returned [`FetchOutcome`]. Only persistence commits surface as errors.

use std::fmt;
use std::sync::{Arc, RwLock};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::events::{EventBus, EventReceiver, StoreEvent};
use crate::math;
use crate::source::{ContentSource, HttpContentSource};
use crate::types::{Category, ContentItem, Progress};

const EVENT_CAPACITY: usize = 64;

/// What a fetch operation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The guard rejected the call: a fetch was already in flight, or the
    /// category is already active with items loaded
    Skipped,
    /// Arithmetic questions were generated locally (number of items)
    Generated(usize),
    /// The network delivered items (number delivered by this call)
    Fetched(usize),
    /// The network failed and the offline cache served instead (number served)
    Cached(usize),
    /// The requested page was empty; existing items are unchanged
    Exhausted,
    /// The network failed and no cached copy existed
    Failed,
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchOutcome::Skipped => write!(f, "skipped"),
            FetchOutcome::Generated(n) => write!(f, "generated {n} questions"),
            FetchOutcome::Fetched(n) => write!(f, "fetched {n} items"),
            FetchOutcome::Cached(n) => write!(f, "served {n} items from offline cache"),
            FetchOutcome::Exhausted => write!(f, "no more content"),
            FetchOutcome::Failed => write!(f, "content unavailable"),
        }
    }
}

/// Point-in-time copy of the store's state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub items: Vec<ContentItem>,
    pub loading: bool,
    pub active_category: Option<Category>,
    pub page: u32,
    pub progress: Progress,
}

/// In-memory state guarded by the store's lock.
///
/// `page` and `loading` are store-wide, not per-category: one pagination
/// cursor and one in-flight flag cover every category, and a fetch for one
/// category blocks a concurrent fetch for another.
#[derive(Debug)]
struct StoreState {
    items: Vec<ContentItem>,
    loading: bool,
    active_category: Option<Category>,
    page: u32,
    progress: Progress,
}

/// Cache and fetch coordinator for categorized learning content
pub struct ContentStore {
    db: Database,
    source: Arc<dyn ContentSource>,
    page_size: u32,
    batch_size: usize,
    events: EventBus,
    state: RwLock<StoreState>,
}

impl ContentStore {
    /// Create a store, hydrating persisted scoring counters from the database.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the persisted progress blob cannot be read
    /// or decoded.
    pub async fn new(
        db: Database,
        source: Arc<dyn ContentSource>,
        config: &Config,
    ) -> Result<Self> {
        let progress = db.load_progress().await?.unwrap_or_default();
        debug!(
            completed = progress.completed_count,
            correct = progress.correct_count,
            wrong = progress.wrong_count,
            "store hydrated"
        );

        Ok(Self {
            db,
            source,
            page_size: config.api.page_size,
            batch_size: config.quiz.batch_size,
            events: EventBus::new(EVENT_CAPACITY),
            state: RwLock::new(StoreState {
                items: Vec::new(),
                loading: false,
                active_category: None,
                page: 1,
                progress,
            }),
        })
    }

    /// Create a store wired to the remote content endpoint.
    ///
    /// Opens (and migrates) the configured database and builds the HTTP
    /// content source from the API settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated, the
    /// HTTP client cannot be constructed, or persisted progress cannot be
    /// read.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let db = Database::new(&config.database.path).await?;
        let source = HttpContentSource::new(&config.api)?;
        Self::new(db, Arc::new(source), config).await
    }

    /// Load the first page of content for a category.
    ///
    /// Skips when a fetch is already in flight, or when `reset` is false and
    /// the category is already active with items loaded. With `reset` set,
    /// items are cleared and pagination returns to page 1 before fetching.
    ///
    /// The arithmetic category never touches the network: a fresh batch of
    /// questions is generated locally and replaces the items.
    ///
    /// Network failures are absorbed. A failed fetch falls back to the
    /// per-category offline cache, or leaves the items empty when no cache
    /// exists, and the outcome reports which happened.
    ///
    /// # Errors
    ///
    /// Returns a storage error if committing fetched items to the offline
    /// cache fails, or if reading the cache during fallback fails. In-memory
    /// state has already been updated when the commit fails.
    pub async fn fetch_by_category(
        &self,
        category: Category,
        reset: bool,
    ) -> Result<FetchOutcome> {
        // Guard and transition happen under one lock so two callers cannot
        // both pass the check.
        {
            let mut state = self.state.write().unwrap();
            let already_showing = !reset
                && state.active_category == Some(category)
                && !state.items.is_empty();
            if state.loading || already_showing {
                debug!(category = %category, "fetch skipped");
                return Ok(FetchOutcome::Skipped);
            }
            if reset {
                state.items.clear();
                state.page = 1;
            }
            state.loading = true;
            state.active_category = Some(category);
        }

        if category == Category::Math {
            let generated = math::generate_math(self.batch_size);
            let count = generated.len();
            {
                let mut state = self.state.write().unwrap();
                state.items = generated;
                state.loading = false;
            }
            self.events.emit(StoreEvent::FetchCompleted {
                category,
                count,
                served_from: "generated".to_string(),
            });
            debug!(count, "generated arithmetic batch");
            return Ok(FetchOutcome::Generated(count));
        }

        self.events.emit(StoreEvent::FetchStarted { category, page: 1 });

        match self.source.fetch_page(category, 1, self.page_size).await {
            Ok(items) => {
                let count = items.len();
                {
                    let mut state = self.state.write().unwrap();
                    state.items = items.clone();
                    state.loading = false;
                    state.page = 2;
                }
                self.db.store_cached_content(category, &items).await?;
                self.events.emit(StoreEvent::FetchCompleted {
                    category,
                    count,
                    served_from: "network".to_string(),
                });
                info!(category = %category, count, "fetched content page");
                Ok(FetchOutcome::Fetched(count))
            }
            Err(e) => {
                warn!(category = %category, error = %e, "fetch failed, trying offline cache");
                self.events.emit(StoreEvent::FetchFailed {
                    category,
                    error: e.to_string(),
                });

                let cached = match self.db.cached_content(category).await {
                    Ok(cached) => cached,
                    Err(storage_err) => {
                        let mut state = self.state.write().unwrap();
                        state.items = Vec::new();
                        state.loading = false;
                        drop(state);
                        return Err(storage_err);
                    }
                };

                match cached {
                    Some(items) => {
                        let count = items.len();
                        {
                            let mut state = self.state.write().unwrap();
                            state.items = items;
                            state.loading = false;
                        }
                        self.events.emit(StoreEvent::FetchCompleted {
                            category,
                            count,
                            served_from: "cache".to_string(),
                        });
                        info!(category = %category, count, "served cached content");
                        Ok(FetchOutcome::Cached(count))
                    }
                    None => {
                        let mut state = self.state.write().unwrap();
                        state.items = Vec::new();
                        state.loading = false;
                        drop(state);
                        Ok(FetchOutcome::Failed)
                    }
                }
            }
        }
    }

    /// Load the next page for a category and append it to the held items.
    ///
    /// Skips when a fetch is already in flight. An empty page is the
    /// exhaustion signal: items and pagination stay unchanged. Network
    /// failures are absorbed, leaving existing items intact so the caller can
    /// simply retry.
    ///
    /// # Errors
    ///
    /// Returns a storage error if committing the merged list to the offline
    /// cache fails. In-memory state has already been updated by then.
    pub async fn fetch_more(&self, category: Category) -> Result<FetchOutcome> {
        let (page, held) = {
            let mut state = self.state.write().unwrap();
            if state.loading {
                debug!(category = %category, "fetch skipped");
                return Ok(FetchOutcome::Skipped);
            }
            state.loading = true;
            (state.page, state.items.clone())
        };

        self.events.emit(StoreEvent::FetchStarted { category, page });

        match self.source.fetch_page(category, page, self.page_size).await {
            Ok(new_items) if !new_items.is_empty() => {
                let added = new_items.len();
                let mut merged = held;
                merged.extend(new_items);
                let total = merged.len();
                {
                    let mut state = self.state.write().unwrap();
                    state.items = merged.clone();
                    state.loading = false;
                    state.page = page + 1;
                }
                self.db.store_cached_content(category, &merged).await?;
                self.events.emit(StoreEvent::FetchCompleted {
                    category,
                    count: total,
                    served_from: "network".to_string(),
                });
                info!(category = %category, added, total, "fetched next content page");
                Ok(FetchOutcome::Fetched(added))
            }
            Ok(_) => {
                let count = {
                    let mut state = self.state.write().unwrap();
                    state.loading = false;
                    state.items.len()
                };
                self.events.emit(StoreEvent::FetchCompleted {
                    category,
                    count,
                    served_from: "network".to_string(),
                });
                debug!(category = %category, page, "no more content");
                Ok(FetchOutcome::Exhausted)
            }
            Err(e) => {
                warn!(category = %category, error = %e, "pagination fetch failed");
                self.events.emit(StoreEvent::FetchFailed {
                    category,
                    error: e.to_string(),
                });
                let mut state = self.state.write().unwrap();
                state.loading = false;
                drop(state);
                Ok(FetchOutcome::Failed)
            }
        }
    }

    /// Record a quiz answer and persist the updated counters.
    ///
    /// A correct answer increments `correct_count` and `completed_count`; a
    /// wrong answer increments `wrong_count` only.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the counters cannot be persisted. The
    /// in-memory counters have already been updated by then.
    pub async fn track_answer(&self, is_correct: bool) -> Result<Progress> {
        let progress = {
            let mut state = self.state.write().unwrap();
            if is_correct {
                state.progress.correct_count += 1;
                state.progress.completed_count += 1;
            } else {
                state.progress.wrong_count += 1;
            }
            state.progress.clone()
        };

        self.db.store_progress(&progress).await?;
        self.events.emit(StoreEvent::AnswerTracked {
            correct: is_correct,
            progress: progress.clone(),
        });
        debug!(
            correct = is_correct,
            completed = progress.completed_count,
            "answer tracked"
        );
        Ok(progress)
    }

    /// Items currently held for the active category
    pub fn items(&self) -> Vec<ContentItem> {
        self.state.read().unwrap().items.clone()
    }

    /// Whether a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.state.read().unwrap().loading
    }

    /// The category the held items belong to
    pub fn active_category(&self) -> Option<Category> {
        self.state.read().unwrap().active_category
    }

    /// Current scoring counters
    pub fn progress(&self) -> Progress {
        self.state.read().unwrap().progress.clone()
    }

    /// Copy of the full store state
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read().unwrap();
        StoreSnapshot {
            items: state.items.clone(),
            loading: state.loading,
            active_category: state.active_category,
            page: state.page,
            progress: state.progress.clone(),
        }
    }

    /// Subscribe to store events
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }
}
