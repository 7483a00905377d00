//! Store event notifications
//!
//! The store broadcasts a `StoreEvent` for every state mutation so
//! consumers (screens, CLI progress output) can react without polling.
//! Events are distributed over `tokio::sync::broadcast`: if no
//! subscribers exist, events are dropped immediately, and lagging
//! subscribers never block the store.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::{Category, Progress};

/// Event receiver type alias
pub type EventReceiver = broadcast::Receiver<StoreEvent>;

/// Event bus distributing store events to any number of subscribers
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    /// Create a new event bus with the given per-subscriber buffer capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events emitted after this call
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Non-blocking; an event with no listeners is simply dropped.
    pub fn emit(&self, event: StoreEvent) {
        // send() errors when no receivers exist, which is fine here
        let _ = self.sender.send(event);
    }

    /// Number of active subscribers (debugging aid, not for control flow)
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Events emitted by the content store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A remote fetch was issued
    FetchStarted {
        category: Category,
        /// Page number requested
        page: u32,
    },

    /// A fetch finished; `count` is the number of items now held.
    /// An exhausted category completes without changing the list.
    FetchCompleted {
        category: Category,
        count: usize,
        /// Where the items came from: "network", "cache", or "generated"
        served_from: String,
    },

    /// A remote fetch failed (the failure is absorbed by the store)
    FetchFailed { category: Category, error: String },

    /// An answer was recorded; carries the updated counters
    AnswerTracked { correct: bool, progress: Progress },
}
