//! Event types for the MMG event system
//!
//! Provides the shared event definitions and the EventBus used to fan
//! game notifications out to SSE clients and other listeners.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Game notifications
///
/// Events are broadcast via EventBus and serialized for SSE transmission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A catalog load completed and was published to the game
    CatalogLoaded {
        /// Load generation that produced the catalog
        generation: u64,
        /// Number of validated items
        count: usize,
        timestamp: DateTime<Utc>,
    },

    /// A catalog load finished without producing a playable catalog
    CatalogLoadFailed {
        generation: u64,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// A new (non-repeat) card was clicked
    CardAccepted {
        title: String,
        /// Score after the click
        score: usize,
        timestamp: DateTime<Utc>,
    },

    /// Every card of the working pool was clicked exactly once
    RoundWon {
        score: usize,
        high_score: usize,
        timestamp: DateTime<Utc>,
    },

    /// A card was clicked twice in the same round
    RoundLost {
        /// The repeated title
        title: String,
        /// Score reached before the repeat
        score: usize,
        high_score: usize,
        timestamp: DateTime<Utc>,
    },

    /// Difficulty settings were applied (after clamping)
    ConfigApplied {
        number_of_cards: usize,
        number_of_movies: usize,
        timestamp: DateTime<Utc>,
    },
}

impl GameEvent {
    /// SSE event name for this event
    pub fn event_type(&self) -> &'static str {
        match self {
            GameEvent::CatalogLoaded { .. } => "CatalogLoaded",
            GameEvent::CatalogLoadFailed { .. } => "CatalogLoadFailed",
            GameEvent::CardAccepted { .. } => "CardAccepted",
            GameEvent::RoundWon { .. } => "RoundWon",
            GameEvent::RoundLost { .. } => "RoundLost",
            GameEvent::ConfigApplied { .. } => "ConfigApplied",
        }
    }
}

/// Broadcast channel for [`GameEvent`]s
///
/// Cloning is cheap; all clones share one channel.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<GameEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// Slow subscribers that fall more than `capacity` events behind
    /// lose the oldest events.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(&self, event: GameEvent) -> Result<usize, broadcast::error::SendError<GameEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: GameEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
