//! Serialized game session
//!
//! Every mutation of the game (clicks, configuration changes, catalog
//! publication) takes the session lock, applies exactly one transition and
//! emits the matching [`GameEvent`] before releasing it. Catalog loads run
//! outside the lock; their result is applied only if no newer load was
//! started in the meantime.

use crate::catalog::{CatalogLoader, LoadStatus};
use crate::game::{Action, GameSnapshot, GameState, Outcome, Rejection};
use crate::{Error, Result};
use chrono::Utc;
use mmg_common::{EventBus, GameEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// What happened to a finished catalog load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResolution {
    /// Catalog published; the game is playing
    Published { count: usize },
    /// A newer load was started; this result was discarded
    Superseded,
    /// No playable catalog; the game keeps its previous phase
    Unavailable { reason: String },
}

struct SessionInner {
    state: GameState,
    rng: StdRng,
    last_load_error: Option<String>,
}

/// Shared handle to one running game
pub struct GameSession {
    inner: Mutex<SessionInner>,
    loader: CatalogLoader,
    events: EventBus,
}

impl GameSession {
    /// New session in the loading phase with entropy-seeded randomness
    pub fn new(
        loader: CatalogLoader,
        number_of_cards: usize,
        number_of_movies: usize,
        events: EventBus,
    ) -> Self {
        Self::with_rng(
            loader,
            number_of_cards,
            number_of_movies,
            events,
            StdRng::from_entropy(),
        )
    }

    /// New session drawing from the given RNG
    pub fn with_rng(
        loader: CatalogLoader,
        number_of_cards: usize,
        number_of_movies: usize,
        events: EventBus,
        rng: StdRng,
    ) -> Self {
        Self {
            inner: Mutex::new(SessionInner {
                state: GameState::new(number_of_cards, number_of_movies),
                rng,
                last_load_error: None,
            }),
            loader,
            events,
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn loader(&self) -> &CatalogLoader {
        &self.loader
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        let inner = self.inner.lock().await;
        Self::snapshot_of(&inner)
    }

    fn snapshot_of(inner: &SessionInner) -> GameSnapshot {
        inner.state.snapshot(inner.last_load_error.clone())
    }

    /// Click a card by title
    ///
    /// # Errors
    /// - [`Error::InvalidState`] before a catalog is published
    /// - [`Error::UnknownCard`] when the title is not on screen
    pub async fn click(&self, title: &str) -> Result<(Outcome, GameSnapshot)> {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        let outcome = inner
            .state
            .apply(Action::CardClicked(title.to_string()), &mut inner.rng);

        let timestamp = Utc::now();
        match &outcome {
            Outcome::Accepted { score } => self.events.emit_lossy(GameEvent::CardAccepted {
                title: title.to_string(),
                score: *score,
                timestamp,
            }),
            Outcome::Won { score, high_score } => self.events.emit_lossy(GameEvent::RoundWon {
                score: *score,
                high_score: *high_score,
                timestamp,
            }),
            Outcome::Lost {
                title,
                score,
                high_score,
            } => self.events.emit_lossy(GameEvent::RoundLost {
                title: title.clone(),
                score: *score,
                high_score: *high_score,
                timestamp,
            }),
            Outcome::Rejected(Rejection::NotPlaying) => {
                return Err(Error::InvalidState("catalog is still loading".to_string()))
            }
            Outcome::Rejected(Rejection::NotDisplayed(title)) => {
                return Err(Error::UnknownCard(title.clone()))
            }
            other => warn!(?other, "Unexpected click outcome"),
        }

        Ok((outcome, Self::snapshot_of(inner)))
    }

    /// Change difficulty; values are clamped, never rejected
    ///
    /// `None` keeps the current value of that setting.
    pub async fn configure(
        &self,
        number_of_cards: Option<usize>,
        number_of_movies: Option<usize>,
    ) -> GameSnapshot {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        let number_of_cards = number_of_cards.unwrap_or(inner.state.number_of_cards());
        let number_of_movies = number_of_movies.unwrap_or(inner.state.number_of_movies());
        let outcome = inner.state.apply(
            Action::ConfigChanged {
                number_of_cards,
                number_of_movies,
            },
            &mut inner.rng,
        );

        if let Outcome::Reconfigured {
            number_of_cards,
            number_of_movies,
        } = outcome
        {
            self.events.emit_lossy(GameEvent::ConfigApplied {
                number_of_cards,
                number_of_movies,
                timestamp: Utc::now(),
            });
        }

        Self::snapshot_of(inner)
    }

    /// Run one catalog load and publish it if it is still the newest
    pub async fn load_catalog(&self) -> LoadResolution {
        let report = self.loader.load().await;

        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;

        if !self.loader.is_current(report.generation) {
            debug!(
                generation = report.generation,
                current = self.loader.current_generation(),
                "Discarding superseded catalog load"
            );
            return LoadResolution::Superseded;
        }

        let reason = match report.status {
            LoadStatus::Ready => {
                match inner
                    .state
                    .apply(Action::CatalogLoaded(report.catalog), &mut inner.rng)
                {
                    Outcome::Loaded { count } => {
                        inner.last_load_error = None;
                        self.events.emit_lossy(GameEvent::CatalogLoaded {
                            generation: report.generation,
                            count,
                            timestamp: Utc::now(),
                        });
                        return LoadResolution::Published { count };
                    }
                    other => format!("catalog not accepted: {:?}", other),
                }
            }
            LoadStatus::BelowMinimum { found, required } => format!(
                "only {} playable movies found, {} required",
                found, required
            ),
            LoadStatus::Failed(reason) => reason,
        };

        info!(generation = report.generation, %reason, "Catalog not published");
        inner.last_load_error = Some(reason.clone());
        self.events.emit_lossy(GameEvent::CatalogLoadFailed {
            generation: report.generation,
            reason: reason.clone(),
            timestamp: Utc::now(),
        });
        LoadResolution::Unavailable { reason }
    }

    /// Start a catalog load in the background
    pub fn reload(self: &Arc<Self>) -> JoinHandle<LoadResolution> {
        let session = Arc::clone(self);
        tokio::spawn(async move { session.load_catalog().await })
    }
}
