//! Game state machine
//!
//! [`GameState`] is a plain value and [`GameState::apply`] is its only
//! mutator: one [`Action`] in, exactly one transition, one [`Outcome`] out.
//!
//! Phases: `Loading -> Playing`. A win or a loss resets the round and
//! stays in `Playing`; both are reported through the [`Outcome`].

use super::{initial_display, next_display, sample};
use crate::catalog::{CatalogItem, ValidatedCatalog};
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

/// Fewest cards that may be shown at once
pub const MIN_CARDS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No catalog published yet; clicks are rejected
    Loading,
    Playing,
}

/// Input to the state machine
#[derive(Debug, Clone)]
pub enum Action {
    CatalogLoaded(ValidatedCatalog),
    CardClicked(String),
    ConfigChanged {
        number_of_cards: usize,
        number_of_movies: usize,
    },
}

/// Why an action left the state untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Click received before a catalog was published
    NotPlaying,
    /// Clicked title is not on screen
    NotDisplayed(String),
    /// Published catalog cannot fill a two-card screen
    CatalogTooSmall(usize),
}

/// Result of one transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Catalog published, pool and display drawn
    Loaded { count: usize },
    /// New card clicked, round continues
    Accepted { score: usize },
    /// Every pool card clicked once; round reset
    Won { score: usize, high_score: usize },
    /// Repeat click; round reset
    Lost {
        title: String,
        score: usize,
        high_score: usize,
    },
    /// Difficulty applied after clamping; round reset
    Reconfigured {
        number_of_cards: usize,
        number_of_movies: usize,
    },
    Rejected(Rejection),
}

/// Read-only view of the game for presentation
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub current_score: usize,
    pub high_score: usize,
    pub number_of_cards: usize,
    pub number_of_movies: usize,
    /// Catalog size; upper bound for `number_of_movies`
    pub number_of_movies_max: usize,
    /// Cards on screen, in display order
    pub display: Vec<CatalogItem>,
    /// Reason the last catalog load was not published, if any
    pub last_load_error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GameState {
    phase: Phase,
    catalog: ValidatedCatalog,
    working_pool: Vec<CatalogItem>,
    display: Vec<CatalogItem>,
    clicked: HashSet<String>,
    current_score: usize,
    high_score: usize,
    number_of_cards: usize,
    number_of_movies: usize,
}

impl GameState {
    /// New game waiting for a catalog
    ///
    /// The requested difficulty is clamped by its lower bounds now and by
    /// the catalog size once one is loaded.
    pub fn new(number_of_cards: usize, number_of_movies: usize) -> Self {
        let (number_of_cards, number_of_movies) =
            clamp_config(number_of_cards, number_of_movies, None);
        Self {
            phase: Phase::Loading,
            catalog: ValidatedCatalog::default(),
            working_pool: Vec::new(),
            display: Vec::new(),
            clicked: HashSet::new(),
            current_score: 0,
            high_score: 0,
            number_of_cards,
            number_of_movies,
        }
    }

    /// Apply one action
    pub fn apply<R: Rng + ?Sized>(&mut self, action: Action, rng: &mut R) -> Outcome {
        match action {
            Action::CatalogLoaded(catalog) => self.on_catalog_loaded(catalog, rng),
            Action::CardClicked(title) => self.on_card_clicked(title, rng),
            Action::ConfigChanged {
                number_of_cards,
                number_of_movies,
            } => self.on_config_changed(number_of_cards, number_of_movies, rng),
        }
    }

    fn on_catalog_loaded<R: Rng + ?Sized>(
        &mut self,
        catalog: ValidatedCatalog,
        rng: &mut R,
    ) -> Outcome {
        if catalog.len() < MIN_CARDS {
            return Outcome::Rejected(Rejection::CatalogTooSmall(catalog.len()));
        }

        let count = catalog.len();
        self.catalog = catalog;
        self.phase = Phase::Playing;
        let (cards, movies) = clamp_config(
            self.number_of_cards,
            self.number_of_movies,
            Some(self.catalog.len()),
        );
        self.number_of_cards = cards;
        self.number_of_movies = movies;
        self.resample(rng);

        info!(
            count,
            number_of_cards = self.number_of_cards,
            number_of_movies = self.number_of_movies,
            "Catalog published"
        );
        Outcome::Loaded { count }
    }

    fn on_card_clicked<R: Rng + ?Sized>(&mut self, title: String, rng: &mut R) -> Outcome {
        if self.phase != Phase::Playing {
            return Outcome::Rejected(Rejection::NotPlaying);
        }
        if !self.display.iter().any(|item| item.title() == title) {
            return Outcome::Rejected(Rejection::NotDisplayed(title));
        }

        if self.clicked.contains(&title) {
            let score = self.current_score;
            self.end_round(rng);
            info!(%title, score, high_score = self.high_score, "Round lost");
            return Outcome::Lost {
                title,
                score,
                high_score: self.high_score,
            };
        }

        self.clicked.insert(title);
        self.current_score += 1;

        if self.number_of_movies > 0 && self.current_score == self.number_of_movies {
            let score = self.current_score;
            self.end_round(rng);
            info!(score, high_score = self.high_score, "Round won");
            return Outcome::Won {
                score,
                high_score: self.high_score,
            };
        }

        self.display = next_display(&self.working_pool, &self.clicked, self.number_of_cards, rng);
        debug!(score = self.current_score, "Card accepted");
        Outcome::Accepted {
            score: self.current_score,
        }
    }

    fn on_config_changed<R: Rng + ?Sized>(
        &mut self,
        number_of_cards: usize,
        number_of_movies: usize,
        rng: &mut R,
    ) -> Outcome {
        let catalog_len = (self.phase == Phase::Playing).then(|| self.catalog.len());
        let (cards, movies) = clamp_config(number_of_cards, number_of_movies, catalog_len);
        self.number_of_cards = cards;
        self.number_of_movies = movies;

        if self.phase == Phase::Playing {
            self.resample(rng);
        }

        debug!(
            requested_cards = number_of_cards,
            requested_movies = number_of_movies,
            cards,
            movies,
            "Configuration applied"
        );
        Outcome::Reconfigured {
            number_of_cards: cards,
            number_of_movies: movies,
        }
    }

    /// Win/loss reset: record the high score, clear the round, redraw the
    /// screen from the same pool
    fn end_round<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.high_score = self.high_score.max(self.current_score);
        self.current_score = 0;
        self.clicked.clear();
        self.display = initial_display(&self.working_pool, self.number_of_cards, rng);
    }

    /// New pool and screen; the round restarts without touching the high score
    fn resample<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.working_pool = sample(&self.catalog, self.number_of_movies, rng);
        self.current_score = 0;
        self.clicked.clear();
        self.display = initial_display(&self.working_pool, self.number_of_cards, rng);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_score(&self) -> usize {
        self.current_score
    }

    pub fn high_score(&self) -> usize {
        self.high_score
    }

    pub fn number_of_cards(&self) -> usize {
        self.number_of_cards
    }

    pub fn number_of_movies(&self) -> usize {
        self.number_of_movies
    }

    pub fn working_pool(&self) -> &[CatalogItem] {
        &self.working_pool
    }

    pub fn display(&self) -> &[CatalogItem] {
        &self.display
    }

    pub fn clicked(&self) -> &HashSet<String> {
        &self.clicked
    }

    /// Client view; the load error is tracked by whoever runs the loads
    pub fn snapshot(&self, last_load_error: Option<String>) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            current_score: self.current_score,
            high_score: self.high_score,
            number_of_cards: self.number_of_cards,
            number_of_movies: self.number_of_movies,
            number_of_movies_max: self.catalog.len(),
            display: self.display.clone(),
            last_load_error,
        }
    }
}

/// Clamp difficulty to `2 <= cards <= movies <= catalog_len`
///
/// Without a catalog only the lower bounds apply.
fn clamp_config(
    number_of_cards: usize,
    number_of_movies: usize,
    catalog_len: Option<usize>,
) -> (usize, usize) {
    let mut cards = number_of_cards.max(MIN_CARDS);
    if let Some(len) = catalog_len {
        cards = cards.min(len);
    }
    let mut movies = number_of_movies.max(cards);
    if let Some(len) = catalog_len {
        movies = movies.min(len);
    }
    (cards, movies)
}

/// Read a count typed by the player
///
/// Empty or non-numeric input counts as 0 (the clamp lifts it to the
/// minimum); fractional input is truncated; negative input is 0.
pub fn parse_count(raw: &str) -> usize {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<usize>() {
        return n;
    }
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => n as usize,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog(n: usize) -> ValidatedCatalog {
        ValidatedCatalog::from_items(
            (0..n).map(|i| CatalogItem::new(format!("Movie {i}"), format!("http://img/{i}.jpg")).unwrap()),
        )
    }

    fn playing(cards: usize, movies: usize, catalog_len: usize, rng: &mut StdRng) -> GameState {
        let mut state = GameState::new(cards, movies);
        let outcome = state.apply(Action::CatalogLoaded(catalog(catalog_len)), rng);
        assert_eq!(outcome, Outcome::Loaded { count: catalog_len });
        state
    }

    #[test]
    fn clamp_rules() {
        assert_eq!(clamp_config(0, 0, None), (2, 2));
        assert_eq!(clamp_config(5, 3, None), (5, 5));
        assert_eq!(clamp_config(5, 30, Some(10)), (5, 10));
        assert_eq!(clamp_config(12, 3, Some(10)), (10, 10));
        assert_eq!(clamp_config(1, 1, Some(10)), (2, 2));
    }

    #[test]
    fn parse_count_rules() {
        assert_eq!(parse_count("7"), 7);
        assert_eq!(parse_count(" 12 "), 12);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count("-3"), 0);
        assert_eq!(parse_count("4.9"), 4);
        assert_eq!(parse_count("NaN"), 0);
    }

    #[test]
    fn clicks_are_rejected_while_loading() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = GameState::new(4, 10);

        let outcome = state.apply(Action::CardClicked("Movie 0".into()), &mut rng);

        assert_eq!(outcome, Outcome::Rejected(Rejection::NotPlaying));
        assert_eq!(state.phase(), Phase::Loading);
        assert!(state.display().is_empty());
    }

    #[test]
    fn too_small_catalog_keeps_loading() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = GameState::new(2, 2);

        let outcome = state.apply(Action::CatalogLoaded(catalog(1)), &mut rng);

        assert_eq!(outcome, Outcome::Rejected(Rejection::CatalogTooSmall(1)));
        assert_eq!(state.phase(), Phase::Loading);
    }

    #[test]
    fn loading_clamps_to_catalog_size() {
        let mut rng = StdRng::seed_from_u64(2);
        let state = playing(4, 10, 6, &mut rng);

        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.number_of_cards(), 4);
        assert_eq!(state.number_of_movies(), 6);
        assert_eq!(state.working_pool().len(), 6);
        assert_eq!(state.display().len(), 4);
    }

    #[test]
    fn off_screen_click_is_rejected_without_state_change() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = playing(2, 10, 10, &mut rng);
        let hidden = state
            .working_pool()
            .iter()
            .find(|item| !state.display().contains(item))
            .unwrap()
            .title()
            .to_string();
        let before = state.display().to_vec();

        let outcome = state.apply(Action::CardClicked(hidden.clone()), &mut rng);

        assert_eq!(outcome, Outcome::Rejected(Rejection::NotDisplayed(hidden)));
        assert_eq!(state.display(), before.as_slice());
        assert_eq!(state.current_score(), 0);
    }

    #[test]
    fn config_change_while_loading_is_stored() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut state = GameState::new(4, 10);

        let outcome = state.apply(
            Action::ConfigChanged {
                number_of_cards: 3,
                number_of_movies: 0,
            },
            &mut rng,
        );

        assert_eq!(
            outcome,
            Outcome::Reconfigured {
                number_of_cards: 3,
                number_of_movies: 3
            }
        );
        assert_eq!(state.phase(), Phase::Loading);
    }

    #[test]
    fn config_change_resets_round_but_keeps_high_score() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = playing(2, 3, 6, &mut rng);

        // Win once to set a high score
        while state.high_score() == 0 {
            let fresh = state
                .display()
                .iter()
                .find(|item| !state.clicked().contains(item.title()))
                .unwrap()
                .title()
                .to_string();
            state.apply(Action::CardClicked(fresh), &mut rng);
        }
        assert_eq!(state.high_score(), 3);

        let first = state.display()[0].title().to_string();
        state.apply(Action::CardClicked(first), &mut rng);
        assert_eq!(state.current_score(), 1);

        state.apply(
            Action::ConfigChanged {
                number_of_cards: 3,
                number_of_movies: 5,
            },
            &mut rng,
        );

        assert_eq!(state.current_score(), 0);
        assert!(state.clicked().is_empty());
        assert_eq!(state.high_score(), 3);
        assert_eq!(state.working_pool().len(), 5);
        assert_eq!(state.display().len(), 3);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut rng = StdRng::seed_from_u64(6);
        let state = playing(3, 6, 8, &mut rng);

        let snapshot = state.snapshot(Some("timed out".to_string()));

        assert_eq!(snapshot.phase, Phase::Playing);
        assert_eq!(snapshot.number_of_movies_max, 8);
        assert_eq!(snapshot.display.len(), 3);
        assert_eq!(snapshot.last_load_error.as_deref(), Some("timed out"));
    }
}
