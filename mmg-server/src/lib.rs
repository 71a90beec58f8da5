//! mmg-server library - movie memory game engine and HTTP surface
//!
//! The player must click the displayed movie posters without repeating a
//! click within the current round. Layout:
//! - [`catalog`]: fetches candidate movies and keeps those whose poster loads
//! - [`game`]: shuffling, pool sampling, display selection, state machine
//! - [`session`]: serializes every mutation of the game state
//! - [`api`]: HTTP endpoints and SSE notifications

pub mod api;
pub mod catalog;
pub mod error;
pub mod game;
pub mod session;

pub use api::{build_router, AppState};
pub use error::{ApiError, Error, Result};
pub use session::GameSession;
