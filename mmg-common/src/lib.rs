//! # MMG Common Library
//!
//! Shared code for the movie memory game workspace:
//! - Error and result types
//! - Bootstrap configuration loading (TOML + environment)
//! - Game event types (GameEvent enum) and the EventBus
//! - Server-Sent Events helpers

pub mod config;
pub mod error;
pub mod events;
pub mod sse;

pub use error::{Error, Result};
pub use events::{EventBus, GameEvent};
