//! Game engine
//!
//! Randomness is always passed in, so every operation here is
//! reproducible with a seeded RNG.

pub mod sampler;
pub mod selector;
pub mod shuffle;
pub mod state;

pub use sampler::sample;
pub use selector::{initial_display, next_display};
pub use shuffle::shuffle;
pub use state::{
    parse_count, Action, GameSnapshot, GameState, Outcome, Phase, Rejection, MIN_CARDS,
};
