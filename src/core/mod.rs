//! Core types: sides, identifiers, RNG, configuration and errors.

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod side;

pub use config::{
    MatchConfig, SideProfile, DEFAULT_COMPUTER_DELAY, DEFAULT_COMPUTER_PROBABILITY,
    DEFAULT_COUNT_PER_SIDE, DEFAULT_HUMAN_PROBABILITY, DEFAULT_ROUNDS_TO_WIN,
};
pub use error::ConfigError;
pub use ids::{RoundGeneration, TokenId, TokenIdAllocator};
pub use rng::GameRng;
pub use side::{Controller, Side, SideMap};
