//! # rust-pogs
//!
//! Rules engine for a two-sided game of pogs played "for keeps".
//!
//! A shared stack of wagered pogs is struck in turns. Pogs that flip are
//! tallied to the thrower and removed; when the stack is empty the side
//! with more flips takes the wager. First side to a configured number of
//! round wins takes the match.
//!
//! ## Design Principles
//!
//! 1. **State machine, not UI glue**: hosts send commands (`throw`,
//!    `advance`) and render `Snapshot`s. Nothing here draws anything.
//!
//! 2. **Deterministic**: all randomness flows from one seeded `GameRng`,
//!    forked per round.
//!
//! 3. **Virtual time**: computer throws are queued on a clock the host
//!    advances, tagged with a round generation so stale throws drop out.
//!
//! ## Modules
//!
//! - `core`: Sides, ids, RNG, configuration, errors
//! - `pieces`: Pogs and strikers
//! - `flip`: Per-pog flip resolution
//! - `round`: Round engine and adjudication
//! - `turns`: Turn alternation and deferred computer throws
//! - `game`: Match controller, snapshots, observers

pub mod core;
pub mod pieces;
pub mod flip;
pub mod round;
pub mod turns;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, Controller, GameRng, MatchConfig, RoundGeneration, Side, SideMap, SideProfile,
    TokenId,
};

pub use crate::pieces::{Material, Striker, Token};

pub use crate::flip::{FlipResolver, FlipSource};

pub use crate::round::{adjudicate, RoundEngine, RoundOutcome, RoundSummary, StakeRule, ThrowResult};

pub use crate::turns::{PendingThrow, TurnPhase, TurnScheduler};

pub use crate::game::{MatchController, MatchSummary, Snapshot, StateObserver};
