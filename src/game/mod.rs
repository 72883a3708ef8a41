//! Match control: the command/query surface presented to a host.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use rust_pogs::core::{MatchConfig, Side};
//! use rust_pogs::game::MatchController;
//! use rust_pogs::turns::TurnPhase;
//!
//! let mut game = MatchController::new(MatchConfig::default(), 7).unwrap();
//!
//! // Side A is human: throw on command
//! let result = game.throw();
//! assert_eq!(result.side, Some(Side::A));
//!
//! // Side B is a computer: its throw fires once the delay has elapsed
//! if game.phase() == TurnPhase::AwaitingComputerThrow {
//!     assert_eq!(game.advance_time(Duration::from_millis(1500)), 1);
//! }
//! ```

mod controller;
mod observer;
mod snapshot;

pub use controller::{MatchController, MAX_DEFERRED_STEPS};
pub use observer::StateObserver;
pub use snapshot::{MatchSummary, Snapshot};
