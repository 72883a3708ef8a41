//! Turn alternation and deferred computer throws.

mod scheduler;

pub use scheduler::{PendingThrow, TurnPhase, TurnScheduler};
