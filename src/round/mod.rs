//! Round engine and adjudication.
//!
//! A round owns one stack of wagered pogs. Sides take turns striking it;
//! flipped pogs are tallied to the thrower and set aside. When the stack
//! is empty the round is adjudicated by comparing tallies.

mod engine;
mod outcome;

pub use engine::{RoundEngine, ThrowResult};
pub use outcome::{adjudicate, RoundOutcome, RoundSummary, StakeRule};
