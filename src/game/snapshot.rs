//! Read-only views handed to the presentation layer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::side::{Side, SideMap};
use crate::round::RoundSummary;
use crate::turns::TurnPhase;

/// Everything a presentation layer needs to render the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Round within the current match (starts at 1).
    pub round_number: u32,
    pub stack_size: usize,
    /// Flips per side this round.
    pub tallies: SideMap<u32>,
    pub rounds_won: SideMap<u32>,
    /// Pogs each side has won for keeps this match.
    pub collection_sizes: SideMap<usize>,
    pub active_side: Side,
    pub phase: TurnPhase,
    pub is_round_over: bool,
    pub is_match_over: bool,
    pub match_winner: Option<Side>,
    /// Result of the most recently finished round of this match.
    pub last_round: Option<RoundSummary>,
    /// Virtual clock time.
    pub now: Duration,
}

/// Final result of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub winner: Side,
    pub rounds_won: SideMap<u32>,
    pub collection_sizes: SideMap<usize>,
}
