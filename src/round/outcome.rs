//! Round adjudication.
//!
//! More flips this round wins; the winner keeps the pogs at stake. Equal
//! tallies award nothing and the wagered pogs leave play.

use serde::{Deserialize, Serialize};

use crate::core::side::{Side, SideMap};
use crate::pieces::Token;

/// Which pogs a round winner keeps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StakeRule {
    /// Only the pogs that were in the stack when the emptying throw began.
    #[default]
    FinalThrow,
    /// Every pog wagered this round.
    EntireWager,
}

/// Adjudicated result of a finished round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub round_number: u32,

    /// `None` on a tie.
    pub winner: Option<Side>,

    /// Final flip tallies. Reported only; the next round starts at zero.
    pub tallies: SideMap<u32>,

    /// Pogs at stake, copied into the winner's collection.
    pub wagered: Vec<Token>,
}

impl RoundOutcome {
    #[must_use]
    pub fn is_tie(&self) -> bool {
        self.winner.is_none()
    }

    /// Condensed form for snapshots.
    #[must_use]
    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            round_number: self.round_number,
            winner: self.winner,
            tallies: self.tallies.clone(),
            awarded: if self.winner.is_some() { self.wagered.len() } else { 0 },
        }
    }
}

/// What a presentation layer needs to announce a finished round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_number: u32,
    pub winner: Option<Side>,
    pub tallies: SideMap<u32>,
    /// Pogs moved into the winner's collection (0 on a tie).
    pub awarded: usize,
}

/// Decide a round from its tallies.
///
/// ```
/// use rust_pogs::core::{Side, SideMap};
/// use rust_pogs::round::adjudicate;
///
/// let outcome = adjudicate(1, SideMap::new(6, 4), Vec::new());
/// assert_eq!(outcome.winner, Some(Side::A));
///
/// let tie = adjudicate(2, SideMap::new(5, 5), Vec::new());
/// assert!(tie.is_tie());
/// ```
#[must_use]
pub fn adjudicate(round_number: u32, tallies: SideMap<u32>, wagered: Vec<Token>) -> RoundOutcome {
    let (a, b) = (tallies[Side::A], tallies[Side::B]);
    let winner = match a.cmp(&b) {
        std::cmp::Ordering::Greater => Some(Side::A),
        std::cmp::Ordering::Less => Some(Side::B),
        std::cmp::Ordering::Equal => None,
    };

    RoundOutcome { round_number, winner, tallies, wagered }
}
