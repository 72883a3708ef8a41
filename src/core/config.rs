//! Match configuration.
//!
//! Every rule constant lives here rather than in the engine:
//! - `SideProfile`: who controls a side and how likely its throws flip a pog
//! - `MatchConfig`: stack size, round threshold, computer delay, striker,
//!   stake rule
//!
//! Configs are plain data; `validate()` is called when a match starts.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::side::{Controller, Side, SideMap};
use crate::pieces::Striker;
use crate::round::StakeRule;

/// Default pogs each side puts into the stack.
pub const DEFAULT_COUNT_PER_SIDE: u32 = 5;

/// Default round wins needed to take the match (best of 5).
pub const DEFAULT_ROUNDS_TO_WIN: u32 = 3;

/// Default per-pog flip probability for a human throw.
pub const DEFAULT_HUMAN_PROBABILITY: f64 = 0.5;

/// Default per-pog flip probability for a computer throw.
pub const DEFAULT_COMPUTER_PROBABILITY: f64 = 0.45;

/// Default computer "thinking time".
pub const DEFAULT_COMPUTER_DELAY: Duration = Duration::from_millis(1500);

/// How one side plays.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SideProfile {
    /// Human sides wait for `throw()`, computer sides throw on a timer.
    pub controller: Controller,

    /// Chance each pog in the stack flips on this side's throw.
    pub flip_probability: f64,
}

impl SideProfile {
    /// A side driven by `throw()` commands.
    #[must_use]
    pub const fn human(flip_probability: f64) -> Self {
        Self { controller: Controller::Human, flip_probability }
    }

    /// A side that throws automatically after the computer delay.
    #[must_use]
    pub const fn computer(flip_probability: f64) -> Self {
        Self { controller: Controller::Computer, flip_probability }
    }

    /// Check if this side throws automatically.
    #[must_use]
    pub fn is_computer(&self) -> bool {
        self.controller == Controller::Computer
    }
}

/// Complete match configuration.
///
/// ```
/// use rust_pogs::core::{MatchConfig, Side, SideProfile};
///
/// let config = MatchConfig::default()
///     .with_rounds_to_win(2)
///     .with_side(Side::B, SideProfile::computer(0.3));
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.sides[Side::B].flip_probability, 0.3);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Pogs each side wagers per round; the stack holds twice this.
    pub initial_count_per_side: u32,

    /// Round wins needed to end the match.
    pub rounds_to_win: u32,

    /// Controller and flip probability per side.
    pub sides: SideMap<SideProfile>,

    /// Delay before a computer side throws.
    pub computer_delay: Duration,

    /// Striker used for each new round.
    pub striker: Striker,

    /// Which pogs the round winner keeps.
    pub stake_rule: StakeRule,

    /// Begin the next round as soon as a round is adjudicated instead of
    /// waiting for `advance()`.
    pub auto_advance: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            initial_count_per_side: DEFAULT_COUNT_PER_SIDE,
            rounds_to_win: DEFAULT_ROUNDS_TO_WIN,
            sides: SideMap::new(
                SideProfile::human(DEFAULT_HUMAN_PROBABILITY),
                SideProfile::computer(DEFAULT_COMPUTER_PROBABILITY),
            ),
            computer_delay: DEFAULT_COMPUTER_DELAY,
            striker: Striker::default(),
            stake_rule: StakeRule::default(),
            auto_advance: false,
        }
    }
}

impl MatchConfig {
    /// Set the number of pogs each side wagers.
    #[must_use]
    pub fn with_count_per_side(mut self, count: u32) -> Self {
        self.initial_count_per_side = count;
        self
    }

    /// Set the round-win threshold.
    #[must_use]
    pub fn with_rounds_to_win(mut self, rounds: u32) -> Self {
        self.rounds_to_win = rounds;
        self
    }

    /// Replace one side's profile.
    #[must_use]
    pub fn with_side(mut self, side: Side, profile: SideProfile) -> Self {
        self.sides[side] = profile;
        self
    }

    /// Set the computer delay.
    #[must_use]
    pub fn with_computer_delay(mut self, delay: Duration) -> Self {
        self.computer_delay = delay;
        self
    }

    /// Set the striker.
    #[must_use]
    pub fn with_striker(mut self, striker: Striker) -> Self {
        self.striker = striker;
        self
    }

    /// Set the stake rule.
    #[must_use]
    pub fn with_stake_rule(mut self, rule: StakeRule) -> Self {
        self.stake_rule = rule;
        self
    }

    /// Start the next round immediately after adjudication.
    #[must_use]
    pub fn with_auto_advance(mut self, auto_advance: bool) -> Self {
        self.auto_advance = auto_advance;
        self
    }

    /// Stack size at the start of every round.
    #[must_use]
    pub fn stack_size(&self) -> u32 {
        self.initial_count_per_side.saturating_mul(2)
    }

    /// Check every value the rules depend on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_count_per_side == 0 {
            return Err(ConfigError::ZeroTokenCount);
        }
        if self.rounds_to_win == 0 {
            return Err(ConfigError::ZeroRoundsToWin);
        }
        for (side, profile) in self.sides.iter() {
            let p = profile.flip_probability;
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::InvalidProbability { side, value: p });
            }
        }
        self.striker.validate()
    }
}
