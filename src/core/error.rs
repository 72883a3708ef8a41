//! Configuration errors.
//!
//! Commands arriving in the wrong state are never errors - they are
//! silent no-ops. Only misconfiguration is surfaced, and only when a
//! match is started.

use thiserror::Error;

use super::Side;

/// A match or striker was configured with values the rules cannot play.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial_count_per_side must be > 0")]
    ZeroTokenCount,

    #[error("rounds_to_win must be > 0")]
    ZeroRoundsToWin,

    #[error("flip probability for {side} must be within [0, 1] (got {value})")]
    InvalidProbability { side: Side, value: f64 },

    #[error("striker weight must be a positive finite number (got {value})")]
    InvalidStrikerWeight { value: f64 },
}
