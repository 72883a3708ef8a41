//! Match controller: the command surface of the engine.
//!
//! Owns the match state (round wins, collections), the current round and
//! the turn scheduler. Hosts drive it with three kinds of input:
//!
//! - Commands: `throw()`, `advance()`, `start_match()`, `restart()`
//! - Time: `advance_time()` / `run_until_idle()` fire queued computer throws
//! - Queries: `snapshot()` and the accessors below
//!
//! Commands that do not apply in the current state are silent no-ops.

use std::time::Duration;

use im::Vector;
use tracing::{debug, info, trace, warn};

use crate::core::config::MatchConfig;
use crate::core::error::ConfigError;
use crate::core::ids::{RoundGeneration, TokenIdAllocator};
use crate::core::rng::GameRng;
use crate::core::side::{Controller, Side, SideMap};
use crate::pieces::{Striker, Token};
use crate::round::{RoundEngine, RoundOutcome, RoundSummary, ThrowResult};
use crate::turns::{PendingThrow, TurnPhase, TurnScheduler};

use super::observer::StateObserver;
use super::snapshot::{MatchSummary, Snapshot};

/// Upper bound on deferred throws fired by one `run_until_idle` call.
pub const MAX_DEFERRED_STEPS: usize = 10_000;

/// Runs best-of-N matches of pog flipping.
pub struct MatchController {
    config: MatchConfig,
    striker: Striker,

    rng: GameRng,
    round_rng: GameRng,
    ids: TokenIdAllocator,
    generation: RoundGeneration,

    round: RoundEngine,
    scheduler: TurnScheduler,

    rounds_won: SideMap<u32>,
    collections: SideMap<Vector<Token>>,
    is_match_over: bool,
    match_winner: Option<Side>,
    last_round: Option<RoundSummary>,

    observers: Vec<Box<dyn StateObserver>>,
}

fn controllers(config: &MatchConfig) -> SideMap<Controller> {
    config.sides.map(|profile| profile.controller)
}

impl MatchController {
    /// Validate `config` and start the first match.
    pub fn new(config: MatchConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = GameRng::new(seed);
        let round_rng = rng.fork();
        let mut ids = TokenIdAllocator::new();
        // Placeholder with no pogs; replaced by the first real round below.
        let round = RoundEngine::begin(0, config.striker.clone(), &mut ids, 0);
        let scheduler = TurnScheduler::new(controllers(&config), config.computer_delay);

        let mut controller = Self {
            striker: config.striker.clone(),
            config,
            rng,
            round_rng,
            ids,
            generation: RoundGeneration::default(),
            round,
            scheduler,
            rounds_won: SideMap::default(),
            collections: SideMap::default(),
            is_match_over: false,
            match_winner: None,
            last_round: None,
            observers: Vec::new(),
        };
        controller.reset_match();
        Ok(controller)
    }

    /// Register an observer for state changes.
    pub fn subscribe(&mut self, observer: impl StateObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // === Commands ===

    /// Begin a new match with the current config.
    ///
    /// Clears both collections and round-win counters. Any queued
    /// computer throw from the previous match becomes stale.
    pub fn start_match(&mut self) {
        self.reset_match();
        self.notify();
    }

    /// Replace the config and begin a new match.
    ///
    /// The config is validated first; on error the current match is left
    /// untouched.
    pub fn restart(&mut self, config: MatchConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.scheduler.reconfigure(controllers(&config), config.computer_delay);
        self.striker = config.striker.clone();
        self.config = config;
        self.start_match();
        Ok(())
    }

    /// Throw for the active side if it is human-controlled.
    ///
    /// No-op (zero result) if it is a computer's turn or the round or
    /// match is over.
    pub fn throw(&mut self) -> ThrowResult {
        let side = self.round.active_side();
        let result = if self.is_match_over || self.round.is_over() {
            trace!(side = %side, "throw rejected: round over");
            ThrowResult::none()
        } else if self.scheduler.phase() != TurnPhase::AwaitingHumanThrow {
            trace!(side = %side, phase = ?self.scheduler.phase(), "throw rejected: not a human turn");
            ThrowResult::none()
        } else {
            self.perform_throw(side)
        };
        self.notify();
        result
    }

    /// Move past a finished round or match.
    ///
    /// Round over → next round. Match over → new match. Returns `false`
    /// (and changes nothing) while a round is still being played.
    pub fn advance(&mut self) -> bool {
        let advanced = if self.is_match_over {
            self.reset_match();
            true
        } else if self.round.is_over() {
            self.begin_round();
            true
        } else {
            trace!(round = self.round.round_number(), "advance rejected: round in progress");
            false
        };
        self.notify();
        advanced
    }

    /// Use a different striker from the next round on.
    pub fn set_striker(&mut self, striker: Striker) -> Result<(), ConfigError> {
        striker.validate()?;
        self.striker = striker;
        Ok(())
    }

    /// Apply a round result to the match.
    ///
    /// The winner keeps the wagered pogs and gains a round win; a tie
    /// changes nothing. Returns the match summary if this result ended the
    /// match. Ignored once the match is over. Observers are notified either
    /// way, like every other command.
    pub fn on_round_adjudicated(&mut self, outcome: RoundOutcome) -> Option<MatchSummary> {
        let summary = self.apply_outcome(outcome);
        self.notify();
        summary
    }

    // === Time ===

    /// Advance the virtual clock, firing every queued computer throw due
    /// within the window. Returns how many throws actually fired.
    pub fn advance_time(&mut self, elapsed: Duration) -> usize {
        let until = self.scheduler.now().saturating_add(elapsed);
        let mut fired = 0;
        while let Some(pending) = self.scheduler.pop_due(until) {
            if self.fire_deferred(pending) {
                fired += 1;
            }
        }
        self.scheduler.set_now(until);
        fired
    }

    /// Fire queued computer throws back to back, jumping the clock to each
    /// deadline, until nothing is queued. Stops after
    /// [`MAX_DEFERRED_STEPS`] throws.
    pub fn run_until_idle(&mut self) -> usize {
        let mut fired = 0;
        for _ in 0..MAX_DEFERRED_STEPS {
            let Some(deadline) = self.scheduler.next_deadline() else {
                return fired;
            };
            if let Some(pending) = self.scheduler.pop_due(deadline) {
                if self.fire_deferred(pending) {
                    fired += 1;
                }
            }
        }
        warn!(fired, "deferred throw limit reached; queue not drained");
        fired
    }

    // === Queries ===

    /// Read-only view of the table.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            round_number: self.round.round_number(),
            stack_size: self.round.stack_size(),
            tallies: self.round.tallies().clone(),
            rounds_won: self.rounds_won.clone(),
            collection_sizes: self.collections.map(|c| c.len()),
            active_side: self.round.active_side(),
            phase: self.scheduler.phase(),
            is_round_over: self.round.is_over(),
            is_match_over: self.is_match_over,
            match_winner: self.match_winner,
            last_round: self.last_round.clone(),
            now: self.scheduler.now(),
        }
    }

    /// Winner and final counts, once the match is over.
    #[must_use]
    pub fn match_summary(&self) -> Option<MatchSummary> {
        Some(MatchSummary {
            winner: self.match_winner?,
            rounds_won: self.rounds_won.clone(),
            collection_sizes: self.collections.map(|c| c.len()),
        })
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn round(&self) -> &RoundEngine {
        &self.round
    }

    /// Pogs a side has won for keeps this match.
    #[must_use]
    pub fn collection(&self, side: Side) -> &Vector<Token> {
        &self.collections[side]
    }

    #[must_use]
    pub fn rounds_won(&self, side: Side) -> u32 {
        self.rounds_won[side]
    }

    #[must_use]
    pub fn is_match_over(&self) -> bool {
        self.is_match_over
    }

    #[must_use]
    pub fn match_winner(&self) -> Option<Side> {
        self.match_winner
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.scheduler.phase()
    }

    #[must_use]
    pub fn generation(&self) -> RoundGeneration {
        self.generation
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Queued computer throws, stale ones included.
    #[must_use]
    pub fn pending_throws(&self) -> &[PendingThrow] {
        self.scheduler.pending()
    }

    #[must_use]
    pub fn striker(&self) -> &Striker {
        &self.striker
    }

    // === Internals ===

    fn reset_match(&mut self) {
        self.rounds_won = SideMap::default();
        self.collections = SideMap::default();
        self.is_match_over = false;
        self.match_winner = None;
        self.last_round = None;
        // Round numbers restart per match; generations never do.
        self.round = RoundEngine::begin(0, self.striker.clone(), &mut self.ids, 0);
        info!(rounds_to_win = self.config.rounds_to_win, "match started");
        self.begin_round();
    }

    fn begin_round(&mut self) {
        self.generation = self.generation.next();
        self.round_rng = self.rng.fork();
        let round_number = self.round.round_number() + 1;
        self.round = RoundEngine::begin(
            self.config.initial_count_per_side,
            self.striker.clone(),
            &mut self.ids,
            round_number,
        );
        let phase = self.scheduler.begin_round(self.round.active_side(), self.generation);
        debug!(
            round = round_number,
            generation = %self.generation,
            stack = self.round.stack_size(),
            phase = ?phase,
            "round started"
        );
    }

    fn apply_outcome(&mut self, outcome: RoundOutcome) -> Option<MatchSummary> {
        if self.is_match_over {
            return None;
        }

        if let Some(winner) = outcome.winner {
            self.collections[winner].extend(outcome.wagered.iter().copied());
            self.rounds_won[winner] += 1;
        }
        info!(
            round = outcome.round_number,
            winner = ?outcome.winner,
            tally_a = outcome.tallies[Side::A],
            tally_b = outcome.tallies[Side::B],
            "round adjudicated"
        );
        self.last_round = Some(outcome.summary());

        let threshold = self.config.rounds_to_win;
        if let Some(winner) = Side::ALL.into_iter().find(|&s| self.rounds_won[s] >= threshold) {
            self.is_match_over = true;
            self.match_winner = Some(winner);
            let summary = self.match_summary();
            info!(
                winner = %winner,
                rounds_a = self.rounds_won[Side::A],
                rounds_b = self.rounds_won[Side::B],
                pogs_a = self.collections[Side::A].len(),
                pogs_b = self.collections[Side::B].len(),
                "match over"
            );
            return summary;
        }

        if self.config.auto_advance && self.round.is_over() {
            self.begin_round();
        }
        None
    }

    fn perform_throw(&mut self, side: Side) -> ThrowResult {
        let probability = self.config.sides[side].flip_probability;
        let result = self.round.throw(probability, &mut self.round_rng);
        if result.is_none() {
            return result;
        }

        if result.round_ended {
            self.scheduler.end_round();
            if let Some(outcome) = self.round.take_outcome(self.config.stake_rule) {
                self.apply_outcome(outcome);
            }
        } else {
            self.scheduler.hand_off(&mut self.round, self.generation);
        }
        result
    }

    /// Fire a popped deferred throw if it still applies.
    fn fire_deferred(&mut self, pending: PendingThrow) -> bool {
        let stale = pending.generation != self.generation
            || self.is_match_over
            || self.round.is_over()
            || self.scheduler.phase() != TurnPhase::AwaitingComputerThrow
            || self.round.active_side() != pending.side;
        if stale {
            debug!(
                side = %pending.side,
                scheduled = %pending.generation,
                current = %self.generation,
                "discarding stale deferred throw"
            );
            return false;
        }

        self.perform_throw(pending.side);
        self.notify();
        true
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.on_state_changed(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SideProfile;

    fn config() -> MatchConfig {
        MatchConfig::default()
    }

    #[test]
    fn test_new_starts_first_round() {
        let game = MatchController::new(config(), 42).unwrap();
        let snapshot = game.snapshot();

        assert_eq!(snapshot.round_number, 1);
        assert_eq!(snapshot.stack_size, 10);
        assert_eq!(snapshot.tallies, SideMap::new(0, 0));
        assert_eq!(snapshot.active_side, Side::A);
        assert_eq!(snapshot.phase, TurnPhase::AwaitingHumanThrow);
        assert!(!snapshot.is_round_over);
        assert!(!snapshot.is_match_over);
        assert_eq!(game.generation(), RoundGeneration(1));
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let bad = config().with_count_per_side(0);
        assert_eq!(
            MatchController::new(bad, 1).err(),
            Some(ConfigError::ZeroTokenCount)
        );
    }

    #[test]
    fn test_placeholder_round_consumes_no_ids() {
        let game = MatchController::new(config(), 42).unwrap();
        let min_id = game.round().stack().iter().map(|t| t.id().raw()).min();
        assert_eq!(min_id, Some(0));
    }

    #[test]
    fn test_throw_rejected_on_computer_turn() {
        let config = config().with_side(Side::A, SideProfile::human(0.0));
        let mut game = MatchController::new(config, 42).unwrap();

        game.throw();
        assert_eq!(game.phase(), TurnPhase::AwaitingComputerThrow);

        let result = game.throw();
        assert!(result.is_none());
        assert_eq!(game.round().active_side(), Side::B);
    }

    #[test]
    fn test_advance_rejected_mid_round() {
        let mut game = MatchController::new(config(), 42).unwrap();
        assert!(!game.advance());
        assert_eq!(game.snapshot().round_number, 1);
    }

    #[test]
    fn test_set_striker_applies_next_round() {
        let config = config().with_side(Side::A, SideProfile::human(1.0));
        let mut game = MatchController::new(config, 42).unwrap();
        let rubber = Striker::new("rubber", 20.0, crate::pieces::Material::Rubber).unwrap();

        game.set_striker(rubber.clone()).unwrap();
        assert_eq!(game.round().striker(), &Striker::default());

        game.throw();
        game.advance();
        assert_eq!(game.round().striker(), &rubber);
    }
}
