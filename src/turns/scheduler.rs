//! Turn scheduler with a deferred-throw queue.
//!
//! The scheduler tracks whose move it is and queues computer throws on a
//! virtual clock. It never fires anything itself: the match controller
//! pops due throws with [`TurnScheduler::pop_due`] and decides whether
//! they are still valid.
//!
//! Queued throws are never cancelled. Beginning a round bumps the round
//! generation, and a throw whose generation no longer matches is dropped
//! when it is popped.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::ids::RoundGeneration;
use crate::core::side::{Controller, Side, SideMap};
use crate::round::RoundEngine;

/// What the round is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Blocked on a `throw()` command.
    AwaitingHumanThrow,
    /// A deferred computer throw is queued.
    AwaitingComputerThrow,
    /// The stack is empty.
    RoundOver,
}

/// A computer throw waiting for its deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingThrow {
    pub side: Side,
    pub due_at: Duration,
    pub generation: RoundGeneration,
}

/// Alternates turns and queues delayed computer throws.
#[derive(Clone, Debug)]
pub struct TurnScheduler {
    controllers: SideMap<Controller>,
    delay: Duration,
    phase: TurnPhase,
    now: Duration,
    pending: Vec<PendingThrow>,
}

impl TurnScheduler {
    /// Create a scheduler at time zero with no round in progress.
    pub fn new(controllers: SideMap<Controller>, delay: Duration) -> Self {
        Self {
            controllers,
            delay,
            phase: TurnPhase::RoundOver,
            now: Duration::ZERO,
            pending: Vec::new(),
        }
    }

    /// Swap controllers and delay. Takes effect from the next hand-off;
    /// throws already queued keep their deadlines.
    pub fn reconfigure(&mut self, controllers: SideMap<Controller>, delay: Duration) {
        self.controllers = controllers;
        self.delay = delay;
    }

    /// Enter the phase for a round's opening side.
    pub fn begin_round(&mut self, first: Side, generation: RoundGeneration) -> TurnPhase {
        self.await_side(first, generation)
    }

    /// Pass the stack to the other side after a throw that left pogs in it.
    pub fn hand_off(&mut self, round: &mut RoundEngine, generation: RoundGeneration) -> TurnPhase {
        if round.is_over() {
            self.end_round();
            return self.phase;
        }
        let next = round.pass_turn();
        self.await_side(next, generation)
    }

    /// The stack emptied; whoever was throwing, the round is done.
    pub fn end_round(&mut self) {
        self.phase = TurnPhase::RoundOver;
    }

    fn await_side(&mut self, side: Side, generation: RoundGeneration) -> TurnPhase {
        self.phase = match self.controllers[side] {
            Controller::Human => TurnPhase::AwaitingHumanThrow,
            Controller::Computer => {
                self.pending.push(PendingThrow {
                    side,
                    due_at: self.now.saturating_add(self.delay),
                    generation,
                });
                TurnPhase::AwaitingComputerThrow
            }
        };
        self.phase
    }

    // === Clock ===

    /// Current virtual time. Saturates at `Duration::MAX`.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward. Never moves it backwards.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Deadline of the earliest queued throw.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.due_at).min()
    }

    /// Pop the earliest throw due at or before `until`, moving the clock to
    /// its deadline. Ties pop in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<PendingThrow> {
        let (index, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_at <= until)
            .min_by_key(|(i, p)| (p.due_at, *i))?;

        let pending = self.pending.remove(index);
        self.set_now(pending.due_at);
        Some(pending)
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub fn controller(&self, side: Side) -> Controller {
        self.controllers[side]
    }

    /// Throws still queued, including stale ones not yet popped.
    #[must_use]
    pub fn pending(&self) -> &[PendingThrow] {
        &self.pending
    }
}
