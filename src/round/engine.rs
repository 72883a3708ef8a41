//! The round engine: one stack, struck until empty.
//!
//! ## Lifecycle
//!
//! 1. `begin()` builds `2n` face-down pogs, Side A to throw
//! 2. `throw()` resolves flips, tallies them to the active side and sets
//!    flipped pogs aside
//! 3. `pass_turn()` hands the stack to the other side (turn scheduler)
//! 4. Once the stack is empty the round is over; `take_outcome()` hands the
//!    adjudicated result to the match controller exactly once
//!
//! ## Conservation
//!
//! Every pog is either in the stack or set aside, and every set-aside pog
//! is tallied to exactly one side:
//! `stack + set_aside == 2n` and `set_aside == tally_a + tally_b`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::ids::{TokenId, TokenIdAllocator};
use crate::core::side::{Side, SideMap};
use crate::flip::{FlipResolver, FlipSource};
use crate::pieces::{Striker, Token};

use super::outcome::{adjudicate, RoundOutcome, StakeRule};

/// What a single throw did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowResult {
    /// Side that threw. `None` when the throw was rejected.
    pub side: Option<Side>,

    /// Number of pogs that landed face-up.
    pub flipped_count: u32,

    /// Ids of the pogs that landed face-up.
    pub flipped: SmallVec<[TokenId; 10]>,

    /// Did this throw empty the stack?
    pub round_ended: bool,
}

impl ThrowResult {
    /// The zero result returned for a rejected throw.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Check if the throw was rejected.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.side.is_none()
    }
}

/// State and rules of a single round.
#[derive(Clone, Debug)]
pub struct RoundEngine {
    round_number: u32,
    total: u32,
    stack: Vec<Token>,
    /// Flipped pogs in removal order.
    set_aside: Vec<Token>,
    /// Index into `set_aside` where the latest throw's pogs begin.
    last_throw_start: usize,
    tallies: SideMap<u32>,
    active_side: Side,
    is_over: bool,
    outcome_taken: bool,
    striker: Striker,
}

impl RoundEngine {
    /// Set up a fresh round with `2 × count_per_side` face-down pogs.
    ///
    /// Side A throws first.
    #[must_use]
    pub fn begin(
        count_per_side: u32,
        striker: Striker,
        ids: &mut TokenIdAllocator,
        round_number: u32,
    ) -> Self {
        let total = count_per_side.saturating_mul(2);
        let stack = Token::batch(total as usize, ids);

        Self {
            round_number,
            total,
            stack,
            set_aside: Vec::with_capacity(total as usize),
            last_throw_start: 0,
            tallies: SideMap::default(),
            active_side: Side::A,
            is_over: false,
            outcome_taken: false,
            striker,
        }
    }

    /// Strike the stack once on behalf of the active side.
    ///
    /// Rejected (returns [`ThrowResult::none`]) if the round is over or the
    /// stack is empty. Does not pass the turn.
    pub fn throw<S: FlipSource>(&mut self, probability: f64, source: &mut S) -> ThrowResult {
        if self.is_over || self.stack.is_empty() {
            return ThrowResult::none();
        }

        let side = self.active_side;
        let face_up = FlipResolver::resolve(&mut self.stack, probability, source);

        self.last_throw_start = self.set_aside.len();
        let mut flipped = SmallVec::new();
        let mut remaining = Vec::with_capacity(self.stack.len() - face_up);
        for token in self.stack.drain(..) {
            if token.is_face_up() {
                flipped.push(token.id());
                self.set_aside.push(token);
            } else {
                remaining.push(token);
            }
        }
        source.shuffle(&mut remaining);
        self.stack = remaining;

        self.tallies[side] += face_up as u32;
        self.is_over = self.stack.is_empty();
        debug_assert!(self.is_conserved());

        debug!(
            round = self.round_number,
            side = %side,
            flipped = face_up,
            remaining = self.stack.len(),
            round_ended = self.is_over,
            "throw resolved"
        );

        ThrowResult {
            side: Some(side),
            flipped_count: face_up as u32,
            flipped,
            round_ended: self.is_over,
        }
    }

    /// Hand the stack to the other side. No-op once the round is over.
    pub fn pass_turn(&mut self) -> Side {
        if !self.is_over {
            self.active_side = self.active_side.other();
        }
        self.active_side
    }

    /// Adjudicate the finished round. Returns `None` while the round is
    /// active or if the outcome was already taken.
    pub fn take_outcome(&mut self, rule: StakeRule) -> Option<RoundOutcome> {
        if !self.is_over || self.outcome_taken {
            return None;
        }
        self.outcome_taken = true;

        let wagered = match rule {
            StakeRule::EntireWager => self.set_aside.clone(),
            StakeRule::FinalThrow => self.set_aside[self.last_throw_start..].to_vec(),
        };
        Some(adjudicate(self.round_number, self.tallies.clone(), wagered))
    }

    // === Queries ===

    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Pogs still in the stack.
    #[must_use]
    pub fn stack(&self) -> &[Token] {
        &self.stack
    }

    #[must_use]
    pub fn stack_size(&self) -> usize {
        self.stack.len()
    }

    /// Pogs wagered this round (`2n`).
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Flipped pogs removed from the stack so far.
    #[must_use]
    pub fn set_aside(&self) -> &[Token] {
        &self.set_aside
    }

    #[must_use]
    pub fn tallies(&self) -> &SideMap<u32> {
        &self.tallies
    }

    #[must_use]
    pub fn tally(&self, side: Side) -> u32 {
        self.tallies[side]
    }

    #[must_use]
    pub fn active_side(&self) -> Side {
        self.active_side
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    #[must_use]
    pub fn striker(&self) -> &Striker {
        &self.striker
    }

    /// Check the token conservation invariant.
    #[must_use]
    pub fn is_conserved(&self) -> bool {
        let tallied = self.tallies[Side::A] + self.tallies[Side::B];
        self.stack.len() as u32 + tallied == self.total && self.set_aside.len() as u32 == tallied
    }
}
