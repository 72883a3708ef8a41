//! Deferred computer throw tests.
//!
//! These tests verify the virtual clock, firing order and the staleness
//! check that drops throws scheduled for a round that no longer exists.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use rust_pogs::core::{MatchConfig, RoundGeneration, Side, SideMap, SideProfile, TokenId};
use rust_pogs::game::{MatchController, Snapshot};
use rust_pogs::pieces::Token;
use rust_pogs::round::adjudicate;
use rust_pogs::turns::TurnPhase;

const DELAY: Duration = Duration::from_millis(1500);

/// Human A never flips, so every throw hands the stack to computer B.
fn waiting_on_computer(b_probability: f64) -> MatchController {
    let config = MatchConfig::default()
        .with_side(Side::A, SideProfile::human(0.0))
        .with_side(Side::B, SideProfile::computer(b_probability));
    let mut game = MatchController::new(config, 5).unwrap();
    game.throw();
    assert_eq!(game.phase(), TurnPhase::AwaitingComputerThrow);
    game
}

/// Snapshot with the clock zeroed, for comparing state across time.
fn frozen(game: &MatchController) -> Snapshot {
    Snapshot { now: Duration::ZERO, ..game.snapshot() }
}

// =============================================================================
// Timing
// =============================================================================

/// The computer does not throw before its delay has elapsed.
#[test]
fn test_computer_waits_for_delay() {
    let mut game = waiting_on_computer(1.0);

    assert_eq!(game.advance_time(Duration::from_millis(1000)), 0);
    assert_eq!(game.snapshot().stack_size, 10);
    assert_eq!(game.now(), Duration::from_millis(1000));

    assert_eq!(game.advance_time(Duration::from_millis(500)), 1);
    assert!(game.snapshot().is_round_over);
    assert_eq!(game.now(), DELAY);
}

/// After the computer throws, control returns to the human.
#[test]
fn test_computer_hands_back_to_human() {
    let mut game = waiting_on_computer(0.0);

    assert_eq!(game.advance_time(DELAY), 1);

    let snapshot = game.snapshot();
    assert_eq!(snapshot.active_side, Side::A);
    assert_eq!(snapshot.phase, TurnPhase::AwaitingHumanThrow);
    assert!(game.pending_throws().is_empty());
}

/// Custom delays are honoured.
#[test]
fn test_configured_delay() {
    let config = MatchConfig::default()
        .with_side(Side::A, SideProfile::human(0.0))
        .with_computer_delay(Duration::from_millis(200));
    let mut game = MatchController::new(config, 5).unwrap();
    game.throw();

    assert_eq!(game.next_deadline(), Some(Duration::from_millis(200)));
    assert_eq!(game.advance_time(Duration::from_millis(200)), 1);
}

/// Computer against computer plays out without any commands.
#[test]
fn test_computer_vs_computer_round() {
    let config = MatchConfig::default()
        .with_side(Side::A, SideProfile::computer(0.5))
        .with_side(Side::B, SideProfile::computer(0.45));
    let mut game = MatchController::new(config, 17).unwrap();
    assert_eq!(game.phase(), TurnPhase::AwaitingComputerThrow);

    let fired = game.run_until_idle();

    assert!(fired >= 1);
    assert!(game.snapshot().is_round_over);
    assert!(game.pending_throws().is_empty());
    assert!(game.round().is_conserved());
}

/// With auto_advance, computers play an entire match unattended.
#[test]
fn test_computer_vs_computer_match() {
    let config = MatchConfig::default()
        .with_side(Side::A, SideProfile::computer(0.5))
        .with_side(Side::B, SideProfile::computer(0.45))
        .with_auto_advance(true);
    let mut game = MatchController::new(config, 23).unwrap();

    game.run_until_idle();

    assert!(game.is_match_over());
    let summary = game.match_summary().unwrap();
    assert_eq!(summary.rounds_won[summary.winner], 3);
    assert!(summary.rounds_won[summary.winner.other()] < 3);
    // Each decided round awards at least the one pog of its final throw
    assert!((3..=30).contains(&summary.collection_sizes[summary.winner]));
}

/// A clock idled to its limit still schedules and fires computer throws.
#[test]
fn test_throw_at_clock_limit() {
    let config = MatchConfig::default()
        .with_side(Side::A, SideProfile::human(0.0))
        .with_side(Side::B, SideProfile::computer(1.0));
    let mut game = MatchController::new(config, 5).unwrap();

    assert_eq!(game.advance_time(Duration::MAX), 0);
    assert_eq!(game.now(), Duration::MAX);

    game.throw();
    assert_eq!(game.next_deadline(), Some(Duration::MAX));

    assert_eq!(game.advance_time(Duration::from_millis(1)), 1);
    assert!(game.snapshot().is_round_over);
    assert_eq!(game.now(), Duration::MAX);
}

/// An enormous computer delay pins the deadline at the clock limit.
#[test]
fn test_huge_computer_delay() {
    let config = MatchConfig::default()
        .with_side(Side::A, SideProfile::human(0.0))
        .with_side(Side::B, SideProfile::computer(1.0))
        .with_computer_delay(Duration::MAX);
    let mut game = MatchController::new(config, 5).unwrap();

    assert_eq!(game.advance_time(Duration::from_millis(1)), 0);
    game.throw();
    assert_eq!(game.next_deadline(), Some(Duration::MAX));

    assert_eq!(game.run_until_idle(), 1);
    assert!(game.snapshot().is_round_over);
}

// =============================================================================
// Staleness
// =============================================================================

/// A throw queued before a new match starts has no effect on that match.
#[test]
fn test_stale_after_new_match() {
    let mut game = waiting_on_computer(1.0);
    let old_generation = game.generation();

    game.start_match();
    assert!(game.generation() > old_generation);
    let before = frozen(&game);

    assert_eq!(game.advance_time(DELAY), 0);
    assert_eq!(frozen(&game), before);
    assert_eq!(game.phase(), TurnPhase::AwaitingHumanThrow);
}

/// Same after a restart with a different config.
#[test]
fn test_stale_after_restart() {
    let mut game = waiting_on_computer(1.0);
    let config = MatchConfig::default()
        .with_count_per_side(2)
        .with_side(Side::A, SideProfile::human(0.0))
        .with_side(Side::B, SideProfile::computer(1.0));
    game.restart(config).unwrap();

    assert_eq!(game.advance_time(DELAY), 0);
    assert_eq!(game.snapshot().stack_size, 4);
    assert_eq!(game.snapshot().tallies, SideMap::new(0, 0));
}

/// A queued throw that fires after the match ended is dropped.
#[test]
fn test_stale_after_match_over() {
    let mut game = waiting_on_computer(1.0);
    for round in 1..=3 {
        let wager = vec![Token::new(TokenId::new(9_000 + u64::from(round)))];
        game.on_round_adjudicated(adjudicate(round, SideMap::new(1, 0), wager));
    }
    assert!(game.is_match_over());
    let before = frozen(&game);

    assert_eq!(game.advance_time(DELAY), 0);
    assert_eq!(frozen(&game), before);
    assert_eq!(game.rounds_won(Side::B), 0);
}

/// The stale throw stays queued until its deadline and is then consumed.
#[test]
fn test_stale_throw_is_consumed() {
    let mut game = waiting_on_computer(1.0);
    game.start_match();

    assert_eq!(game.pending_throws().len(), 1);
    assert_eq!(game.pending_throws()[0].generation, RoundGeneration(1));

    game.advance_time(DELAY);
    assert!(game.pending_throws().is_empty());
}

/// Discarded throws do not notify observers.
#[test]
fn test_stale_throw_is_silent() {
    let mut game = waiting_on_computer(1.0);
    game.start_match();

    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    game.subscribe(move |_: &Snapshot| counter.set(counter.get() + 1));

    game.advance_time(DELAY);
    assert_eq!(calls.get(), 0);

    game.throw();
    assert_eq!(calls.get(), 1);
}
