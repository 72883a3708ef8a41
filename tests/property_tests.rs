//! Property tests for round and match invariants.

use proptest::prelude::*;

use rust_pogs::core::{GameRng, MatchConfig, Side, SideProfile, TokenIdAllocator};
use rust_pogs::game::MatchController;
use rust_pogs::pieces::Striker;
use rust_pogs::round::{RoundEngine, StakeRule};

/// Throws allowed per round before a test gives up.
const MAX_THROWS: usize = 2_000;

fn hot_seat(count: u32, rounds_to_win: u32, p_a: f64, p_b: f64) -> MatchConfig {
    MatchConfig::default()
        .with_count_per_side(count)
        .with_rounds_to_win(rounds_to_win)
        .with_side(Side::A, SideProfile::human(p_a))
        .with_side(Side::B, SideProfile::human(p_b))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: no pog is created or lost during a round.
    #[test]
    fn prop_round_conserves_pogs(
        count in 1u32..=12,
        p in 0.05f64..=1.0,
        seed in any::<u64>(),
    ) {
        let mut round = RoundEngine::begin(count, Striker::default(), &mut TokenIdAllocator::new(), 1);
        let mut rng = GameRng::new(seed);

        for _ in 0..MAX_THROWS {
            if round.is_over() {
                break;
            }
            let before = round.stack_size();
            let result = round.throw(p, &mut rng);

            prop_assert!(result.flipped_count as usize <= before);
            prop_assert_eq!(result.flipped.len(), result.flipped_count as usize);
            prop_assert_eq!(round.stack_size(), before - result.flipped_count as usize);
            prop_assert!(round.is_conserved());
            round.pass_turn();
        }

        prop_assert!(round.is_over());
        let total = round.tally(Side::A) + round.tally(Side::B);
        prop_assert_eq!(total, 2 * count);
    }

    /// Property: the wager goes to the side with more flips, or nobody.
    #[test]
    fn prop_outcome_follows_tallies(
        count in 1u32..=8,
        p in 0.1f64..=1.0,
        seed in any::<u64>(),
    ) {
        let mut round = RoundEngine::begin(count, Striker::default(), &mut TokenIdAllocator::new(), 1);
        let mut rng = GameRng::new(seed);
        while !round.is_over() {
            round.throw(p, &mut rng);
            round.pass_turn();
        }
        let (a, b) = (round.tally(Side::A), round.tally(Side::B));

        let outcome = round.take_outcome(StakeRule::EntireWager).unwrap();
        let expected = if a > b {
            Some(Side::A)
        } else if b > a {
            Some(Side::B)
        } else {
            None
        };
        prop_assert_eq!(outcome.winner, expected);
        prop_assert_eq!(outcome.wagered.len(), 2 * count as usize);
        prop_assert!(round.take_outcome(StakeRule::EntireWager).is_none());
    }

    /// Property: a match ends exactly when a side reaches the threshold.
    #[test]
    fn prop_match_ends_at_threshold(
        count in 1u32..=6,
        rounds_to_win in 1u32..=4,
        p_a in 0.1f64..=1.0,
        p_b in 0.1f64..=1.0,
        entire_wager in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let rule = if entire_wager { StakeRule::EntireWager } else { StakeRule::FinalThrow };
        let config = hot_seat(count, rounds_to_win, p_a, p_b).with_stake_rule(rule);
        let mut game = MatchController::new(config, seed).unwrap();

        for _ in 0..MAX_THROWS * 4 {
            if game.is_match_over() {
                break;
            }
            if game.snapshot().is_round_over {
                prop_assert!(game.advance());
            } else {
                game.throw();
            }

            let snapshot = game.snapshot();
            let reached = Side::ALL
                .into_iter()
                .any(|s| snapshot.rounds_won[s] >= rounds_to_win);
            prop_assert!(snapshot.rounds_won[Side::A] <= rounds_to_win);
            prop_assert!(snapshot.rounds_won[Side::B] <= rounds_to_win);
            prop_assert_eq!(snapshot.is_match_over, reached);
        }

        prop_assert!(game.is_match_over());
        let summary = game.match_summary().unwrap();
        prop_assert_eq!(summary.rounds_won[summary.winner], rounds_to_win);

        let decided = summary.rounds_won[Side::A] + summary.rounds_won[Side::B];
        let kept = summary.collection_sizes[Side::A] + summary.collection_sizes[Side::B];
        let full = (decided * 2 * count) as usize;
        match rule {
            StakeRule::EntireWager => {
                prop_assert_eq!(kept, full);
            }
            StakeRule::FinalThrow => {
                // The emptying throw flips at least one pog
                prop_assert!((decided as usize..=full).contains(&kept));
            }
        }
    }

    /// Property: the same seed replays the same match.
    #[test]
    fn prop_seeded_matches_replay(seed in any::<u64>()) {
        let config = hot_seat(3, 2, 0.4, 0.6);
        let mut first = MatchController::new(config.clone(), seed).unwrap();
        let mut second = MatchController::new(config, seed).unwrap();

        for _ in 0..200 {
            if first.is_match_over() {
                break;
            }
            if first.snapshot().is_round_over {
                first.advance();
                second.advance();
            } else {
                prop_assert_eq!(first.throw(), second.throw());
            }
            prop_assert_eq!(first.snapshot(), second.snapshot());
        }
    }
}
