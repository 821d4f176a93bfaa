//! Board generator tests.
//!
//! Tests cover: board shape, final tile safety, minimum trap count,
//! candidate trap frequency, rarity distribution, and seeding.

use proptest::prelude::*;
use traptrack_core::{
    board::{draw_rarity, Board},
    config::{BoardConfig, RarityWeights},
    rng::{RngBank, StreamSlot},
    trap::{Rarity, TrapId},
};

fn board_for(seed: u64, game: u64, config: &BoardConfig) -> Board {
    let mut rng = RngBank::new(seed).for_stream(StreamSlot::Board, game);
    Board::generate(config, &mut rng)
}

fn layout(board: &Board) -> Vec<Option<TrapId>> {
    board.tiles().iter().map(|t| t.trap).collect()
}

proptest! {
    #[test]
    fn every_board_has_the_right_shape(seed in any::<u64>(), game in 1u64..50) {
        let config = BoardConfig::default();
        let board = board_for(seed, game, &config);

        prop_assert_eq!(board.len(), 50);
        prop_assert!(board.trap_at(49).is_none(), "final tile trapped");
        prop_assert!(board.trap_count() >= 10, "only {} traps", board.trap_count());
        for (i, tile) in board.tiles().iter().enumerate() {
            prop_assert_eq!(tile.index, i);
            if tile.trap.is_some() {
                prop_assert!(
                    (3..=48).contains(&i) || config.mid_game_candidates.contains(&i),
                    "trap outside eligible tiles at {}", i
                );
            }
        }
    }
}

/// With random fill disabled each candidate is a plain 0.7 coin flip.
#[test]
fn candidates_trapped_seventy_percent_of_the_time() {
    let config = BoardConfig { min_traps: 0, ..BoardConfig::default() };
    let trials = 4_000u64;
    let mut hits = 0u64;
    for game in 1..=trials {
        let board = board_for(0xC0FFEE, game, &config);
        hits += config
            .mid_game_candidates
            .iter()
            .filter(|&&pos| board.trap_at(pos).is_some())
            .count() as u64;
    }
    let rate = hits as f64 / (trials * config.mid_game_candidates.len() as u64) as f64;
    assert!((0.67..=0.73).contains(&rate), "candidate trap rate {rate:.3}");
}

/// Random fill can land on a candidate too, so the default rate sits a
/// little above 0.7.
#[test]
fn default_candidate_rate_near_seventy_percent() {
    let config = BoardConfig::default();
    let trials = 2_000u64;
    let mut hits = 0u64;
    for game in 1..=trials {
        let board = board_for(7, game, &config);
        hits += config
            .mid_game_candidates
            .iter()
            .filter(|&&pos| board.trap_at(pos).is_some())
            .count() as u64;
    }
    let rate = hits as f64 / (trials * 5) as f64;
    assert!((0.68..=0.82).contains(&rate), "candidate trap rate {rate:.3}");
}

#[test]
fn rarity_draws_follow_weights() {
    let weights = RarityWeights::default();
    let mut rng = RngBank::new(42).for_stream(StreamSlot::Board, 1);
    let n = 30_000;
    let (mut common, mut rare, mut legendary) = (0, 0, 0);
    for _ in 0..n {
        match draw_rarity(&weights, &mut rng) {
            Rarity::Common => common += 1,
            Rarity::Rare => rare += 1,
            Rarity::Legendary => legendary += 1,
        }
    }
    let share = |c: i32| c as f64 / n as f64;
    assert!((share(common) - 0.6).abs() < 0.02, "common {:.3}", share(common));
    assert!((share(rare) - 0.3).abs() < 0.02, "rare {:.3}", share(rare));
    assert!((share(legendary) - 0.1).abs() < 0.02, "legendary {:.3}", share(legendary));
}

#[test]
fn placed_traps_follow_rarity_weights() {
    let config = BoardConfig::default();
    let mut counts = [0u32; 3];
    for game in 1..=1_000 {
        for tile in board_for(99, game, &config).tiles() {
            if let Some(trap) = tile.trap {
                counts[trap.definition().rarity as usize] += 1;
            }
        }
    }
    let total: u32 = counts.iter().sum();
    let legendary = counts[Rarity::Legendary as usize] as f64 / total as f64;
    let common = counts[Rarity::Common as usize] as f64 / total as f64;
    assert!((common - 0.6).abs() < 0.03, "common {common:.3}");
    assert!((legendary - 0.1).abs() < 0.02, "legendary {legendary:.3}");
}

#[test]
fn saturated_range_fills_every_tile() {
    let config = BoardConfig { min_traps: 46, ..BoardConfig::default() };
    let board = board_for(5, 1, &config);
    assert!((3..=48).all(|i| board.trap_at(i).is_some()));
    assert!(board.trap_at(49).is_none());
    assert_eq!(board.trap_count(), 46);
}

#[test]
fn same_seed_same_board() {
    let config = BoardConfig::default();
    assert_eq!(board_for(1234, 1, &config), board_for(1234, 1, &config));
}

#[test]
fn each_game_gets_an_independent_layout() {
    let config = BoardConfig::default();
    let first = layout(&board_for(1234, 1, &config));
    let distinct = (2..=10)
        .filter(|&game| layout(&board_for(1234, game, &config)) != first)
        .count();
    assert_eq!(distinct, 9);
}

#[test]
fn fresh_boards_have_nothing_revealed() {
    let board = board_for(8, 1, &BoardConfig::default());
    assert_eq!(board.discovered_trap_count(), 0);
    assert_eq!(board.hidden_trap_count(), board.trap_count());
    assert!(board.tiles().iter().all(|t| !t.stepped));
}
