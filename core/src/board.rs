//! The track and its generator.
//!
//! A board is generated once per game from the board stream:
//!   1. Each mid-game candidate rolls for a trap on its own.
//!   2. Random tiles from the configured range are added until the
//!      minimum trap count is reached. The final tile is never eligible.
//!   3. Each trap tile draws a rarity by weight, then a trap of that
//!      rarity uniformly.
//!
//! Trap positions live in a BTreeSet so rarity draws happen in ascending
//! tile order and a seed pins the whole layout.

use crate::{
    config::{BoardConfig, RarityWeights},
    rng::StreamRng,
    trap::{self, Rarity, TrapId},
    types::TileIndex,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub index:    TileIndex,
    pub trap:     Option<TrapId>,
    /// Set when the trap fires. Never cleared for the rest of the game.
    pub revealed: bool,
    /// Set when any player has ever stood here.
    pub stepped:  bool,
}

impl Tile {
    fn empty(index: TileIndex) -> Self {
        Self { index, trap: None, revealed: false, stepped: false }
    }

    pub fn has_hidden_trap(&self) -> bool {
        self.trap.is_some() && !self.revealed
    }

    pub fn has_revealed_trap(&self) -> bool {
        self.trap.is_some() && self.revealed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    /// A trap-free board. Used by tests to lay out exact scenarios.
    pub fn empty(tile_count: usize) -> Self {
        Self { tiles: (0..tile_count).map(Tile::empty).collect() }
    }

    pub fn generate(config: &BoardConfig, rng: &mut StreamRng) -> Self {
        let mut board = Self::empty(config.tile_count);
        let final_tile = config.final_tile();

        let mut positions: BTreeSet<TileIndex> = BTreeSet::new();
        for &pos in &config.mid_game_candidates {
            if pos < final_tile && rng.chance(config.candidate_trap_chance) {
                positions.insert(pos);
            }
        }
        while positions.len() < config.min_traps {
            let pos = rng.next_in_range(config.random_min, config.random_max);
            if pos != final_tile {
                positions.insert(pos);
            }
        }

        for &pos in &positions {
            let rarity = draw_rarity(&config.rarity_weights, rng);
            board.tiles[pos].trap = pick_trap(rarity, rng);
        }

        log::debug!(
            "board generated from {} stream: {} tiles, traps at {:?}",
            rng.name,
            board.tiles.len(),
            positions
        );
        board
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn final_tile(&self) -> TileIndex {
        self.tiles.len().saturating_sub(1)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: TileIndex) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn trap_at(&self, index: TileIndex) -> Option<TrapId> {
        self.tile(index).and_then(|t| t.trap)
    }

    /// Place or replace a trap. Out-of-range indexes are ignored.
    pub fn set_trap(&mut self, index: TileIndex, trap: Option<TrapId>) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.trap = trap;
        }
    }

    pub fn mark_stepped(&mut self, index: TileIndex) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.stepped = true;
        }
    }

    /// Reveal the tile's trap if it has an unrevealed one and return it.
    pub fn reveal(&mut self, index: TileIndex) -> Option<TrapId> {
        let tile = self.tiles.get_mut(index)?;
        if !tile.has_hidden_trap() {
            return None;
        }
        tile.revealed = true;
        tile.trap
    }

    /// True if a neighbour (±1) holds a trap that has not fired yet.
    pub fn hidden_trap_adjacent(&self, index: TileIndex) -> bool {
        let before = index.checked_sub(1).and_then(|i| self.tile(i));
        let after = index.checked_add(1).and_then(|i| self.tile(i));
        [before, after]
            .into_iter()
            .flatten()
            .any(Tile::has_hidden_trap)
    }

    pub fn trap_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.trap.is_some()).count()
    }

    pub fn hidden_trap_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.has_hidden_trap()).count()
    }

    pub fn discovered_trap_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.has_revealed_trap()).count()
    }
}

/// Weighted tier draw over [common, rare, legendary].
pub fn draw_rarity(weights: &RarityWeights, rng: &mut StreamRng) -> Rarity {
    let roll = rng.next_f64() * weights.total();
    if roll < weights.common {
        Rarity::Common
    } else if roll < weights.common + weights.rare {
        Rarity::Rare
    } else {
        Rarity::Legendary
    }
}

fn pick_trap(rarity: Rarity, rng: &mut StreamRng) -> Option<TrapId> {
    rng.pick(&trap::by_rarity(rarity)).copied()
}
