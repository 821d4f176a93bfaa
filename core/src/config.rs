use crate::{
    error::{GameError, GameResult},
    types::{Millis, TileIndex, DEFAULT_TILE_COUNT},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ── Board generation ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    pub tile_count: usize,
    /// Tiles that roll individually for a trap before random fill.
    pub mid_game_candidates: Vec<TileIndex>,
    pub candidate_trap_chance: f64,
    pub min_traps: usize,
    /// Inclusive range random fill positions are drawn from.
    pub random_min: TileIndex,
    pub random_max: TileIndex,
    pub rarity_weights: RarityWeights,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            tile_count: DEFAULT_TILE_COUNT,
            mid_game_candidates: vec![15, 22, 28, 35, 41],
            candidate_trap_chance: 0.7,
            min_traps: 10,
            random_min: 3,
            random_max: 48,
            rarity_weights: RarityWeights::default(),
        }
    }
}

impl BoardConfig {
    pub fn final_tile(&self) -> TileIndex {
        self.tile_count.saturating_sub(1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RarityWeights {
    pub common:    f64,
    pub rare:      f64,
    pub legendary: f64,
}

impl Default for RarityWeights {
    fn default() -> Self {
        Self { common: 0.6, rare: 0.3, legendary: 0.1 }
    }
}

impl RarityWeights {
    pub fn total(&self) -> f64 {
        self.common + self.rare + self.legendary
    }
}

// ── Turn timing (simulated milliseconds) ──────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimingConfig {
    pub dice_spin_interval:  Millis,
    pub dice_spin_count:     u32,
    pub dice_settle:         Millis,
    pub move_step_interval:  Millis,
    pub landing_settle:      Millis,
    pub skip_message:        Millis,
    pub trap_message:        Millis,
    pub safe_message:        Millis,
    pub lucky_escape_notice: Millis,
    pub cooldown:            Millis,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            dice_spin_interval:  80,
            dice_spin_count:     10,
            dice_settle:         400,
            move_step_interval:  350,
            landing_settle:      600,
            skip_message:        2_500,
            trap_message:        3_500,
            safe_message:        2_000,
            lucky_escape_notice: 1_500,
            cooldown:            5_000,
        }
    }
}

// ── Roster ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerConfig {
    pub name:  String,
    pub color: String,
}

fn default_roster() -> Vec<PlayerConfig> {
    [("Player 1", "red"), ("Player 2", "blue"), ("Player 3", "green"), ("Player 4", "yellow")]
        .into_iter()
        .map(|(name, color)| PlayerConfig { name: name.into(), color: color.into() })
        .collect()
}

// ── Top level ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub board:   BoardConfig,
    pub timing:  TimingConfig,
    pub players: Vec<PlayerConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board:   BoardConfig::default(),
            timing:  TimingConfig::default(),
            players: default_roster(),
        }
    }
}

impl GameConfig {
    /// Load a JSON config file. Missing fields fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs the board generator or sequencer cannot honour.
    pub fn validate(&self) -> GameResult<()> {
        let board = &self.board;
        if board.tile_count < 2 {
            return invalid(format!("tile_count must be at least 2, got {}", board.tile_count));
        }
        if self.players.is_empty() {
            return invalid("at least one player is required".into());
        }
        let final_tile = board.final_tile();
        if let Some(pos) = board.mid_game_candidates.iter().find(|&&p| p >= final_tile) {
            return invalid(format!("candidate tile {pos} must be before the final tile {final_tile}"));
        }
        if board.random_min > board.random_max || board.random_max >= final_tile {
            return invalid(format!(
                "random range {}..={} must be non-empty and before the final tile {final_tile}",
                board.random_min, board.random_max
            ));
        }
        let room = board.random_max - board.random_min + 1;
        if room < board.min_traps {
            return invalid(format!(
                "min_traps {} exceeds the {room} tiles available for random placement",
                board.min_traps
            ));
        }
        if !(0.0..=1.0).contains(&board.candidate_trap_chance) {
            return invalid(format!(
                "candidate_trap_chance must be within [0, 1], got {}",
                board.candidate_trap_chance
            ));
        }
        let w = &board.rarity_weights;
        if w.common < 0.0 || w.rare < 0.0 || w.legendary < 0.0 || w.total() <= 0.0 {
            return invalid("rarity weights must be non-negative with a positive sum".into());
        }
        if self.timing.dice_spin_count == 0 {
            return invalid("dice_spin_count must be at least 1".into());
        }
        Ok(())
    }
}

fn invalid(reason: String) -> GameResult<()> {
    Err(GameError::InvalidConfig { reason })
}
