//! Players and the partial updates trap effects produce.

use crate::{
    config::PlayerConfig,
    types::{PlayerId, TileIndex},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id:            PlayerId,
    pub name:          String,
    pub color:         String,
    pub position:      TileIndex,
    pub skip_turns:    u32,
    /// Display only. Skip count alone decides whether a turn is lost.
    pub frozen:        bool,
    pub traps_hit:     u32,
    pub lucky_escapes: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            position: 0,
            skip_turns: 0,
            frozen: false,
            traps_hit: 0,
            lucky_escapes: 0,
        }
    }

    /// Build the roster from config. Ids start at 1.
    pub fn roster(configs: &[PlayerConfig]) -> Vec<Player> {
        configs
            .iter()
            .zip(1..)
            .map(|(cfg, id)| Player::new(id, cfg.name.clone(), cfg.color.clone()))
            .collect()
    }

    /// Back to starting attributes. Identity is kept.
    pub fn reset(&mut self) {
        self.position = 0;
        self.skip_turns = 0;
        self.frozen = false;
        self.traps_hit = 0;
        self.lucky_escapes = 0;
    }

    /// Merge a partial update; fields left as None are untouched.
    pub fn apply(&mut self, update: &PlayerUpdate) {
        if let Some(position) = update.position {
            self.position = position;
        }
        if let Some(skip_turns) = update.skip_turns {
            self.skip_turns = skip_turns;
        }
        if let Some(frozen) = update.frozen {
            self.frozen = frozen;
        }
    }
}

/// The fields a trap effect is allowed to change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position:   Option<TileIndex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_turns: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frozen:     Option<bool>,
}

impl PlayerUpdate {
    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.skip_turns.is_none() && self.frozen.is_none()
    }
}
