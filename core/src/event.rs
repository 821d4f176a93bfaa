//! Everything observable that happens during a session.
//!
//! RULE: The sequencer reports what it did ONLY through events.
//! Front-ends read state through `GameView`; events tell them what
//! changed and in which order.

use crate::{
    player::PlayerUpdate,
    trap::TrapId,
    types::{Millis, PlayerId, TileIndex},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    // ── Session events ─────────────────────────────
    GameStarted {
        game: u64,
        trap_count: usize,
    },
    GameReset {
        game: u64,
    },
    NewGameConfirmationRequested,
    NewGameCancelled,

    // ── Turn events ────────────────────────────────
    RollStarted {
        player_id: PlayerId,
    },
    DiceRolled {
        player_id: PlayerId,
        value: u64,
    },
    TurnSkipped {
        player_id: PlayerId,
        remaining: u32,
    },
    PlayerStepped {
        player_id: PlayerId,
        position: TileIndex,
    },
    TrapTriggered {
        player_id: PlayerId,
        tile: TileIndex,
        trap: TrapId,
        update: PlayerUpdate,
    },
    SafeLanding {
        player_id: PlayerId,
        tile: TileIndex,
    },
    LuckyEscape {
        player_id: PlayerId,
        tile: TileIndex,
    },
    TurnPassed {
        from: PlayerId,
        to: PlayerId,
    },
    CooldownEnded,
    GameWon {
        player_id: PlayerId,
        game: u64,
    },

    // ── Presentation ───────────────────────────────
    MessageChanged {
        text: String,
    },
}

impl GameEvent {
    /// Stable string name for the event log.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::GameStarted { .. }               => "game_started",
            Self::GameReset { .. }                 => "game_reset",
            Self::NewGameConfirmationRequested     => "new_game_confirmation_requested",
            Self::NewGameCancelled                 => "new_game_cancelled",
            Self::RollStarted { .. }               => "roll_started",
            Self::DiceRolled { .. }                => "dice_rolled",
            Self::TurnSkipped { .. }               => "turn_skipped",
            Self::PlayerStepped { .. }             => "player_stepped",
            Self::TrapTriggered { .. }             => "trap_triggered",
            Self::SafeLanding { .. }               => "safe_landing",
            Self::LuckyEscape { .. }               => "lucky_escape",
            Self::TurnPassed { .. }                => "turn_passed",
            Self::CooldownEnded                    => "cooldown_ended",
            Self::GameWon { .. }                   => "game_won",
            Self::MessageChanged { .. }            => "message_changed",
        }
    }
}

/// One entry in the engine's in-memory event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub seq:        u64,
    pub at:         Millis,
    pub game:       u64,
    pub event_type: String,
    pub payload:    String, // JSON-serialized GameEvent
}
