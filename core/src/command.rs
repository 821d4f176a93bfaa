use serde::{Deserialize, Serialize};

/// Everything a user can ask the game to do.
/// Commands arriving in the wrong state are ignored, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Clock control ─────────────────────────────
    SetSpeed { speed: crate::clock::GameSpeed },

    // ── Turn ──────────────────────────────────────
    Roll,

    // ── New game flow ─────────────────────────────
    NewGame,
    ConfirmNewGame,
    CancelNewGame,
}

impl PlayerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetSpeed { .. }  => "set_speed",
            Self::Roll             => "roll",
            Self::NewGame          => "new_game",
            Self::ConfirmNewGame   => "confirm_new_game",
            Self::CancelNewGame    => "cancel_new_game",
        }
    }
}
