//! The single game state struct. Owned by the engine, mutated only by
//! the sequencer and the reset flow, read by everything else.

use crate::{
    board::Board,
    player::Player,
    types::{PlayerId, TileIndex},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    /// Waiting for a roll.
    Idle,
    /// Die spinning.
    Rolling,
    /// Token walking toward its target, one tile per step.
    Moving,
    /// Token stopped; landing tile not yet evaluated.
    Resolving,
    /// Outcome message on screen, next player not yet up.
    Switching,
    /// Terminal until reset.
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    /// Survives resets; starts at 1.
    pub game_number:       u64,
    pub total_rolls:       u64,
    pub total_traps_hit:   u64,
}

impl GameStats {
    pub fn first_game() -> Self {
        Self { game_number: 1, total_rolls: 0, total_traps_hit: 0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveProgress {
    pub player_id: PlayerId,
    pub steps:     u64,
    pub taken:     u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub players:         Vec<Player>,
    pub board:           Board,
    pub current:         usize,
    pub phase:           TurnPhase,
    /// Independent from phase; both must be clear before a roll.
    pub cooldown:        bool,
    pub confirm_pending: bool,
    pub winner:          Option<PlayerId>,
    pub die_face:        u64,
    pub spins_done:      u32,
    pub moving:          Option<MoveProgress>,
    pub message:         String,
    pub stats:           GameStats,
}

impl GameState {
    pub fn new(players: Vec<Player>, board: Board) -> Self {
        Self {
            players,
            board,
            current: 0,
            phase: TurnPhase::Idle,
            cooldown: false,
            confirm_pending: false,
            winner: None,
            die_face: 1,
            spins_done: 0,
            moving: None,
            message: String::new(),
            stats: GameStats::first_game(),
        }
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn current_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.current]
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn final_tile(&self) -> TileIndex {
        self.board.final_tile()
    }

    /// A turn sequence is running: rolling, moving, or resolving.
    pub fn turn_in_flight(&self) -> bool {
        !matches!(self.phase, TurnPhase::Idle | TurnPhase::Won)
    }

    /// Anyone has moved or rolled this game.
    pub fn in_progress(&self) -> bool {
        self.players.iter().any(|p| p.position > 0) || self.stats.total_rolls > 0
    }

    pub fn can_roll(&self) -> bool {
        self.phase == TurnPhase::Idle
            && !self.cooldown
            && !self.confirm_pending
            && self.winner.is_none()
    }

    /// Back to a fresh game on `board`. The game counter moves on.
    pub fn reset(&mut self, board: Board) {
        for player in &mut self.players {
            player.reset();
        }
        self.board = board;
        self.current = 0;
        self.phase = TurnPhase::Idle;
        self.cooldown = false;
        self.confirm_pending = false;
        self.winner = None;
        self.die_face = 1;
        self.spins_done = 0;
        self.moving = None;
        self.stats = GameStats {
            game_number: self.stats.game_number + 1,
            total_rolls: 0,
            total_traps_hit: 0,
        };
    }
}
