//! Read-only snapshot of everything a front-end draws.
//!
//! A view is captured from the state and never written back. It is
//! serialized as-is for IPC clients.

use crate::{
    board::Tile,
    player::Player,
    state::{GameState, TurnPhase},
    trap::Rarity,
    types::{PlayerId, TileIndex},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    pub phase:     TurnPhase,
    pub message:   String,
    pub die_face:  u64,
    pub players:   Vec<PlayerView>,
    pub tiles:     Vec<TileView>,
    pub stats:     StatsView,
    pub controls:  ControlsView,
    pub winner:    Option<WinnerView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id:            PlayerId,
    pub name:          String,
    pub color:         String,
    pub position:      TileIndex,
    pub skip_turns:    u32,
    pub frozen:        bool,
    pub traps_hit:     u32,
    pub lucky_escapes: u32,
    pub is_current:    bool,
    pub is_moving:     bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TrapVisibility {
    None,
    Hidden,
    Revealed { rarity: Rarity },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileView {
    pub index:   TileIndex,
    pub trap:    TrapVisibility,
    /// Name of the trap once it has fired.
    pub label:   Option<String>,
    pub stepped: bool,
    pub occupants: Vec<PlayerId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsView {
    pub game_number:      u64,
    pub total_rolls:      u64,
    pub traps_triggered:  u64,
    pub hidden_traps:     usize,
    pub discovered_traps: usize,
    pub total_tiles:      usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlsView {
    pub roll_enabled:     bool,
    pub new_game_enabled: bool,
    pub confirm_pending:  bool,
    pub on_cooldown:      bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinnerView {
    pub id:             PlayerId,
    pub name:           String,
    pub final_position: TileIndex,
    pub traps_hit:      u32,
    pub lucky_escapes:  u32,
}

impl GameView {
    pub fn capture(state: &GameState) -> Self {
        let moving = state.moving.map(|m| m.player_id);
        let current_id = state.current_player().id;

        let players = state
            .players
            .iter()
            .map(|p| PlayerView {
                id:            p.id,
                name:          p.name.clone(),
                color:         p.color.clone(),
                position:      p.position,
                skip_turns:    p.skip_turns,
                frozen:        p.frozen,
                traps_hit:     p.traps_hit,
                lucky_escapes: p.lucky_escapes,
                is_current:    p.id == current_id,
                is_moving:     moving == Some(p.id),
            })
            .collect();

        let tiles = state
            .board
            .tiles()
            .iter()
            .map(|t| tile_view(t, &state.players))
            .collect();

        Self {
            phase:    state.phase,
            message:  state.message.clone(),
            die_face: state.die_face,
            players,
            tiles,
            stats: StatsView {
                game_number:      state.stats.game_number,
                total_rolls:      state.stats.total_rolls,
                traps_triggered:  state.stats.total_traps_hit,
                hidden_traps:     state.board.hidden_trap_count(),
                discovered_traps: state.board.discovered_trap_count(),
                total_tiles:      state.board.len(),
            },
            controls: ControlsView {
                roll_enabled:     state.can_roll(),
                new_game_enabled: !state.turn_in_flight(),
                confirm_pending:  state.confirm_pending,
                on_cooldown:      state.cooldown,
            },
            winner: state.winner.and_then(|id| state.player(id)).map(|w| WinnerView {
                id:             w.id,
                name:           w.name.clone(),
                final_position: w.position,
                traps_hit:      w.traps_hit,
                lucky_escapes:  w.lucky_escapes,
            }),
        }
    }
}

fn tile_view(tile: &Tile, players: &[Player]) -> TileView {
    let (trap, label) = match tile.trap {
        None => (TrapVisibility::None, None),
        Some(_) if !tile.revealed => (TrapVisibility::Hidden, None),
        Some(id) => {
            let def = id.definition();
            (TrapVisibility::Revealed { rarity: def.rarity }, Some(def.name.to_string()))
        }
    };
    TileView {
        index: tile.index,
        trap,
        label,
        stepped: tile.stepped,
        occupants: players
            .iter()
            .filter(|p| p.position == tile.index)
            .map(|p| p.id)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{board::Board, config::GameConfig, trap::TrapId};

    fn state() -> GameState {
        GameState::new(Player::roster(&GameConfig::default().players), Board::empty(50))
    }

    #[test]
    fn hidden_traps_stay_anonymous() {
        let mut s = state();
        s.board.set_trap(10, Some(TrapId::BlackHole));
        s.board.set_trap(20, Some(TrapId::IceAge));
        s.board.reveal(20);
        let view = GameView::capture(&s);

        assert_eq!(view.tiles[10].trap, TrapVisibility::Hidden);
        assert_eq!(view.tiles[10].label, None);
        assert_eq!(view.tiles[20].trap, TrapVisibility::Revealed { rarity: Rarity::Rare });
        assert_eq!(view.stats.hidden_traps, 1);
        assert_eq!(view.stats.discovered_traps, 1);
        assert_eq!(view.stats.total_tiles, 50);
    }

    #[test]
    fn everyone_starts_on_tile_zero() {
        let view = GameView::capture(&state());
        assert_eq!(view.tiles[0].occupants, vec![1, 2, 3, 4]);
        assert!(view.players[0].is_current);
        assert!(view.controls.roll_enabled);
        assert!(view.winner.is_none());
    }

    #[test]
    fn winner_summary() {
        let mut s = state();
        s.players[2].position = 49;
        s.players[2].traps_hit = 2;
        s.winner = Some(3);
        s.phase = TurnPhase::Won;
        let view = GameView::capture(&s);
        let winner = view.winner.unwrap();
        assert_eq!(winner.name, "Player 3");
        assert_eq!(winner.final_position, 49);
        assert_eq!(winner.traps_hit, 2);
        assert!(!view.controls.roll_enabled);
        assert!(view.controls.new_game_enabled);
    }
}
