//! Plain-text rendering of a GameView for the interactive terminal mode.

use traptrack_core::{
    state::TurnPhase,
    trap::Rarity,
    view::{GameView, TileView, TrapVisibility},
};

const ROW_WIDTH: usize = 10;

pub fn header(view: &GameView) -> String {
    let s = &view.stats;
    format!(
        "🎮 TRAP TRACK  Game #{} • {} rolls • {} traps triggered",
        s.game_number, s.total_rolls, s.traps_triggered
    )
}

/// Five rows of ten tiles. Occupied tiles show the first player's number.
pub fn board(view: &GameView) -> String {
    let mut out = String::new();
    for row in view.tiles.chunks(ROW_WIDTH) {
        let line: Vec<String> = row.iter().map(|t| tile_glyph(t, view.tiles.len())).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    let s = &view.stats;
    out.push_str(&format!(
        "Hidden traps: {} • Discovered: {} • Total tiles: {}",
        s.hidden_traps, s.discovered_traps, s.total_tiles
    ));
    out
}

fn tile_glyph(tile: &TileView, tile_count: usize) -> String {
    if let Some(id) = tile.occupants.first() {
        let extra = if tile.occupants.len() > 1 { "+" } else { " " };
        return format!("{id}{extra}");
    }
    let glyph = match tile.trap {
        TrapVisibility::Revealed { rarity: Rarity::Common }    => "c",
        TrapVisibility::Revealed { rarity: Rarity::Rare }      => "R",
        TrapVisibility::Revealed { rarity: Rarity::Legendary } => "☠",
        TrapVisibility::Hidden                                 => "▒",
        TrapVisibility::None if tile.index == 0                => "S",
        TrapVisibility::None if tile.index + 1 == tile_count   => "F",
        TrapVisibility::None if tile.stepped                   => "·",
        TrapVisibility::None                                   => ".",
    };
    format!("{glyph} ")
}

pub fn players(view: &GameView) -> String {
    view.players
        .iter()
        .map(|p| {
            let marker = if p.is_current { "▶" } else { " " };
            let mut badges = Vec::new();
            if p.skip_turns > 0 {
                badges.push(format!("⏸️ skip {}", p.skip_turns));
            }
            if p.frozen {
                badges.push("🧊".to_string());
            }
            if p.traps_hit > 0 {
                badges.push(format!("🪤 {} traps", p.traps_hit));
            }
            if p.lucky_escapes > 0 {
                badges.push(format!("🍀 {} lucky", p.lucky_escapes));
            }
            format!(
                "{marker} {} ({}) 📍 {}/{}  {}",
                p.name,
                p.color,
                p.position + 1,
                view.stats.total_tiles,
                badges.join(" ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn controls(view: &GameView) -> String {
    let c = &view.controls;
    if c.confirm_pending {
        return "Hold up! 🛑 Start a new game and lose this one? [y] yes  [c] cancel".into();
    }
    if view.winner.is_some() {
        return "[n] play again  [q] quit".into();
    }
    let roll = match view.phase {
        TurnPhase::Rolling => "🎲 Rolling...",
        TurnPhase::Moving => "🏃 Moving...",
        _ if c.on_cooldown => "⏳ Wait...",
        _ if c.roll_enabled => "[r] 🎲 ROLL DICE!",
        _ => "…",
    };
    let new_game = if c.new_game_enabled { "[n] new game" } else { "" };
    format!("{roll}  {new_game}  [q] quit")
}

pub fn winner(view: &GameView) -> Option<String> {
    let w = view.winner.as_ref()?;
    Some(format!(
        "🏆 {} WINS! 🎯 Final position: {}/{} • 🪤 Traps hit: {} • 🍀 Lucky escapes: {}",
        w.name,
        w.final_position + 1,
        view.stats.total_tiles,
        w.traps_hit,
        w.lucky_escapes
    ))
}

pub fn screen(view: &GameView) -> String {
    let mut parts = vec![
        header(view),
        board(view),
        players(view),
        format!("🎲 {}   {}", view.die_face, view.message),
    ];
    if let Some(w) = winner(view) {
        parts.push(w);
    }
    parts.push(controls(view));
    parts.join("\n\n")
}
