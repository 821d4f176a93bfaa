//! Status-line flavor text.
//!
//! Curated reaction and message lists with deterministic picks from the
//! flavor stream. Picks never touch the board or dice streams.

use crate::{
    player::Player,
    rng::StreamRng,
    trap::TrapDefinition,
};

pub struct Flavor;

impl Flavor {
    pub fn opening(player: &Player) -> String {
        format!("🎮 Let's play! {}, roll that dice!", player.name)
    }

    pub fn fresh_start(player: &Player) -> String {
        format!("🎮 Fresh start! {}, show us what you've got!", player.name)
    }

    pub fn moving(player: &Player, steps: u64) -> String {
        format!("{} rolled a {steps}! Moving...", player.name)
    }

    pub fn still_stuck(player: &Player, remaining: u32) -> String {
        if remaining > 0 {
            let plural = if remaining > 1 { "s" } else { "" };
            format!("{} is still stuck! {remaining} more turn{plural} to go...", player.name)
        } else {
            format!("{} breaks free! Next turn you can move again!", player.name)
        }
    }

    pub fn trap_hit(player: &Player, trap: &TrapDefinition, rng: &mut StreamRng) -> String {
        let reaction = Self::pick(rng, Self::hit_reactions());
        let quip = Self::pick(rng, trap.messages);
        format!("{reaction} {} hit {}! {quip}", player.name, trap.name)
    }

    pub fn safe_landing(player: &Player, rng: &mut StreamRng) -> String {
        let reaction = Self::pick(rng, Self::safe_reactions());
        let line = Self::pick(rng, Self::safe_lines());
        format!("{reaction} {}: \"{line}\"", player.name)
    }

    pub fn lucky_escape(player: &Player) -> String {
        format!("{} just barely avoided a trap! Lucky! 🍀", player.name)
    }

    pub fn next_turn(player: &Player) -> String {
        format!("{}'s turn! Roll for glory! 🎲", player.name)
    }

    pub fn victory(player: &Player, rng: &mut StreamRng) -> String {
        let reaction = Self::pick(rng, Self::win_reactions());
        format!("{reaction} {} WINS! What a legend!", player.name)
    }

    fn pick(rng: &mut StreamRng, items: &'static [&'static str]) -> &'static str {
        rng.pick(items).copied().unwrap_or_default()
    }

    fn hit_reactions() -> &'static [&'static str] {
        &["😱", "😵", "🤕", "😭", "💀"]
    }

    fn safe_reactions() -> &'static [&'static str] {
        &["😅", "😌", "🙂", "😊", "🥳"]
    }

    fn win_reactions() -> &'static [&'static str] {
        &["🎉", "🏆", "👑", "🥇", "🎊"]
    }

    fn safe_lines() -> &'static [&'static str] {
        &[
            "Phew! Safe and sound!",
            "Lucky you! No traps here!",
            "Smooth sailing! ⛵",
            "Your guardian angel is working overtime!",
            "Plot armor activated!",
            "The trap gods smile upon you today!",
        ]
    }
}
