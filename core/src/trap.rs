//! The trap catalog.
//!
//! Static, read-only. Tiles hold a `TrapId`; everything else about a trap
//! is looked up here. Effects are plain data interpreted by
//! `TrapEffect::apply`, which is pure and returns only the fields it
//! changes.

use crate::player::{Player, PlayerUpdate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
}

/// Order matches `CATALOG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrapId {
    BananaPeel,
    QuicksandDoom,
    IceAge,
    MegaPitfall,
    TimeWarp,
    BlackHole,
}

impl TrapId {
    pub fn definition(self) -> &'static TrapDefinition {
        &CATALOG[self as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrapEffect {
    /// Move back, never past the start tile.
    StepBack { tiles: usize },
    AddSkips { turns: u32 },
    /// Sets the frozen flag as well as adding skips.
    Freeze { turns: u32 },
    ReturnToStart,
}

impl TrapEffect {
    pub fn apply(&self, player: &Player) -> PlayerUpdate {
        match *self {
            Self::StepBack { tiles } => PlayerUpdate {
                position: Some(player.position.saturating_sub(tiles)),
                ..Default::default()
            },
            Self::AddSkips { turns } => PlayerUpdate {
                skip_turns: Some(player.skip_turns.saturating_add(turns)),
                ..Default::default()
            },
            Self::Freeze { turns } => PlayerUpdate {
                frozen: Some(true),
                skip_turns: Some(player.skip_turns.saturating_add(turns)),
                ..Default::default()
            },
            Self::ReturnToStart => PlayerUpdate {
                position: Some(0),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TrapDefinition {
    pub id:          TrapId,
    pub name:        &'static str,
    pub description: &'static str,
    pub rarity:      Rarity,
    pub effect:      TrapEffect,
    pub messages:    &'static [&'static str],
}

pub static CATALOG: [TrapDefinition; 6] = [
    TrapDefinition {
        id: TrapId::BananaPeel,
        name: "🍌 Banana Peel",
        description: "Classic slip! Back 3 steps",
        rarity: Rarity::Common,
        effect: TrapEffect::StepBack { tiles: 3 },
        messages: &[
            "Whoops! Should've watched where you were going!",
            "Mario Kart flashbacks intensify...",
            "The banana strikes again! 🍌",
        ],
    },
    TrapDefinition {
        id: TrapId::QuicksandDoom,
        name: "🏜️ Quicksand of Doom",
        description: "You're stuck! Skip next turn",
        rarity: Rarity::Common,
        effect: TrapEffect::AddSkips { turns: 1 },
        messages: &[
            "Don't panic! Wait, actually, panic a little...",
            "Time to practice your patience!",
            "Quicksand: 1, You: 0",
        ],
    },
    TrapDefinition {
        id: TrapId::IceAge,
        name: "🧊 Ice Age Trap",
        description: "Frozen solid! Skip 2 turns",
        rarity: Rarity::Rare,
        effect: TrapEffect::Freeze { turns: 2 },
        messages: &[
            "Brrr! Time to chill out... literally",
            "Frozen like a popsicle! 🧊",
            "Ice to meet you... get it? ICE to meet you!",
        ],
    },
    TrapDefinition {
        id: TrapId::MegaPitfall,
        name: "🕳️ The Mega Pitfall",
        description: "OUCH! Back 8 steps",
        rarity: Rarity::Rare,
        effect: TrapEffect::StepBack { tiles: 8 },
        messages: &[
            "That's gonna leave a mark!",
            "Gravity: still working perfectly!",
            "Hope you enjoyed the scenic route back!",
        ],
    },
    TrapDefinition {
        id: TrapId::TimeWarp,
        name: "⏰ Time Warp Trap",
        description: "Lost in time! Skip 3 turns",
        rarity: Rarity::Rare,
        effect: TrapEffect::AddSkips { turns: 3 },
        messages: &[
            "Welcome to the time-out dimension!",
            "Time is a flat circle... and you're stuck in it",
            "See you in a few turns! ⏰",
        ],
    },
    TrapDefinition {
        id: TrapId::BlackHole,
        name: "🌑 Black Hole",
        description: "LEGENDARY! Back to start!",
        rarity: Rarity::Legendary,
        effect: TrapEffect::ReturnToStart,
        messages: &[
            "YIKES! Back to square one!",
            "The universe has spoken... and it said 'NOPE!'",
            "Achievement Unlocked: Ultimate Failure! 🏆",
        ],
    },
];

/// Every trap of one tier, in catalog order.
pub fn by_rarity(rarity: Rarity) -> Vec<TrapId> {
    CATALOG
        .iter()
        .filter(|def| def.rarity == rarity)
        .map(|def| def.id)
        .collect()
}
