//! Simulated game clock. Owns elapsed time and speed control.
//!
//! Nothing in the core reads wall-clock time. Front-ends translate real
//! elapsed time into `advance` calls; tests drive it directly.

use crate::types::Millis;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameClock {
    pub now:   Millis,
    pub speed: GameSpeed,
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            now: 0,
            speed: GameSpeed::Normal,
        }
    }

    /// Jump forward to `at`. Time never runs backwards.
    pub fn advance_to(&mut self, at: Millis) -> Millis {
        if at > self.now {
            self.now = at;
        }
        self.now
    }

    pub fn set_speed(&mut self, speed: GameSpeed) {
        self.speed = speed;
    }

    /// Game milliseconds that elapse over `real_ms` real milliseconds.
    pub fn scale_real(&self, real_ms: Millis) -> Millis {
        real_ms.saturating_mul(self.speed.multiplier())
    }
}

impl Default for GameClock {
    fn default() -> Self { Self::new() }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameSpeed {
    Normal,  // animations at their authored pace
    Fast,    // 4x, for impatient humans
    Turbo,   // 20x, watching autoplay
}

impl GameSpeed {
    pub fn multiplier(&self) -> u64 {
        match self {
            Self::Normal => 1,
            Self::Fast   => 4,
            Self::Turbo  => 20,
        }
    }
}
