//! Shared primitive types used across the entire game.

/// Simulated time in milliseconds since the engine was created.
pub type Millis = u64;

/// Stable player identifier. Player 1 is id 1.
pub type PlayerId = u32;

/// Index of a tile on the track, 0-based.
pub type TileIndex = usize;

/// Default number of tiles on the track.
pub const DEFAULT_TILE_COUNT: usize = 50;

/// Faces on the die.
pub const DIE_FACES: u64 = 6;
