//! TrapTrack core: board generation, the turn sequencer, and the trap
//! catalog behind a single `GameEngine`. No I/O, no wall clock.

pub mod board;
pub mod clock;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod flavor;
pub mod player;
pub mod rng;
pub mod scheduler;
pub mod sequencer;
pub mod state;
pub mod trap;
pub mod types;
pub mod view;
