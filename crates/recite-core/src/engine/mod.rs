//! Playback engine - scheduling, command queue, and sample rendering
//!
//! The engine half of the synchronization core:
//! - `schedule`: turns resolved audio units into a playable [`Program`] and
//!   rewrites the cue timeline from actual scheduled durations
//! - `EngineCommand`/`command_channel`: lock-free control from the session
//!   to the audio callback thread
//! - `PlayerEngine`: renders the program on the audio thread

mod command;
mod player;
mod schedule;

pub use command::*;
pub use player::*;
pub use schedule::*;
