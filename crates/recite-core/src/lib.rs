//! Recite Core - playback synchronization engine for paced read-aloud
//!
//! Turns page text into a timed sequence of short subtitle phrases backed by
//! an audio timeline (synthesized speech, or silence paced to a target
//! reading speed). The pipeline is strictly one-way:
//!
//! text -> chunks -> provisional cues -> audio units -> corrected cues +
//! scheduled audio -> transport-driven display.

pub mod audio;
pub mod chunker;
pub mod engine;
pub mod handoff;
pub mod planner;
pub mod session;
pub mod source;
pub mod synth;
pub mod ticker;
pub mod transport;
pub mod types;

pub use types::*;
