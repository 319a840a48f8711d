//! Cue planning - provisional timeline from chunk word counts
//!
//! The provisional timeline exists to size silent audio buffers before real
//! speech durations are known; the scheduler rewrites it from actual
//! scheduled durations once audio is resolved.

use crate::types::{Chunk, Timeline, MIN_CHUNK_SECS};

/// Words per second for a target reading speed. The rate is floored at
/// 1 WPM so a zero or garbage setting cannot produce infinite durations.
pub fn words_per_second(wpm: u32) -> f64 {
    f64::from(wpm.max(1)) / 60.0
}

/// Provisional display duration for a chunk at the given rate, in seconds.
pub fn chunk_duration_secs(word_count: usize, wpm: u32) -> f64 {
    (word_count as f64 / words_per_second(wpm)).max(MIN_CHUNK_SECS)
}

/// Lay out a provisional timeline for `chunks` at `wpm`, back-to-back from
/// zero.
pub fn plan(chunks: &[Chunk], wpm: u32) -> Timeline {
    Timeline::from_durations(chunks.iter().map(|chunk| {
        (
            chunk.text().to_string(),
            chunk_duration_secs(chunk.word_count(), wpm),
        )
    }))
}
