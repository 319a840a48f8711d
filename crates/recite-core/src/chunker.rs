//! Text chunking - splits normalized text into small word groups
//!
//! Group sizes are drawn uniformly from `[min_words, max_words]` so the
//! subtitle rhythm doesn't feel mechanical. The generator is injected: tests
//! use a seeded [`rand::rngs::StdRng`] to pin exact boundaries, production
//! uses [`rand::thread_rng`].

use rand::Rng;

use crate::types::Chunk;

/// Split `text` into an ordered sequence of 2-3 word chunks.
///
/// Whitespace runs are collapsed to single spaces and the text trimmed
/// before splitting, so the chunk sequence is a strict partition of the
/// normalized word sequence: no word is skipped or duplicated, and no chunk
/// is empty. The final group may be shorter than `min_words` when fewer
/// words remain.
///
/// Empty (or all-whitespace) input yields an empty sequence.
pub fn chunk_text<R: Rng>(
    text: &str,
    min_words: usize,
    max_words: usize,
    rng: &mut R,
) -> Vec<Chunk> {
    debug_assert!(min_words >= 1 && min_words <= max_words);

    let words: Vec<&str> = text.split_whitespace().collect();
    let mut chunks = Vec::with_capacity(words.len() / min_words.max(1) + 1);

    let mut i = 0;
    while i < words.len() {
        let draw = rng.gen_range(min_words..=max_words);
        let take = draw.min(words.len() - i);
        chunks.push(Chunk::from_words(&words[i..i + take]));
        i += take;
    }

    chunks
}
