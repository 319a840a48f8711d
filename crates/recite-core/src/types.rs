//! Common types for Recite
//!
//! This module contains the fundamental value types shared across the
//! read-aloud pipeline: display chunks, timed cues, the session timeline,
//! and the extracted page payload.

/// Sample rate used when generating silent audio units (48kHz - standard
/// professional audio rate). The output device may run at a different rate;
/// the engine converts at render time.
pub const SYNTH_SAMPLE_RATE: u32 = 48_000;

/// Reference speaking rate of synthesized speech, in words per minute.
/// Real speech audio is rate-scaled by `target_wpm / BASE_WPM` so that the
/// audible pace matches the requested reading speed.
pub const BASE_WPM: f64 = 160.0;

/// Default target reading speed in words per minute.
pub const DEFAULT_WPM: u32 = 220;

/// Default cap on extracted page text, in characters.
pub const DEFAULT_CHAR_CAP: usize = 4000;

/// Minimum usable input length in characters. Shorter payloads are rejected
/// before a session is created.
pub const MIN_READABLE_CHARS: usize = 50;

/// Minimum display duration for a chunk, in seconds. Applied both when
/// planning cues and when sizing silent audio, so a two-word chunk never
/// flashes past unreadably. The word-rate estimate dominates whenever it
/// exceeds this floor.
pub const MIN_CHUNK_SECS: f64 = 0.6;

/// Fixed lead-in before the first scheduled audio unit, in seconds.
/// Gives the output stream a moment to warm up before speech starts.
pub const SCHEDULE_LEAD_SECS: f64 = 0.2;

/// Smallest word-group size drawn by the chunker.
pub const MIN_CHUNK_WORDS: usize = 2;

/// Largest word-group size drawn by the chunker.
pub const MAX_CHUNK_WORDS: usize = 3;

/// A small contiguous slice of the source text, the atomic unit of display.
///
/// Chunks partition the whitespace-normalized input: joining them back with
/// single spaces reproduces the normalized word sequence exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    text: String,
    word_count: usize,
}

impl Chunk {
    /// Create a chunk from pre-split words. Empty input is a caller bug;
    /// the chunker never produces empty groups.
    pub(crate) fn from_words(words: &[&str]) -> Self {
        debug_assert!(!words.is_empty());
        Self {
            text: words.join(" "),
            word_count: words.len(),
        }
    }

    /// The display text of this chunk.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of whitespace-delimited words in this chunk.
    pub fn word_count(&self) -> usize {
        self.word_count
    }
}

/// A chunk paired with its start/end time in the playback timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    /// Start time in seconds from session start.
    pub start: f64,
    /// End time in seconds. Always greater than `start`.
    pub end: f64,
    /// Display text (the chunk's text).
    pub text: String,
}

impl Cue {
    /// Duration of this cue in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// The full ordered set of cues plus total duration for one session.
///
/// Cues are contiguous and non-overlapping: `cues[i].end == cues[i+1].start`
/// and `cues[0].start == 0`. `total` always equals the last cue's end (zero
/// for an empty timeline).
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    pub cues: Vec<Cue>,
    pub total: f64,
}

impl Timeline {
    /// Build a timeline by laying out durations back-to-back from zero.
    pub fn from_durations<I>(texts_and_durations: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut cues = Vec::new();
        let mut t = 0.0;
        for (text, dur) in texts_and_durations {
            cues.push(Cue {
                start: t,
                end: t + dur,
                text,
            });
            t += dur;
        }
        Self { cues, total: t }
    }

    /// Number of cues.
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// True if the timeline holds no cues.
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

/// Extracted page text handed to the reader by a text source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePayload {
    /// Where the text came from (file path, URL, "stdin").
    pub url: String,
    /// Page title, shown while reading.
    pub title: String,
    /// Extracted text, already capped to the configured character limit.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_from_durations_is_contiguous() {
        let tl = Timeline::from_durations(vec![
            ("a b".to_string(), 0.8),
            ("c d".to_string(), 1.2),
            ("e".to_string(), 0.6),
        ]);

        assert_eq!(tl.len(), 3);
        assert_eq!(tl.cues[0].start, 0.0);
        for pair in tl.cues.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(tl.total, tl.cues.last().unwrap().end);
    }

    #[test]
    fn empty_timeline_has_zero_total() {
        let tl = Timeline::from_durations(Vec::new());
        assert!(tl.is_empty());
        assert_eq!(tl.total, 0.0);
    }

    #[test]
    fn cue_duration() {
        let cue = Cue {
            start: 1.0,
            end: 2.5,
            text: "hello there".to_string(),
        };
        assert!((cue.duration() - 1.5).abs() < 1e-12);
    }
}
