//! Audio source resolution - real speech or paced silence per chunk
//!
//! Each chunk gets exactly one [`AudioUnit`], positionally aligned with its
//! cue. A provider failure never drops a unit: the fallback stage
//! unconditionally substitutes silence sized to the chunk's provisional cue
//! duration. Audio is a best-effort enhancement; subtitles are the
//! guaranteed output.

mod decode;
mod elevenlabs;
mod error;

pub use decode::decode_clip;
pub use elevenlabs::ElevenLabsProvider;
pub use error::{SynthesisError, SynthesisResult};

use crate::types::{Chunk, Timeline, SYNTH_SAMPLE_RATE};

/// Decoded speech audio for one chunk: mono f32 PCM at a known rate.
#[derive(Debug, Clone)]
pub struct SpeechClip {
    /// Mono samples in [-1.0, 1.0].
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

/// A source of synthesized speech.
///
/// Implementations perform the full request-and-decode round trip; any
/// failure (network, status, decode) surfaces as a [`SynthesisError`].
/// Single attempt per chunk - retry policy is not a provider concern.
pub trait SpeechProvider {
    fn synthesize(&self, text: &str) -> SynthesisResult<SpeechClip>;
}

/// The audio (real or silent) backing one chunk.
#[derive(Debug, Clone)]
pub struct AudioUnit {
    /// Mono samples in [-1.0, 1.0]. All zeros for silent units.
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// True when the samples came from the synthesis provider.
    pub is_real: bool,
}

impl AudioUnit {
    fn real(clip: SpeechClip) -> Self {
        Self {
            samples: clip.samples,
            sample_rate: clip.sample_rate,
            is_real: true,
        }
    }

    /// A silent unit of the given duration at [`SYNTH_SAMPLE_RATE`].
    pub fn silence(duration_secs: f64) -> Self {
        let n = (duration_secs * f64::from(SYNTH_SAMPLE_RATE)).round() as usize;
        Self {
            samples: vec![0.0; n],
            sample_rate: SYNTH_SAMPLE_RATE,
            is_real: false,
        }
    }

    /// Native duration of this unit in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }
}

/// Resolve one audio unit per chunk, in chunk order.
///
/// Resolution is sequential: each provider request completes (or fails and
/// falls back) before the next begins. With no provider, every unit is
/// silence sized to its provisional cue duration - the same path taken for
/// any per-chunk failure.
///
/// `provisional` must be the planner's timeline for the same chunks; the
/// returned units are aligned 1:1 with both.
pub fn resolve_units(
    chunks: &[Chunk],
    provisional: &Timeline,
    provider: Option<&dyn SpeechProvider>,
) -> Vec<AudioUnit> {
    debug_assert_eq!(chunks.len(), provisional.len());

    chunks
        .iter()
        .zip(&provisional.cues)
        .enumerate()
        .map(|(index, (chunk, cue))| {
            let attempted = provider.map(|p| p.synthesize(chunk.text()));
            match attempted {
                Some(Ok(clip)) if !clip.samples.is_empty() => AudioUnit::real(clip),
                Some(Ok(_)) => {
                    log::warn!("Chunk {}: provider returned empty audio, using silence", index);
                    AudioUnit::silence(cue.duration())
                }
                Some(Err(e)) => {
                    log::warn!("Chunk {}: synthesis failed ({}), using silence", index, e);
                    AudioUnit::silence(cue.duration())
                }
                None => AudioUnit::silence(cue.duration()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::chunk_text;
    use crate::planner::plan;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;

    /// Provider that fails on a scripted set of chunk indices.
    struct ScriptedProvider {
        fail_on: Vec<usize>,
        calls: Cell<usize>,
    }

    impl ScriptedProvider {
        fn failing_on(fail_on: Vec<usize>) -> Self {
            Self {
                fail_on,
                calls: Cell::new(0),
            }
        }
    }

    impl SpeechProvider for ScriptedProvider {
        fn synthesize(&self, _text: &str) -> SynthesisResult<SpeechClip> {
            let index = self.calls.get();
            self.calls.set(index + 1);
            if self.fail_on.contains(&index) {
                Err(SynthesisError::BadStatus(500))
            } else {
                Ok(SpeechClip {
                    samples: vec![0.1; 24_000],
                    sample_rate: 48_000,
                })
            }
        }
    }

    fn chunks_and_plan(text: &str) -> (Vec<crate::types::Chunk>, Timeline) {
        let mut rng = StdRng::seed_from_u64(11);
        let chunks = chunk_text(text, 2, 3, &mut rng);
        let tl = plan(&chunks, 220);
        (chunks, tl)
    }

    #[test]
    fn alignment_holds_without_provider() {
        let (chunks, tl) = chunks_and_plan("alpha beta gamma delta epsilon zeta");
        let units = resolve_units(&chunks, &tl, None);

        assert_eq!(units.len(), chunks.len());
        assert_eq!(units.len(), tl.len());
        assert!(units.iter().all(|u| !u.is_real));
    }

    #[test]
    fn alignment_holds_under_total_failure() {
        let (chunks, tl) = chunks_and_plan("one two three four five six seven eight nine");
        let provider = ScriptedProvider::failing_on((0..chunks.len()).collect());
        let units = resolve_units(&chunks, &tl, Some(&provider));

        assert_eq!(units.len(), chunks.len());
        assert!(units.iter().all(|u| !u.is_real));
    }

    #[test]
    fn middle_failure_degrades_only_that_unit() {
        let text = "aa bb cc dd ee ff gg hh";
        let mut rng = StdRng::seed_from_u64(2);
        let chunks = chunk_text(text, 2, 3, &mut rng);
        assert!(chunks.len() >= 3);
        let tl = plan(&chunks, 220);

        let provider = ScriptedProvider::failing_on(vec![1]);
        let units = resolve_units(&chunks, &tl, Some(&provider));

        assert_eq!(units.len(), chunks.len());
        assert!(units[0].is_real);
        assert!(!units[1].is_real);
        assert!(units[2].is_real);
    }

    #[test]
    fn silent_unit_duration_matches_provisional_cue() {
        let (chunks, tl) = chunks_and_plan("the quick brown fox jumps over");
        let units = resolve_units(&chunks, &tl, None);

        for (unit, cue) in units.iter().zip(&tl.cues) {
            // Rounding to whole samples at 48kHz is well under a millisecond.
            assert!((unit.duration_secs() - cue.duration()).abs() < 1e-4);
        }
    }

    #[test]
    fn silence_is_actually_silent() {
        let unit = AudioUnit::silence(0.5);
        assert!(!unit.is_real);
        assert_eq!(unit.samples.len(), 24_000);
        assert!(unit.samples.iter().all(|&s| s == 0.0));
    }
}
