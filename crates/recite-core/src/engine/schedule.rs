//! Scheduling - back-to-back audio program and corrected cue timeline
//!
//! Real speech audio has a provider-determined natural duration that rarely
//! matches the requested WPM. Scheduling rate-scales real units by
//! `target_wpm / BASE_WPM` and rewrites every cue boundary from the actual
//! scheduled durations, so subtitles stay in lockstep with what is audible.
//! Silent units are already paced to the target rate and play unscaled.

use crate::synth::AudioUnit;
use crate::types::{Timeline, BASE_WPM, SCHEDULE_LEAD_SECS};

/// One audio unit placed in the program, with its playback rate.
#[derive(Debug)]
pub struct ScheduledUnit {
    /// Mono source samples.
    pub samples: Vec<f32>,
    /// Native sample rate of `samples` in Hz.
    pub source_rate: u32,
    /// Playback-rate multiplier: the speed factor for real speech,
    /// 1.0 for silence.
    pub rate: f64,
}

impl ScheduledUnit {
    /// Duration this unit occupies in the schedule, in seconds.
    pub fn planned_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.source_rate) / self.rate
    }
}

/// An ordered, back-to-back sequence of scheduled units.
#[derive(Debug)]
pub struct Program {
    /// Units in chunk order.
    pub units: Vec<ScheduledUnit>,
    /// Engine lead-in silence before the first unit, in seconds.
    pub lead_secs: f64,
    /// Sum of planned unit durations (excludes the lead-in), in seconds.
    pub total_secs: f64,
}

/// Ratio of the target reading rate to the reference speech rate.
pub fn speed_factor(wpm: u32) -> f64 {
    f64::from(wpm.max(1)) / BASE_WPM
}

/// Schedule `units` back-to-back and rewrite the cue timeline to match.
///
/// `provisional` supplies the cue texts; its timings are superseded by the
/// returned timeline, which is authoritative for the display loop. Units
/// and cues must be positionally aligned (one per chunk).
pub fn schedule(
    units: Vec<AudioUnit>,
    provisional: &Timeline,
    wpm: u32,
) -> (Program, Timeline) {
    debug_assert_eq!(units.len(), provisional.len());

    let factor = speed_factor(wpm);

    let scheduled: Vec<ScheduledUnit> = units
        .into_iter()
        .map(|unit| ScheduledUnit {
            rate: if unit.is_real { factor } else { 1.0 },
            source_rate: unit.sample_rate,
            samples: unit.samples,
        })
        .collect();

    let corrected = Timeline::from_durations(
        provisional
            .cues
            .iter()
            .zip(&scheduled)
            .map(|(cue, unit)| (cue.text.clone(), unit.planned_secs())),
    );

    let program = Program {
        total_secs: corrected.total,
        lead_secs: SCHEDULE_LEAD_SECS,
        units: scheduled,
    };

    (program, corrected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::AudioUnit;
    use crate::types::Cue;

    const EPSILON: f64 = 1e-9;

    fn real_unit(secs: f64, rate: u32) -> AudioUnit {
        AudioUnit {
            samples: vec![0.1; (secs * f64::from(rate)) as usize],
            sample_rate: rate,
            is_real: true,
        }
    }

    fn provisional_for(n: usize) -> Timeline {
        Timeline {
            cues: (0..n)
                .map(|i| Cue {
                    start: i as f64,
                    end: i as f64 + 1.0,
                    text: format!("chunk {}", i),
                })
                .collect(),
            total: n as f64,
        }
    }

    #[test]
    fn real_units_are_rate_scaled() {
        // 320 WPM over a 160 WPM reference doubles playback speed, halving
        // the scheduled duration.
        let units = vec![real_unit(1.0, 48_000)];
        let (program, tl) = schedule(units, &provisional_for(1), 320);

        assert!((program.units[0].rate - 2.0).abs() < EPSILON);
        assert!((program.units[0].planned_secs() - 0.5).abs() < EPSILON);
        assert!((tl.cues[0].duration() - 0.5).abs() < EPSILON);
    }

    #[test]
    fn silent_units_keep_their_generated_duration() {
        let units = vec![AudioUnit::silence(0.8)];
        let (program, tl) = schedule(units, &provisional_for(1), 320);

        assert!((program.units[0].rate - 1.0).abs() < EPSILON);
        assert!((tl.cues[0].duration() - 0.8).abs() < 1e-4);
    }

    #[test]
    fn corrected_timeline_is_contiguous_and_supersedes_provisional() {
        let units = vec![
            real_unit(2.0, 44_100),
            AudioUnit::silence(0.7),
            real_unit(0.5, 48_000),
        ];
        let (program, tl) = schedule(units, &provisional_for(3), 220);

        assert_eq!(tl.len(), 3);
        assert_eq!(tl.cues[0].start, 0.0);
        for pair in tl.cues.windows(2) {
            assert!((pair[0].end - pair[1].start).abs() < EPSILON);
        }
        assert!((tl.total - tl.cues.last().unwrap().end).abs() < EPSILON);
        assert!((program.total_secs - tl.total).abs() < EPSILON);

        // Cue texts carried over from the provisional timeline in order.
        assert_eq!(tl.cues[1].text, "chunk 1");
    }

    #[test]
    fn mixed_program_duration_accounts_for_rates() {
        // 1.0s of real speech at 220/160 = 1.375x plays in ~0.727s; the
        // 0.8s of silence is untouched.
        let units = vec![real_unit(1.0, 48_000), AudioUnit::silence(0.8)];
        let (program, _) = schedule(units, &provisional_for(2), 220);

        let expected = 1.0 / (220.0 / 160.0) + 0.8;
        assert!((program.total_secs - expected).abs() < 1e-4);
    }
}
