//! Program playback on the audio thread
//!
//! The [`PlayerEngine`] is owned exclusively by the audio callback: commands
//! arrive through the lock-free queue, state goes out through atomics.
//! Variable-speed playback uses fractional-position reads with linear
//! interpolation, which covers both the WPM rate scaling of real speech and
//! the provider-rate to device-rate conversion in a single step.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

use super::command::{CommandReceiver, EngineCommand};
use super::schedule::Program;

/// Playback state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Stopped,
    Playing,
}

/// Lock-free engine state for control-thread reads.
///
/// The audio thread writes these atomics whenever state changes; readers
/// only need visibility, so all operations use `Ordering::Relaxed`.
pub struct EngineAtomics {
    /// Frames rendered while playing (output-rate frames).
    pub frames_played: AtomicU64,
    /// Playback state: 0=Stopped, 1=Playing
    pub state: AtomicU8,
}

impl EngineAtomics {
    pub fn new() -> Self {
        Self {
            frames_played: AtomicU64::new(0),
            state: AtomicU8::new(0),
        }
    }

    /// Check if playing (lock-free)
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state.load(Ordering::Relaxed) == 1
    }

    /// Frames rendered so far (lock-free)
    #[inline]
    pub fn frames_played(&self) -> u64 {
        self.frames_played.load(Ordering::Relaxed)
    }
}

impl Default for EngineAtomics {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders a scheduled [`Program`] into mono output frames.
pub struct PlayerEngine {
    /// Loaded program (None until the first session schedules one)
    program: Option<Program>,
    /// Output device sample rate in Hz
    output_rate: u32,
    /// Lead-in silence frames still to emit before unit 0
    lead_frames: usize,
    /// Index of the unit under the playhead
    unit_index: usize,
    /// Fractional read position within the current unit's samples
    src_pos: f64,
    /// Current playback state
    state: PlayState,
    /// Running frame counter mirrored into the atomics
    frames_played: u64,
    /// Lock-free state for control-thread reads
    atomics: Arc<EngineAtomics>,
}

impl PlayerEngine {
    /// Create an engine rendering at the given device rate.
    pub fn new(output_rate: u32) -> Self {
        Self {
            program: None,
            output_rate,
            lead_frames: 0,
            unit_index: 0,
            src_pos: 0.0,
            state: PlayState::Stopped,
            frames_played: 0,
            atomics: Arc::new(EngineAtomics::new()),
        }
    }

    /// Get a reference to the lock-free atomic state.
    pub fn atomics(&self) -> Arc<EngineAtomics> {
        Arc::clone(&self.atomics)
    }

    /// Current playback state.
    pub fn state(&self) -> PlayState {
        self.state
    }

    #[inline]
    fn sync_state_atomic(&self) {
        let value = match self.state {
            PlayState::Stopped => 0,
            PlayState::Playing => 1,
        };
        self.atomics.state.store(value, Ordering::Relaxed);
    }

    #[inline]
    fn sync_frames_atomic(&self) {
        self.atomics
            .frames_played
            .store(self.frames_played, Ordering::Relaxed);
    }

    /// Process all pending commands. Called at the start of each callback.
    pub fn process_commands(&mut self, rx: &mut CommandReceiver) {
        while let Some(cmd) = rx.pop() {
            match cmd {
                EngineCommand::Load(program) => self.load(*program),
                EngineCommand::Play => self.play(),
                EngineCommand::Pause => self.pause(),
            }
        }
    }

    /// Replace the program and reset the playhead. Supersedes any prior
    /// session unconditionally.
    fn load(&mut self, program: Program) {
        self.lead_frames =
            (program.lead_secs * f64::from(self.output_rate)).round() as usize;
        self.program = Some(program);
        self.unit_index = 0;
        self.src_pos = 0.0;
        self.frames_played = 0;
        self.state = PlayState::Stopped;
        self.sync_state_atomic();
        self.sync_frames_atomic();
    }

    /// Start or resume playback. No-op without a program.
    fn play(&mut self) {
        if self.program.is_some() {
            self.state = PlayState::Playing;
            self.sync_state_atomic();
        }
    }

    /// Pause playback, freezing the playhead. Idempotent.
    fn pause(&mut self) {
        self.state = PlayState::Stopped;
        self.sync_state_atomic();
    }

    /// Fill `output` with mono frames at the device rate.
    ///
    /// Outputs silence while stopped or past the end of the program. When
    /// the last unit is exhausted the engine stops itself.
    pub fn render(&mut self, output: &mut [f32]) {
        output.fill(0.0);

        let Some(program) = &self.program else {
            return;
        };
        if self.state == PlayState::Stopped {
            return;
        }

        let out_rate = f64::from(self.output_rate);
        let mut finished = false;

        for sample in output.iter_mut() {
            if self.lead_frames > 0 {
                self.lead_frames -= 1;
                continue;
            }

            // Skip any exhausted units (zero-length units are legal).
            while let Some(unit) = program.units.get(self.unit_index) {
                if (self.src_pos as usize) < unit.samples.len() {
                    break;
                }
                self.unit_index += 1;
                self.src_pos = 0.0;
            }

            let Some(unit) = program.units.get(self.unit_index) else {
                finished = true;
                break;
            };

            let i0 = self.src_pos as usize;
            let i1 = (i0 + 1).min(unit.samples.len() - 1);
            let frac = (self.src_pos - i0 as f64) as f32;
            *sample = unit.samples[i0] + (unit.samples[i1] - unit.samples[i0]) * frac;

            self.src_pos += unit.rate * f64::from(unit.source_rate) / out_rate;
        }

        self.frames_played += output.len() as u64;
        self.sync_frames_atomic();

        if finished {
            self.state = PlayState::Stopped;
            self.sync_state_atomic();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::command::command_channel;
    use crate::engine::schedule::ScheduledUnit;

    const RATE: u32 = 48_000;

    fn program_with(units: Vec<ScheduledUnit>) -> Program {
        let total_secs = units.iter().map(|u| u.planned_secs()).sum();
        Program {
            units,
            lead_secs: 0.0,
            total_secs,
        }
    }

    fn ramp_unit(len: usize, rate: f64) -> ScheduledUnit {
        ScheduledUnit {
            samples: (0..len).map(|i| i as f32).collect(),
            source_rate: RATE,
            rate,
        }
    }

    fn engine_with(program: Program) -> PlayerEngine {
        let mut engine = PlayerEngine::new(RATE);
        let (mut tx, mut rx) = command_channel();
        tx.send(EngineCommand::Load(Box::new(program))).unwrap();
        tx.send(EngineCommand::Play).unwrap();
        engine.process_commands(&mut rx);
        engine
    }

    #[test]
    fn renders_samples_at_unit_rate() {
        let mut engine = engine_with(program_with(vec![ramp_unit(8, 1.0)]));

        let mut out = [0.0f32; 4];
        engine.render(&mut out);
        assert_eq!(out, [0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn double_rate_steps_two_source_samples_per_frame() {
        let mut engine = engine_with(program_with(vec![ramp_unit(8, 2.0)]));

        let mut out = [0.0f32; 4];
        engine.render(&mut out);
        assert_eq!(out, [0.0, 2.0, 4.0, 6.0]);
    }

    #[test]
    fn stopped_engine_outputs_silence_and_holds_position() {
        let mut engine = engine_with(program_with(vec![ramp_unit(8, 1.0)]));
        let (mut tx, mut rx) = command_channel();

        let mut out = [0.0f32; 2];
        engine.render(&mut out);
        assert_eq!(out, [0.0, 1.0]);

        tx.send(EngineCommand::Pause).unwrap();
        engine.process_commands(&mut rx);
        engine.render(&mut out);
        assert_eq!(out, [0.0, 0.0]);

        // Resume picks up exactly where the playhead froze.
        tx.send(EngineCommand::Play).unwrap();
        engine.process_commands(&mut rx);
        engine.render(&mut out);
        assert_eq!(out, [2.0, 3.0]);
    }

    #[test]
    fn crosses_unit_boundary_in_order() {
        let first = ScheduledUnit {
            samples: vec![1.0, 1.0],
            source_rate: RATE,
            rate: 1.0,
        };
        let second = ScheduledUnit {
            samples: vec![2.0, 2.0],
            source_rate: RATE,
            rate: 1.0,
        };
        let mut engine = engine_with(program_with(vec![first, second]));

        let mut out = [0.0f32; 4];
        engine.render(&mut out);
        assert_eq!(out, [1.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn stops_after_last_unit() {
        let mut engine = engine_with(program_with(vec![ramp_unit(4, 1.0)]));

        let mut out = [0.0f32; 8];
        engine.render(&mut out);
        assert_eq!(engine.state(), PlayState::Stopped);
        assert!(!engine.atomics().is_playing());
        // Tail of the buffer past the program end is silent.
        assert_eq!(&out[4..], &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn lead_in_emits_silence_first() {
        let mut program = program_with(vec![ramp_unit(4, 1.0)]);
        program.lead_secs = 2.0 / f64::from(RATE); // two frames of lead
        let mut engine = engine_with(program);

        let mut out = [9.9f32; 4];
        engine.render(&mut out);
        assert_eq!(out, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn play_without_program_is_a_no_op() {
        let mut engine = PlayerEngine::new(RATE);
        let (mut tx, mut rx) = command_channel();
        tx.send(EngineCommand::Play).unwrap();
        engine.process_commands(&mut rx);
        assert_eq!(engine.state(), PlayState::Stopped);
    }
}
