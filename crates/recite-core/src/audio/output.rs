//! CPAL output backend
//!
//! Single stereo output stream. The audio callback owns the
//! [`PlayerEngine`] exclusively; the session controls it through the
//! lock-free command queue and reads state through atomics.

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream, StreamConfig};

use super::error::{AudioError, AudioResult};
use crate::engine::{command_channel, CommandReceiver, CommandSender, EngineAtomics, PlayerEngine};

/// Preferred output sample rate (matches generated silence, avoiding
/// conversion in the all-silent case).
const PREFERRED_SAMPLE_RATE: u32 = 48_000;

/// Pre-allocated render buffer capacity in frames. Covers common device
/// callback sizes so the audio thread never allocates.
const MAX_BUFFER_FRAMES: usize = 8192;

/// Result of starting the audio system.
///
/// Contains the handles and channels the session needs.
pub struct AudioSystemResult {
    /// Handle keeping the stream alive (drop to stop audio)
    pub handle: AudioHandle,
    /// Command sender for the control thread (lock-free)
    pub command_sender: CommandSender,
    /// Engine atomics for lock-free state reads
    pub atomics: Arc<EngineAtomics>,
    /// Negotiated output sample rate
    pub sample_rate: u32,
}

/// Handle to the active output stream. Drop this to stop audio.
pub struct AudioHandle {
    _stream: Stream,
    sample_rate: u32,
}

impl AudioHandle {
    /// Sample rate of the output stream.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

/// State owned by the audio callback.
struct AudioCallbackState {
    engine: PlayerEngine,
    command_rx: CommandReceiver,
    /// Scratch mono buffer, pre-allocated to avoid allocation in the callback
    mono: Vec<f32>,
}

impl AudioCallbackState {
    fn new(engine: PlayerEngine, command_rx: CommandReceiver) -> Self {
        Self {
            engine,
            command_rx,
            mono: vec![0.0; MAX_BUFFER_FRAMES],
        }
    }

    /// Process pending commands, then render `n_frames` of mono audio.
    fn process(&mut self, n_frames: usize) -> &[f32] {
        self.engine.process_commands(&mut self.command_rx);

        let n = n_frames.min(self.mono.len());
        let (buf, _) = self.mono.split_at_mut(n);
        self.engine.render(buf);
        &self.mono[..n]
    }
}

/// Start the audio output system.
///
/// Opens the default output device, negotiates an f32 stereo configuration
/// (preferring 48kHz, falling back to the device maximum), and starts the
/// stream with a fresh engine behind a command queue.
pub fn start_audio_system() -> AudioResult<AudioSystemResult> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or(AudioError::NoDefaultDevice)?;

    let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
    log::info!("Using audio device: {}", device_name);

    let stream_config = get_output_config(&device)?;
    let sample_rate = stream_config.sample_rate.0;

    let engine = PlayerEngine::new(sample_rate);
    let atomics = engine.atomics();
    let (command_tx, command_rx) = command_channel();

    let state = Arc::new(Mutex::new(AudioCallbackState::new(engine, command_rx)));
    let stream = build_output_stream(&device, &stream_config, state)?;

    stream
        .play()
        .map_err(|e| AudioError::StreamPlayError(e.to_string()))?;

    log::info!("Audio output started at {} Hz", sample_rate);

    Ok(AudioSystemResult {
        handle: AudioHandle {
            _stream: stream,
            sample_rate,
        },
        command_sender: command_tx,
        atomics,
        sample_rate,
    })
}

/// Pick the best output configuration for a device.
fn get_output_config(device: &cpal::Device) -> AudioResult<StreamConfig> {
    let supported_configs: Vec<_> = device
        .supported_output_configs()
        .map_err(|e| AudioError::ConfigError(e.to_string()))?
        .collect();

    if supported_configs.is_empty() {
        return Err(AudioError::ConfigError(
            "No supported output configurations".to_string(),
        ));
    }

    // Prefer f32 format and stereo; fall back to anything with channels.
    let best_config = supported_configs
        .iter()
        .filter(|c| c.sample_format() == SampleFormat::F32)
        .find(|c| c.channels() >= 2)
        .or_else(|| supported_configs.iter().find(|c| c.channels() >= 1))
        .ok_or_else(|| {
            AudioError::ConfigError("No suitable output configuration found".to_string())
        })?;

    let sample_rate = if PREFERRED_SAMPLE_RATE >= best_config.min_sample_rate().0
        && PREFERRED_SAMPLE_RATE <= best_config.max_sample_rate().0
    {
        cpal::SampleRate(PREFERRED_SAMPLE_RATE)
    } else {
        let fallback = best_config.max_sample_rate();
        log::warn!(
            "Audio device doesn't support {}Hz, falling back to {}Hz",
            PREFERRED_SAMPLE_RATE,
            fallback.0
        );
        fallback
    };

    let supported = best_config.clone().with_sample_rate(sample_rate);
    Ok(StreamConfig {
        channels: supported.channels(),
        sample_rate: supported.sample_rate(),
        buffer_size: cpal::BufferSize::Default,
    })
}

/// Build the output stream, mapping the engine's mono render onto however
/// many channels the device wants.
fn build_output_stream(
    device: &cpal::Device,
    config: &StreamConfig,
    state: Arc<Mutex<AudioCallbackState>>,
) -> AudioResult<Stream> {
    let channels = config.channels as usize;

    let stream = device
        .build_output_stream(
            config,
            move |data: &mut [f32], _info: &cpal::OutputCallbackInfo| {
                let mut state = state.lock().unwrap();
                let n_frames = data.len() / channels;
                let samples = state.process(n_frames);

                for (i, frame) in data.chunks_mut(channels).enumerate() {
                    let sample = samples.get(i).copied().unwrap_or(0.0);
                    for ch in frame.iter_mut() {
                        *ch = sample;
                    }
                }
            },
            move |err| {
                log::error!("Audio stream error: {}", err);
            },
            None,
        )
        .map_err(|e| AudioError::StreamBuildError(e.to_string()))?;

    Ok(stream)
}
