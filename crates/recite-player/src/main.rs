//! Recite Player - reads page text aloud as timed terminal subtitles
//!
//! Pipeline per run:
//! 1. Extract text from a file (or stdin) and stash it in the handoff slot
//! 2. Start the audio output system (optional - degrades to subtitles only)
//! 3. Build a reading session: chunk, plan, resolve speech/silence, schedule
//! 4. Drive the display loop at ~60fps from the transport clock
//!
//! ## Usage
//!
//! `recite-player article.txt [--wpm N]`, or pipe text on stdin.

mod config;
mod display;
mod input;
mod source;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};

use recite_core::handoff::HandoffSlot;
use recite_core::session::{ReaderSession, SessionError};
use recite_core::source::TextSource;
use recite_core::synth::{ElevenLabsProvider, SpeechProvider};
use recite_core::ticker::Tick;

use display::SubtitleDisplay;
use input::UserEvent;
use source::{FileSource, StdinSource};

/// Display refresh interval (~60fps).
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

fn main() -> anyhow::Result<()> {
    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut file: Option<PathBuf> = None;
    let mut wpm_override: Option<u32> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--wpm" => {
                let value = iter.next().context("--wpm requires a value")?;
                wpm_override = Some(value.parse().context("--wpm value must be an integer")?);
            }
            "--help" | "-h" => {
                println!("Usage: recite-player [FILE] [--wpm N]");
                println!("Reads FILE (or stdin) aloud as timed subtitles.");
                return Ok(());
            }
            other if !other.starts_with('-') => file = Some(PathBuf::from(other)),
            other => bail!("Unknown flag: {}", other),
        }
    }

    let config_path = config::default_config_path();
    let config = config::load_config(&config_path);
    let wpm = wpm_override.unwrap_or(config.reading.wpm);

    log::info!("recite-player starting at {} WPM", wpm);

    // Extract the page text and hand it off through the one-shot slot,
    // consumed exactly once by the new session below.
    let reading_stdin = file.is_none();
    let payload = match &file {
        Some(path) => FileSource::new(path.clone()).extract(config.reading.char_cap),
        None => StdinSource.extract(config.reading.char_cap),
    }
    .context("Could not read text source")?;

    let handoff = HandoffSlot::new();
    handoff.stash(payload);

    // Audio is best-effort: a missing device never blocks reading.
    let audio = match recite_core::audio::start_audio_system() {
        Ok(audio) => Some(audio),
        Err(e) => {
            log::warn!("Audio unavailable ({}), subtitles only", e);
            None
        }
    };

    let provider: Option<ElevenLabsProvider> = if config.voice.is_configured() {
        Some(ElevenLabsProvider::new(
            config.voice.api_key.clone(),
            config.voice.voice_id.clone(),
        ))
    } else {
        log::info!("No voice credentials configured; reading in silence");
        None
    };

    let (command_sender, _handle) = match audio {
        Some(result) => (Some(result.command_sender), Some(result.handle)),
        None => (None, None),
    };

    let payload = handoff.take().expect("payload was just stashed");
    let mut session = match ReaderSession::start(
        &payload,
        wpm,
        provider.as_ref().map(|p| p as &dyn SpeechProvider),
        command_sender,
    ) {
        Ok(session) => session,
        Err(e @ SessionError::InputUnavailable { .. }) => {
            bail!("{}. Try a longer article.", e);
        }
    };

    let mut subtitles = SubtitleDisplay::new();
    subtitles.title_card(session.title());

    let events = if reading_stdin {
        None // stdin was consumed by the text itself
    } else {
        Some(input::spawn_input_thread())
    };

    // Display loop: repaint only when the active cue changes, stop once the
    // timeline is exhausted.
    loop {
        if let Some(events) = &events {
            for event in events.try_iter() {
                match event {
                    UserEvent::Toggle => {
                        session.toggle();
                        if !session.is_playing() {
                            subtitles.paused_marker();
                        }
                    }
                    UserEvent::Quit => {
                        subtitles.finish();
                        return Ok(());
                    }
                }
            }
        }

        match session.tick() {
            Tick::Repaint(text) => subtitles.paint(text.as_deref()),
            Tick::Idle => {}
            Tick::Finished => break,
        }

        std::thread::sleep(FRAME_INTERVAL);
    }

    subtitles.finish();
    log::info!("Finished after {:.1}s", session.elapsed());
    Ok(())
}
