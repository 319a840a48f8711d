//! Reading session - the controller owning one playback lifecycle
//!
//! A [`ReaderSession`] is created per "play" action from a single text
//! payload: chunk, plan, resolve audio, schedule, then arm the transport
//! and the engine together. Pause/resume are methods on the session, which
//! forwards each transition to the audio engine in the same control action
//! so audio and subtitles stop and start together.
//!
//! Only input validation can fail here. Once a session starts it always
//! runs to its full planned duration: provider failures became silence
//! during resolution, and a missing audio engine just means nobody hears
//! the silence.

use std::time::Instant;

use rand::Rng;
use thiserror::Error;

use crate::chunker::chunk_text;
use crate::engine::{schedule, CommandSender, EngineCommand};
use crate::planner::plan;
use crate::synth::{resolve_units, SpeechProvider};
use crate::ticker::{CueTicker, Tick};
use crate::transport::Transport;
use crate::types::{
    PagePayload, Timeline, MAX_CHUNK_WORDS, MIN_CHUNK_WORDS, MIN_READABLE_CHARS,
};

/// Errors that prevent a session from starting.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The payload has too little usable text. Surfaced before any
    /// playback state is created.
    #[error("No readable text ({found} usable characters, need at least {needed})")]
    InputUnavailable { found: usize, needed: usize },
}

/// One playback session: authoritative timeline, transport clock, display
/// ticker, and the engine command channel.
#[derive(Debug)]
pub struct ReaderSession {
    title: String,
    timeline: Timeline,
    transport: Transport,
    ticker: CueTicker,
    commands: Option<CommandSender>,
}

impl ReaderSession {
    /// Build and start a session from `payload` at `wpm`.
    ///
    /// `provider` is the optional speech synthesizer (absent = all-silent
    /// session); `commands` is the optional audio engine channel (absent =
    /// subtitles only). Playback begins immediately on success.
    pub fn start(
        payload: &PagePayload,
        wpm: u32,
        provider: Option<&dyn SpeechProvider>,
        commands: Option<CommandSender>,
    ) -> Result<Self, SessionError> {
        Self::start_with_rng(payload, wpm, provider, commands, &mut rand::thread_rng())
    }

    /// [`ReaderSession::start`] with an injected chunking RNG.
    pub fn start_with_rng<R: Rng>(
        payload: &PagePayload,
        wpm: u32,
        provider: Option<&dyn SpeechProvider>,
        mut commands: Option<CommandSender>,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let text = payload.text.trim();
        let usable = text.chars().count();
        if usable < MIN_READABLE_CHARS {
            return Err(SessionError::InputUnavailable {
                found: usable,
                needed: MIN_READABLE_CHARS,
            });
        }

        let chunks = chunk_text(text, MIN_CHUNK_WORDS, MAX_CHUNK_WORDS, rng);
        let provisional = plan(&chunks, wpm);
        let units = resolve_units(&chunks, &provisional, provider);
        let real = units.iter().filter(|u| u.is_real).count();
        let (program, timeline) = schedule(units, &provisional, wpm);

        log::info!(
            "Session ready: {} cues ({} spoken, {} silent), {:.1}s total",
            timeline.len(),
            real,
            timeline.len() - real,
            timeline.total
        );

        if let Some(tx) = commands.as_mut() {
            if tx.send(EngineCommand::Load(Box::new(program))).is_err()
                || tx.send(EngineCommand::Play).is_err()
            {
                log::warn!("Engine command queue full; continuing without audio");
                commands = None;
            }
        }

        let mut transport = Transport::new();
        transport.start_session(timeline.total);

        Ok(Self {
            title: payload.title.clone(),
            timeline,
            transport,
            ticker: CueTicker::new(),
            commands,
        })
    }

    /// Page title for the title card.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The authoritative cue timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// True while the transport is running.
    pub fn is_playing(&self) -> bool {
        self.transport.is_playing()
    }

    /// True once the display has run past the last cue.
    pub fn is_finished(&self) -> bool {
        self.ticker.is_finished()
    }

    /// Elapsed session time in seconds.
    pub fn elapsed(&self) -> f64 {
        self.transport.elapsed()
    }

    /// Pause playback. Idempotent; returns true on an actual transition.
    pub fn pause(&mut self) -> bool {
        if !self.transport.pause() {
            return false;
        }
        self.send(EngineCommand::Pause);
        log::debug!("Paused at {:.2}s", self.transport.elapsed());
        true
    }

    /// Resume playback. Idempotent; returns true on an actual transition.
    pub fn resume(&mut self) -> bool {
        if !self.transport.resume() {
            return false;
        }
        self.send(EngineCommand::Play);
        log::debug!("Resumed from {:.2}s", self.transport.elapsed());
        true
    }

    /// The play/pause toggle gesture.
    pub fn toggle(&mut self) {
        if self.transport.is_playing() {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Run one display frame against the real clock.
    pub fn tick(&mut self) -> Tick {
        self.tick_at(Instant::now())
    }

    /// Run one display frame at a given instant.
    pub fn tick_at(&mut self, now: Instant) -> Tick {
        let t = self.transport.elapsed_at(now);
        self.ticker.tick(&self.timeline, t)
    }

    fn send(&mut self, cmd: EngineCommand) {
        if let Some(tx) = self.commands.as_mut() {
            if tx.send(cmd).is_err() {
                log::warn!("Engine command queue full; audio may be out of step");
            }
        }
    }
}
