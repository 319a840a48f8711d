//! Playback transport - elapsed time across play/pause cycles
//!
//! Tracks elapsed session time as `offset + (now - wall_start)` while
//! playing; pausing folds the elapsed wall time into `offset`, resuming
//! resets `wall_start`. Both the display loop and the audio engine are
//! started and paused from this clock's transitions, which is what keeps
//! subtitles and audio in agreement without ever querying the audio engine
//! for position (there is nothing to query in an all-silent session).
//!
//! Methods take an explicit `now` so drift behavior is testable on
//! fabricated instants; the argument-free variants use `Instant::now()`.

use std::time::Instant;

/// Wall-clock playback transport for one session at a time.
///
/// No session exists until [`Transport::start_session`]; pause/resume
/// before that are no-ops, as are repeated pauses or resumes (a second
/// pause must not double-credit `offset`).
#[derive(Debug)]
pub struct Transport {
    is_playing: bool,
    /// Seconds consumed before the current play segment
    offset: f64,
    /// When the current play segment began (stale while paused)
    wall_start: Option<Instant>,
    /// Total duration of the session's corrected timeline
    total: f64,
}

impl Transport {
    /// Create a transport with no session.
    pub fn new() -> Self {
        Self {
            is_playing: false,
            offset: 0.0,
            wall_start: None,
            total: 0.0,
        }
    }

    /// Begin a new session of `total` seconds, playing immediately.
    /// Supersedes any prior session's state unconditionally.
    pub fn start_session_at(&mut self, total: f64, now: Instant) {
        self.total = total;
        self.offset = 0.0;
        self.wall_start = Some(now);
        self.is_playing = true;
    }

    /// Begin a new session using the real clock.
    pub fn start_session(&mut self, total: f64) {
        self.start_session_at(total, Instant::now());
    }

    /// True once a session has been started.
    pub fn has_session(&self) -> bool {
        self.total > 0.0
    }

    /// True while the transport is running.
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Total duration of the current session in seconds.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Elapsed session time at `now`, clamped to `[0, total]`.
    pub fn elapsed_at(&self, now: Instant) -> f64 {
        let raw = if self.is_playing {
            match self.wall_start {
                Some(start) => self.offset + now.duration_since(start).as_secs_f64(),
                None => self.offset,
            }
        } else {
            self.offset
        };
        raw.clamp(0.0, self.total)
    }

    /// Elapsed session time using the real clock.
    pub fn elapsed(&self) -> f64 {
        self.elapsed_at(Instant::now())
    }

    /// Pause at `now`, folding wall time into the offset.
    ///
    /// Returns true if the transport transitioned; a pause while already
    /// paused (or without a session) is a no-op.
    pub fn pause_at(&mut self, now: Instant) -> bool {
        if !self.is_playing || !self.has_session() {
            return false;
        }
        if let Some(start) = self.wall_start {
            self.offset += now.duration_since(start).as_secs_f64();
        }
        self.is_playing = false;
        true
    }

    /// Pause using the real clock.
    pub fn pause(&mut self) -> bool {
        self.pause_at(Instant::now())
    }

    /// Resume at `now`. Returns true if the transport transitioned; a
    /// resume while playing (or without a session) is a no-op.
    pub fn resume_at(&mut self, now: Instant) -> bool {
        if self.is_playing || !self.has_session() {
            return false;
        }
        self.wall_start = Some(now);
        self.is_playing = true;
        true
    }

    /// Resume using the real clock.
    pub fn resume(&mut self) -> bool {
        self.resume_at(Instant::now())
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const EPSILON: f64 = 1e-9;

    fn at(epoch: Instant, secs: f64) -> Instant {
        epoch + Duration::from_secs_f64(secs)
    }

    #[test]
    fn elapsed_tracks_wall_time_while_playing() {
        let epoch = Instant::now();
        let mut transport = Transport::new();
        transport.start_session_at(10.0, epoch);

        assert!((transport.elapsed_at(at(epoch, 2.5)) - 2.5).abs() < EPSILON);
    }

    #[test]
    fn elapsed_freezes_while_paused() {
        let epoch = Instant::now();
        let mut transport = Transport::new();
        transport.start_session_at(10.0, epoch);

        assert!(transport.pause_at(at(epoch, 3.0)));
        // However long the pause lasts, elapsed stays put.
        assert!((transport.elapsed_at(at(epoch, 100.0)) - 3.0).abs() < EPSILON);
    }

    #[test]
    fn no_drift_across_pause_resume() {
        // Play T1, pause (arbitrarily long), resume, play T2:
        // elapsed == T1 + T2.
        let epoch = Instant::now();
        let mut transport = Transport::new();
        transport.start_session_at(60.0, epoch);

        transport.pause_at(at(epoch, 4.0)); // T1 = 4
        transport.resume_at(at(epoch, 50.0)); // paused 46s
        let elapsed = transport.elapsed_at(at(epoch, 53.5)); // T2 = 3.5

        assert!((elapsed - 7.5).abs() < EPSILON);
    }

    #[test]
    fn pause_is_idempotent() {
        let epoch = Instant::now();
        let mut transport = Transport::new();
        transport.start_session_at(10.0, epoch);

        assert!(transport.pause_at(at(epoch, 2.0)));
        // Second pause later must not credit more time.
        assert!(!transport.pause_at(at(epoch, 5.0)));
        assert!((transport.elapsed_at(at(epoch, 9.0)) - 2.0).abs() < EPSILON);
    }

    #[test]
    fn resume_is_idempotent() {
        let epoch = Instant::now();
        let mut transport = Transport::new();
        transport.start_session_at(10.0, epoch);
        transport.pause_at(at(epoch, 1.0));

        assert!(transport.resume_at(at(epoch, 2.0)));
        assert!(!transport.resume_at(at(epoch, 3.0)));
        // wall_start stays at the first resume: 1 + (4 - 2) = 3.
        assert!((transport.elapsed_at(at(epoch, 4.0)) - 3.0).abs() < EPSILON);
    }

    #[test]
    fn no_ops_without_a_session() {
        let mut transport = Transport::new();
        assert!(!transport.has_session());
        assert!(!transport.pause());
        assert!(!transport.resume());
        assert_eq!(transport.elapsed(), 0.0);
    }

    #[test]
    fn elapsed_clamps_to_total() {
        let epoch = Instant::now();
        let mut transport = Transport::new();
        transport.start_session_at(5.0, epoch);

        assert!((transport.elapsed_at(at(epoch, 9.0)) - 5.0).abs() < EPSILON);
    }

    #[test]
    fn new_session_supersedes_prior_state() {
        let epoch = Instant::now();
        let mut transport = Transport::new();
        transport.start_session_at(10.0, epoch);
        transport.pause_at(at(epoch, 6.0));

        transport.start_session_at(20.0, at(epoch, 7.0));
        assert!(transport.is_playing());
        assert!((transport.elapsed_at(at(epoch, 8.0)) - 1.0).abs() < EPSILON);
    }
}
