//! Display loop state - maps elapsed time to the active cue
//!
//! The player calls [`CueTicker::tick`] once per frame with the transport's
//! elapsed time. The ticker only requests a repaint when the active cue
//! index changes (repaint cost and flicker avoidance), and reports
//! `Finished` once the timeline is exhausted so the frame loop can disarm
//! itself until the next resume.

use crate::types::Timeline;

/// Find the smallest cue index whose end lies past `t` - the first cue not
/// yet fully elapsed. Returns `timeline.len()` once `t` has reached the end.
pub fn index_for_time(timeline: &Timeline, t: f64) -> usize {
    timeline
        .cues
        .iter()
        .position(|cue| t < cue.end)
        .unwrap_or(timeline.len())
}

/// Outcome of one display tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// The active cue changed: repaint with this text (None clears the
    /// display).
    Repaint(Option<String>),
    /// Nothing changed; do not repaint.
    Idle,
    /// The timeline is exhausted; the display was cleared and the loop
    /// should disarm.
    Finished,
}

/// Per-frame display state: a forward-only cue cursor plus the last painted
/// index.
///
/// The cursor never rescans from zero for monotonically increasing time, so
/// a tick is O(1) amortized regardless of cue count.
#[derive(Debug)]
pub struct CueTicker {
    cursor: usize,
    last_painted: Option<usize>,
    finished: bool,
}

impl CueTicker {
    /// Fresh ticker for a new session.
    pub fn new() -> Self {
        Self {
            cursor: 0,
            last_painted: None,
            finished: false,
        }
    }

    /// True once the ticker has run past the last cue.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance to elapsed time `t` and report what the display should do.
    pub fn tick(&mut self, timeline: &Timeline, t: f64) -> Tick {
        if self.finished {
            return Tick::Finished;
        }

        // Monotonic forward scan from the current cursor.
        while self.cursor < timeline.len() && t >= timeline.cues[self.cursor].end {
            self.cursor += 1;
        }

        if self.cursor >= timeline.len() {
            self.finished = true;
            if self.last_painted != Some(timeline.len()) {
                self.last_painted = Some(timeline.len());
                return Tick::Repaint(None);
            }
            return Tick::Finished;
        }

        if self.last_painted != Some(self.cursor) {
            self.last_painted = Some(self.cursor);
            return Tick::Repaint(Some(timeline.cues[self.cursor].text.clone()));
        }

        Tick::Idle
    }
}

impl Default for CueTicker {
    fn default() -> Self {
        Self::new()
    }
}
