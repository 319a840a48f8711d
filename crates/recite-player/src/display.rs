//! Terminal subtitle display
//!
//! Repaints a single line in place. The caller only invokes
//! [`SubtitleDisplay::paint`] when the active cue changes; this module just
//! handles the mechanics of overwriting the previous line cleanly.

use std::io::Write;

/// Single-line in-place subtitle renderer.
pub struct SubtitleDisplay {
    /// Length of the last painted line, for clean overwrites
    last_len: usize,
}

impl SubtitleDisplay {
    pub fn new() -> Self {
        Self { last_len: 0 }
    }

    /// Print the title card once, before playback starts.
    pub fn title_card(&mut self, title: &str) {
        println!("── {} ──", title);
        println!("(enter: pause/resume, q: quit)");
        println!();
    }

    /// Replace the subtitle line with `text` (None clears it).
    pub fn paint(&mut self, text: Option<&str>) {
        let text = text.unwrap_or("");
        let pad = self.last_len.saturating_sub(text.chars().count());
        print!("\r  {}{}", text, " ".repeat(pad));
        let _ = std::io::stdout().flush();
        self.last_len = text.chars().count();
    }

    /// Show the paused marker without losing the current subtitle.
    pub fn paused_marker(&mut self) {
        print!(" ⏸");
        let _ = std::io::stdout().flush();
        self.last_len += 2;
    }

    /// End the subtitle line at the end of the session.
    pub fn finish(&mut self) {
        self.paint(None);
        println!();
    }
}

impl Default for SubtitleDisplay {
    fn default() -> Self {
        Self::new()
    }
}
