//! Keyboard input - the play/pause toggle gesture
//!
//! A background thread reads lines from stdin and forwards them as events.
//! Launching the player is the explicit start control; only these events
//! toggle a running session, so the two can never shadow each other.

use crossbeam::channel::{unbounded, Receiver};
use std::io::BufRead;

/// Events from the user while a session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserEvent {
    /// The toggle gesture: pause if playing, resume if paused
    Toggle,
    /// Stop reading and exit
    Quit,
}

/// Spawn the stdin reader thread.
///
/// Returns the receiving end; the thread exits on stdin EOF (e.g. when the
/// text itself was piped in), after which no more events arrive.
pub fn spawn_input_thread() -> Receiver<UserEvent> {
    let (tx, rx) = unbounded();

    std::thread::Builder::new()
        .name("recite-input".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                let event = match line.trim() {
                    "q" | "quit" => UserEvent::Quit,
                    _ => UserEvent::Toggle,
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
        })
        .expect("failed to spawn input thread");

    rx
}
