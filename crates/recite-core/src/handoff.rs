//! One-shot payload handoff between extraction and playback
//!
//! Holds the most recent extracted payload for exactly one consumer: a new
//! session reads the slot once and the slot clears itself, so a stale
//! payload can never be replayed by a later session.

use std::sync::Mutex;

use crate::types::PagePayload;

/// A handoff slot with at-most-once take semantics.
#[derive(Debug, Default)]
pub struct HandoffSlot {
    slot: Mutex<Option<PagePayload>>,
}

impl HandoffSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a payload, replacing any unconsumed one.
    pub fn stash(&self, payload: PagePayload) {
        *self.slot.lock().unwrap() = Some(payload);
    }

    /// Take the payload, clearing the slot.
    pub fn take(&self) -> Option<PagePayload> {
        self.slot.lock().unwrap().take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(text: &str) -> PagePayload {
        PagePayload {
            url: "file:test".to_string(),
            title: "Test".to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn take_consumes_at_most_once() {
        let slot = HandoffSlot::new();
        slot.stash(payload("hello"));

        assert!(slot.take().is_some());
        assert!(slot.take().is_none());
    }

    #[test]
    fn stash_replaces_unconsumed_payload() {
        let slot = HandoffSlot::new();
        slot.stash(payload("old"));
        slot.stash(payload("new"));

        assert_eq!(slot.take().unwrap().text, "new");
        assert!(slot.take().is_none());
    }
}
