//! One-shot suppression of the next matching key event.
//!
//! # Why is this needed? (for beginners)
//!
//! Holding the LEFT button to scan backwards produces a burst of `HOLD
//! KEY_LEFT` events followed by one `UP KEY_LEFT` when the button is let go.
//! If `UP KEY_LEFT` is also bound to "previous track", releasing the button
//! after a scan would jump to the previous track.  The scan binding therefore
//! declares `skip_next_key = ["UP", "KEY_LEFT"]`: after the scan action runs,
//! the next `UP KEY_LEFT` is swallowed exactly once.
//!
//! Only one suppression can be pending.  Arming a new one replaces the old
//! one unconditionally; there is no timeout.

use crate::domain::key::KeyPress;

/// The single pending suppression slot owned by the event translator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressionState {
    pending: Option<KeyPress>,
}

impl SuppressionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the slot with `press`, replacing any pending suppression.
    pub fn arm(&mut self, press: KeyPress) {
        self.pending = Some(press);
    }

    /// Consumes the pending suppression if it equals `press`.
    ///
    /// Returns `true` when the event must be discarded.  A non-matching event
    /// leaves the pending suppression untouched.
    pub fn consume_if_matches(&mut self, press: &KeyPress) -> bool {
        if self.pending.as_ref() == Some(press) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Returns the currently pending suppression, if any.
    pub fn pending(&self) -> Option<&KeyPress> {
        self.pending.as_ref()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
