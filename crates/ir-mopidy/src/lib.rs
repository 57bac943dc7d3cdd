//! ir-mopidy library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does ir-mopidy do? (for beginners)
//!
//! An infrared receiver on Linux shows up as an ordinary input device
//! (`/dev/input/eventN`).  Every button on the remote produces key events:
//! `DOWN` when pressed, `HOLD` while held, `UP` when released.
//!
//! The daemon:
//!
//! 1. Loads a TOML configuration listing which `(direction, key)` pairs
//!    trigger which player action.
//! 2. Reads key events from the device, one at a time.
//! 3. Looks each event up in the binding table, honouring the one-shot
//!    "skip the next matching event" rule used by hold-to-scan gestures.
//! 4. Runs the bound action, which talks to Mopidy over HTTP JSON-RPC
//!    (`core.mixer.set_volume`, `core.playback.next`, ...).

/// Application layer: the action set and the event translator.
pub mod application;

/// Infrastructure layer: key sources, the JSON-RPC HTTP client, and config storage.
pub mod infrastructure;
