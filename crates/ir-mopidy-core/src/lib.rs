//! # ir-mopidy-core
//!
//! Shared library for ir-mopidy containing the key binding table, the one-shot
//! suppression state, the keycode alias table, and the JSON-RPC message types
//! spoken to the Mopidy HTTP API.
//!
//! This crate has zero dependencies on input devices, HTTP clients, or the
//! async runtime.  Everything in it can be unit-tested without hardware.
//!
//! # Architecture overview (for beginners)
//!
//! ir-mopidy turns an infrared remote control into a Mopidy remote.  The Linux
//! kernel decodes the IR signal and reports it as ordinary key events
//! (`KEY_VOLUMEUP` pressed, `KEY_LEFT` held, ...).  The daemon looks each event
//! up in a table built from the user's configuration and calls the matching
//! Mopidy JSON-RPC method.
//!
//! This crate (`ir-mopidy-core`) is the shared foundation.  It defines:
//!
//! - **`domain`** – The vocabulary of the translator: key directions, key
//!   presses, the closed set of player actions, the binding table and the
//!   suppression slot used for hold-to-scan gestures.
//!
//! - **`keycode`** – The alias table for input event codes that the kernel
//!   headers give more than one name (e.g. `KEY_MUTE` / `KEY_MIN_INTERESTING`).
//!
//! - **`protocol`** – JSON-RPC 2.0 request/response envelopes and the
//!   monotonically increasing request-id counter.

pub mod domain;
pub mod keycode;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `ir_mopidy_core::KeyMapTable` instead of the full module path.
pub use domain::action::{Action, UnknownAction};
pub use domain::binding::{BindingSpec, KeyBinding, KeyMapError, KeyMapTable};
pub use domain::key::{KeyDirection, KeyPress, ParseDirectionError, RawKeyEvent};
pub use domain::suppression::SuppressionState;
pub use protocol::messages::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use protocol::request_id::RequestIdCounter;
