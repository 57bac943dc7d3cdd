//! Key observations: directions, logical key presses, and raw events.
//!
//! The kernel reports every key transition as an `EV_KEY` event whose value
//! is `1` (pressed), `0` (released) or `2` (auto-repeat while held).  The
//! configuration file spells those `DOWN`, `UP` and `HOLD`; in code they are
//! [`KeyDirection::Press`], [`KeyDirection::Release`] and
//! [`KeyDirection::Repeat`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The transition type of a key observation.
///
/// Used only as an exact-match dimension of the binding table; there is no
/// ordering between directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyDirection {
    /// The key was newly pressed (`DOWN`, evdev value 1).
    #[serde(rename = "DOWN")]
    Press,
    /// The key was released (`UP`, evdev value 0).
    #[serde(rename = "UP")]
    Release,
    /// The key is held and auto-repeating (`HOLD`, evdev value 2).
    #[serde(rename = "HOLD")]
    Repeat,
}

impl KeyDirection {
    /// Maps an evdev `EV_KEY` value to a direction.
    ///
    /// Returns `None` for values the kernel never emits for keys.
    pub fn from_evdev_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Release),
            1 => Some(Self::Press),
            2 => Some(Self::Repeat),
            _ => None,
        }
    }

    /// Returns the spelling used in the configuration file.
    pub fn as_config_str(self) -> &'static str {
        match self {
            Self::Press => "DOWN",
            Self::Release => "UP",
            Self::Repeat => "HOLD",
        }
    }
}

impl fmt::Display for KeyDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_config_str())
    }
}

/// Error returned when a direction string is not `UP`, `DOWN` or `HOLD`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key direction '{0}' (expected UP, DOWN or HOLD)")]
pub struct ParseDirectionError(pub String);

impl FromStr for KeyDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DOWN" => Ok(Self::Press),
            "UP" => Ok(Self::Release),
            "HOLD" => Ok(Self::Repeat),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}

/// One logical `(direction, keycode)` tuple.
///
/// This is both the lookup key of the [`crate::KeyMapTable`] and the payload
/// of a pending [`crate::SuppressionState`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyPress {
    pub direction: KeyDirection,
    pub keycode: String,
}

impl KeyPress {
    pub fn new(direction: KeyDirection, keycode: impl Into<String>) -> Self {
        Self {
            direction,
            keycode: keycode.into(),
        }
    }
}

impl fmt::Display for KeyPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.direction, self.keycode)
    }
}

/// A raw observation from the input device.
///
/// A single physical key may be reported under several equivalent names
/// (see [`crate::keycode::aliases`]); `keycodes` lists them in the order the
/// translator must process them.  Never empty when produced by a key source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub keycodes: Vec<String>,
    pub direction: KeyDirection,
}

impl RawKeyEvent {
    /// Creates an event for a key with a single name.
    pub fn new(keycode: impl Into<String>, direction: KeyDirection) -> Self {
        Self {
            keycodes: vec![keycode.into()],
            direction,
        }
    }

    /// Creates an event for a key reported under several alias names.
    pub fn with_aliases<I, S>(keycodes: I, direction: KeyDirection) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keycodes: keycodes.into_iter().map(Into::into).collect(),
            direction,
        }
    }

    /// Expands the event into one [`KeyPress`] per alias, in reported order.
    pub fn presses(&self) -> impl Iterator<Item = KeyPress> + '_ {
        self.keycodes
            .iter()
            .map(move |code| KeyPress::new(self.direction, code.clone()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
