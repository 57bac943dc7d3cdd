//! The immutable key binding table.
//!
//! [`KeyMapTable`] maps a `(direction, keycode)` pair to the [`Action`] it
//! triggers plus an optional suppression rule.  It is built once at startup
//! from the flattened configuration and never mutated afterwards.
//!
//! # Duplicate entries
//!
//! At most one binding exists per `(direction, keycode)` pair.  When the
//! configuration supplies the same pair more than once, the **last** entry
//! wins; earlier ones are discarded (and logged at debug level).

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::domain::action::{Action, UnknownAction};
use crate::domain::key::{KeyDirection, KeyPress};

/// Errors raised while building a [`KeyMapTable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyMapError {
    /// A binding names an action that is not registered.
    #[error("binding for {key} references {source}")]
    UnknownAction {
        key: KeyPress,
        #[source]
        source: UnknownAction,
    },
}

/// One configuration entry, before action names are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSpec {
    pub key: KeyPress,
    /// Action name; `None` binds the key explicitly to nothing.
    pub callback: Option<String>,
    /// Event to swallow once after the action has run.
    pub skip_next: Option<KeyPress>,
}

/// A resolved binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    /// `None` means the key is explicitly unmapped.
    pub action: Option<Action>,
    /// The `suppress-next` rule armed after `action` completes.
    pub suppress_next: Option<KeyPress>,
}

/// Lookup structure keyed by `(direction, keycode)`.
#[derive(Debug, Clone, Default)]
pub struct KeyMapTable {
    bindings: HashMap<KeyPress, KeyBinding>,
}

impl KeyMapTable {
    /// Builds the table from configuration entries in file order.
    ///
    /// # Errors
    ///
    /// Returns [`KeyMapError::UnknownAction`] for the first entry whose
    /// callback does not name a registered [`Action`].
    pub fn build<I>(specs: I) -> Result<Self, KeyMapError>
    where
        I: IntoIterator<Item = BindingSpec>,
    {
        let mut bindings = HashMap::new();

        for spec in specs {
            let action = match spec.callback.as_deref() {
                Some(name) => Some(name.parse::<Action>().map_err(|source| {
                    KeyMapError::UnknownAction {
                        key: spec.key.clone(),
                        source,
                    }
                })?),
                None => None,
            };

            let binding = KeyBinding {
                action,
                suppress_next: spec.skip_next,
            };

            if let Some(previous) = bindings.insert(spec.key.clone(), binding) {
                debug!(
                    "binding for {} overrides earlier entry ({:?})",
                    spec.key, previous.action
                );
            }
        }

        Ok(Self { bindings })
    }

    /// Returns the binding for `(direction, keycode)`, if configured.
    pub fn lookup(&self, direction: KeyDirection, keycode: &str) -> Option<&KeyBinding> {
        // Borrowed lookups on a composite key need an owned probe.
        self.bindings.get(&KeyPress::new(direction, keycode))
    }

    /// Same as [`lookup`](Self::lookup) for an already-built [`KeyPress`].
    pub fn get(&self, press: &KeyPress) -> Option<&KeyBinding> {
        self.bindings.get(press)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterates over all bindings in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&KeyPress, &KeyBinding)> {
        self.bindings.iter()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
