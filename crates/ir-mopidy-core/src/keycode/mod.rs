//! Keycode naming helpers.
//!
//! The Linux input headers define several key codes under more than one name.
//! A remote's mute button, for instance, arrives as code 113, which is both
//! `KEY_MUTE` and `KEY_MIN_INTERESTING`.  Users may bind either name, so the
//! key source reports every alias and the translator tries each in turn.

pub mod aliases;

pub use aliases::aliases_for;

/// Returns all names for `code`, falling back to `primary` when the code has
/// no aliases.
pub fn names_for(code: u16, primary: impl Into<String>) -> Vec<String> {
    match aliases_for(code) {
        Some(names) => names.iter().map(|name| name.to_string()).collect(),
        None => vec![primary.into()],
    }
}
