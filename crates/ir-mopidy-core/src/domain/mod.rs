//! Domain entities for ir-mopidy.
//!
//! This module contains pure business logic with no infrastructure
//! dependencies: no device handles, no sockets, no async runtime.
//!
//! # What lives here?
//!
//! - [`key`] – the raw observation produced by the remote (`RawKeyEvent`) and
//!   the logical `(direction, keycode)` tuple the translator works with.
//! - [`action`] – the closed set of player operations a key can trigger.
//! - [`binding`] – the immutable lookup table built from configuration.
//! - [`suppression`] – the single pending "skip the next matching event" slot.
//!
//! Code in outer layers (application, infrastructure) depends on the domain,
//! but the domain never depends on them.

pub mod action;
pub mod binding;
pub mod key;
pub mod suppression;
