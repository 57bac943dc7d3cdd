//! Storage infrastructure: configuration file loading.
//!
//! The `config` sub-module handles:
//!
//! - Locating the TOML configuration file (`$XDG_CONFIG_HOME/ir-mopidy/config.toml`).
//! - Parsing it into [`config::DaemonConfig`], filling in defaults for
//!   anything the user left out.
//! - Turning the `[[keys]]` groups into a [`ir_mopidy_core::KeyMapTable`].

pub mod config;
