//! Infrastructure layer for the ir-mopidy daemon.
//!
//! Contains OS-facing adapters: the evdev key source, the HTTP JSON-RPC
//! client, and file-system configuration storage.

pub mod key_source;
pub mod rpc;
pub mod storage;
