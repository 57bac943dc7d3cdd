//! Application layer use cases for the ir-mopidy daemon.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure business rules, here `ir-mopidy-core`) and the infrastructure
//! (input devices, HTTP, files).
//!
//! Code in this layer:
//!
//! - **Orchestrates** domain objects to fulfil a user goal ("HOLD on the
//!   right arrow scans forward").
//! - **Depends on abstractions** (traits) rather than concrete
//!   implementations, so tests can substitute recording doubles for the
//!   Mopidy server.
//!
//! # Sub-modules
//!
//! - **`rpc`** – The `RpcTransport` trait every action talks through.
//! - **`actions`** – The player operations (volume, playback, track
//!   navigation) and their business rules.
//! - **`translate_events`** – The state machine turning raw key events into
//!   action dispatches.  This is the heart of the daemon.

pub mod actions;
pub mod rpc;
pub mod translate_events;
