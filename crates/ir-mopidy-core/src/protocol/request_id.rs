//! Monotonically increasing JSON-RPC request identifiers.
//!
//! # Why number requests? (for beginners)
//!
//! JSON-RPC pairs every response with its request through the `id` member.
//! Over plain HTTP each response arrives on the request's own connection, so
//! the pairing is implicit, but a unique id still makes the Mopidy server log
//! and our own debug output line up one-to-one.
//!
//! Ids are unique for the lifetime of the process and are not persisted.

use std::sync::atomic::{AtomicU64, Ordering};

/// A thread-safe counter handing out JSON-RPC request ids.
///
/// The first id is 1 and every later id is strictly greater.  At one request
/// per microsecond the `u64` range lasts over half a million years, so
/// overflow is not handled.
///
/// # Examples
///
/// ```rust
/// use ir_mopidy_core::RequestIdCounter;
///
/// let ids = RequestIdCounter::new();
/// assert_eq!(ids.next(), 1);
/// assert_eq!(ids.next(), 2);
/// ```
#[derive(Debug)]
pub struct RequestIdCounter {
    inner: AtomicU64,
}

impl RequestIdCounter {
    pub fn new() -> Self {
        Self {
            inner: AtomicU64::new(1),
        }
    }

    /// Returns the next id and advances the counter.
    ///
    /// `Relaxed` ordering is enough: the id only labels a request, it does not
    /// publish any other memory.
    pub fn next(&self) -> u64 {
        self.inner.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the id the next call to [`next`](Self::next) will hand out.
    pub fn peek(&self) -> u64 {
        self.inner.load(Ordering::Relaxed)
    }
}

impl Default for RequestIdCounter {
    fn default() -> Self {
        Self::new()
    }
}
