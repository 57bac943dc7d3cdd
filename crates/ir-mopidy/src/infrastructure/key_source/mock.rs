//! Mock key source for unit testing.
//!
//! Allows tests to inject synthetic [`RawKeyEvent`]s (and read failures)
//! without an input device.

use async_trait::async_trait;
use ir_mopidy_core::RawKeyEvent;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::{KeyEventSource, SourceError};

/// Creates a connected injector / source pair.
///
/// The source reports end of stream once every injector has been dropped and
/// the queue is drained.
pub fn channel() -> (MockKeyInjector, MockKeySource) {
    let (tx, rx) = mpsc::unbounded_channel();
    (MockKeyInjector { sender: tx }, MockKeySource { receiver: rx })
}

/// Sending half: pushes events into a [`MockKeySource`].
#[derive(Clone)]
pub struct MockKeyInjector {
    sender: UnboundedSender<Result<RawKeyEvent, SourceError>>,
}

impl MockKeyInjector {
    /// Injects a synthetic event, as if read from the device.
    ///
    /// Panics if the source has been dropped.
    pub fn inject_event(&self, event: RawKeyEvent) {
        self.sender
            .send(Ok(event))
            .expect("mock key source has been dropped");
    }

    /// Makes the next read fail with `error`.
    pub fn inject_error(&self, error: SourceError) {
        self.sender
            .send(Err(error))
            .expect("mock key source has been dropped");
    }
}

/// A [`KeyEventSource`] fed by a [`MockKeyInjector`].
pub struct MockKeySource {
    receiver: UnboundedReceiver<Result<RawKeyEvent, SourceError>>,
}

impl MockKeySource {
    /// A source that yields `events` and then reports end of stream.
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = RawKeyEvent>,
    {
        let (injector, source) = channel();
        for event in events {
            injector.inject_event(event);
        }
        source
    }
}

#[async_trait]
impl KeyEventSource for MockKeySource {
    async fn next_event(&mut self) -> Result<Option<RawKeyEvent>, SourceError> {
        match self.receiver.recv().await {
            Some(Ok(event)) => Ok(Some(event)),
            Some(Err(error)) => Err(error),
            None => Ok(None),
        }
    }
}
