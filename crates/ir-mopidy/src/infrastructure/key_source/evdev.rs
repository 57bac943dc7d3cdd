//! evdev key source (Linux only).
//!
//! Reads `EV_KEY` events from `/dev/input/eventN` through the evdev crate's
//! tokio event stream.  Synchronisation, scan-code and other event types are
//! skipped.  Each key event carries every name the kernel headers give its
//! code, in alias table order.

use std::path::{Path, PathBuf};

use ::evdev::{Device, EventStream, InputEventKind};
use async_trait::async_trait;
use ir_mopidy_core::{keycode, KeyDirection, RawKeyEvent};
use tracing::{debug, info, trace};

use super::{KeyEventSource, SourceError};

/// An evdev input device opened for asynchronous reading.
pub struct EvdevKeySource {
    path: PathBuf,
    stream: EventStream,
}

impl EvdevKeySource {
    /// Opens `path` and switches it to non-blocking stream mode.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let open_error = |source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        };

        let device = Device::open(path).map_err(open_error)?;
        info!(
            "opened input device {} ({})",
            path.display(),
            device.name().unwrap_or("unnamed")
        );
        let stream = device.into_event_stream().map_err(open_error)?;

        Ok(Self {
            path: path.to_path_buf(),
            stream,
        })
    }
}

#[async_trait]
impl KeyEventSource for EvdevKeySource {
    async fn next_event(&mut self) -> Result<Option<RawKeyEvent>, SourceError> {
        loop {
            let event = self.stream.next_event().await.map_err(SourceError::Read)?;

            let InputEventKind::Key(key) = event.kind() else {
                continue;
            };
            let Some(direction) = KeyDirection::from_evdev_value(event.value()) else {
                debug!("ignoring key event with value {}", event.value());
                continue;
            };

            let names = keycode::names_for(key.code(), format!("{key:?}"));
            trace!("{direction} {names:?} from {}", self.path.display());
            return Ok(Some(RawKeyEvent::with_aliases(names, direction)));
        }
    }
}
