//! Key event sources.
//!
//! On Linux the infrared receiver is an evdev input device; the kernel has
//! already decoded the IR protocol and reports plain key events with a value of
//! `1` (pressed), `2` (auto-repeat while held) or `0` (released).
//!
//! # Testability
//!
//! The [`KeyEventSource`] trait lets tests feed synthetic events through
//! [`mock::MockKeySource`] without a device node.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ir_mopidy_core::RawKeyEvent;

pub mod mock;

#[cfg(target_os = "linux")]
pub mod evdev;

/// Error type for key sources.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to open input device {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read input event: {0}")]
    Read(#[source] io::Error),
    #[error("platform not supported: {0}")]
    UnsupportedPlatform(String),
}

/// Produces key events one at a time.
///
/// `Ok(None)` means the source is exhausted and will produce nothing more.
#[async_trait]
pub trait KeyEventSource: Send {
    async fn next_event(&mut self) -> Result<Option<RawKeyEvent>, SourceError>;
}

/// Opens the input device at `path`.
#[cfg(target_os = "linux")]
pub fn open_device_source(path: &Path) -> Result<Box<dyn KeyEventSource>, SourceError> {
    Ok(Box::new(evdev::EvdevKeySource::open(path)?))
}

/// Opens the input device at `path`.
#[cfg(not(target_os = "linux"))]
pub fn open_device_source(path: &Path) -> Result<Box<dyn KeyEventSource>, SourceError> {
    Err(SourceError::UnsupportedPlatform(format!(
        "evdev input devices are only available on Linux (requested {})",
        path.display()
    )))
}
