//! The closed set of player operations a key binding can trigger.
//!
//! Configuration files refer to actions by name (`callback = "volume_up"`).
//! Names are resolved into [`Action`] values once, while the binding table is
//! built, so an unknown name is a startup error rather than a runtime lookup
//! failure.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A named operation against the remote player.
///
/// The variants carry no data: everything an action needs at run time
/// (volume step, favourite stream URI, ...) comes from the command settings
/// held by the executor in the application layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    NextTrack,
    PreviousTrack,
    ScanForward,
    ScanBackward,
    PauseOrResume,
    PlayFavoriteStream,
    PlayRandomAlbum,
    MuteUnmute,
    VolumeUp,
    VolumeDown,
}

/// Error returned when a configuration names an action that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action '{0}'")]
pub struct UnknownAction(pub String);

impl Action {
    /// Every registered action, in documentation order.
    pub const ALL: [Action; 10] = [
        Action::NextTrack,
        Action::PreviousTrack,
        Action::ScanForward,
        Action::ScanBackward,
        Action::PauseOrResume,
        Action::PlayFavoriteStream,
        Action::PlayRandomAlbum,
        Action::MuteUnmute,
        Action::VolumeUp,
        Action::VolumeDown,
    ];

    /// Returns the name used for this action in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Action::NextTrack => "next_track",
            Action::PreviousTrack => "previous_track",
            Action::ScanForward => "scan_forward",
            Action::ScanBackward => "scan_backward",
            Action::PauseOrResume => "pause_or_resume",
            Action::PlayFavoriteStream => "play_favorite_stream",
            Action::PlayRandomAlbum => "play_random_album",
            Action::MuteUnmute => "mute_unmute",
            Action::VolumeUp => "volume_up",
            Action::VolumeDown => "volume_down",
        }
    }
}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
