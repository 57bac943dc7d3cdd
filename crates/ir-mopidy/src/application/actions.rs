//! ActionSet: the player operations a key binding can trigger.
//!
//! Every action is an asynchronous procedure with no parameters and no return
//! value; its effect is entirely the Mopidy side effect.  Several actions are
//! read-modify-write (read the volume, write volume + step), which is why the
//! translator never runs two of them at the same time.
//!
//! # Failure policy
//!
//! Nothing here returns an error.  A failed RPC call (already logged by the
//! transport) or an unexpected value from the server (logged here) makes the
//! action stop early, and the player's state simply does not change.

use std::sync::Arc;

use async_trait::async_trait;
use ir_mopidy_core::Action;
use rand::seq::SliceRandom;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::application::rpc::RpcTransport;
use crate::application::translate_events::ActionDispatcher;

/// Offset applied by a single scan step, in milliseconds.
pub const SCAN_STEP_MS: i64 = 1000;

/// Lowest volume Mopidy accepts.
pub const VOLUME_MIN: i64 = 0;

/// Highest volume Mopidy accepts.
pub const VOLUME_MAX: i64 = 100;

/// Settings read by actions at run time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSettings {
    /// Percentage points added or removed by `volume_up` / `volume_down`.
    pub volume_step: u32,
    /// Stream played by `play_favorite_stream`; the action is a no-op without it.
    pub favorite_stream_uri: Option<String>,
    /// Library directory browsed by `play_random_album`.
    pub album_browse_uri: String,
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self {
            volume_step: 5,
            favorite_stream_uri: None,
            album_browse_uri: "local:directory?type=album".to_string(),
        }
    }
}

/// Executes [`Action`]s against Mopidy.
pub struct ActionSet {
    rpc: Arc<dyn RpcTransport>,
    settings: CommandSettings,
}

impl ActionSet {
    pub fn new(rpc: Arc<dyn RpcTransport>, settings: CommandSettings) -> Self {
        Self { rpc, settings }
    }

    pub fn settings(&self) -> &CommandSettings {
        &self.settings
    }

    /// Runs `action` to completion.
    pub async fn run(&self, action: Action) {
        info!("running action {action}");
        match action {
            Action::NextTrack => self.next_track().await,
            Action::PreviousTrack => self.previous_track().await,
            Action::ScanForward => self.scan_forward().await,
            Action::ScanBackward => self.scan_backward().await,
            Action::PauseOrResume => self.pause_or_resume().await,
            Action::PlayFavoriteStream => self.play_favorite_stream().await,
            Action::PlayRandomAlbum => self.play_random_album().await,
            Action::MuteUnmute => self.mute_unmute().await,
            Action::VolumeUp => self.volume_up().await,
            Action::VolumeDown => self.volume_down().await,
        }
    }

    pub async fn next_track(&self) {
        self.query("core.playback.next", None).await;
    }

    pub async fn previous_track(&self) {
        self.query("core.playback.previous", None).await;
    }

    pub async fn scan_forward(&self) {
        self.scan_by(SCAN_STEP_MS).await;
    }

    /// Seeks backwards, never past the start of the track.
    pub async fn scan_backward(&self) {
        self.scan_by(-SCAN_STEP_MS).await;
    }

    pub async fn pause_or_resume(&self) {
        let Some(state) = self.query("core.playback.get_state", None).await else {
            return;
        };

        let method = match state.as_str() {
            Some("playing") => "core.playback.pause",
            Some("paused") => "core.playback.resume",
            Some("stopped") => "core.playback.play",
            _ => {
                warn!("unexpected playback state {state}; not toggling");
                return;
            }
        };
        self.query(method, None).await;
    }

    /// Puts the configured stream at the head of the tracklist and plays it.
    pub async fn play_favorite_stream(&self) {
        let Some(uri) = self.settings.favorite_stream_uri.as_deref() else {
            debug!("no favorite stream configured");
            return;
        };

        let added = self
            .query(
                "core.tracklist.add",
                Some(json!({ "uris": [uri], "at_position": 0 })),
            )
            .await;

        let tlid = added
            .as_ref()
            .and_then(Value::as_array)
            .and_then(|tracks| tracks.first())
            .and_then(|tl_track| tl_track.get("tlid"))
            .and_then(Value::as_i64);

        match tlid {
            Some(tlid) => {
                self.query("core.playback.play", Some(json!({ "tlid": tlid })))
                    .await;
            }
            None => warn!("adding favorite stream {uri} returned no track"),
        }
    }

    /// Replaces the tracklist with a uniformly chosen album and plays it.
    pub async fn play_random_album(&self) {
        let refs = self
            .query(
                "core.library.browse",
                Some(json!({ "uri": self.settings.album_browse_uri })),
            )
            .await;

        let albums = album_uris(refs.as_ref());
        // The RNG handle is not Send; keep it out of any await.
        let choice = albums.choose(&mut rand::thread_rng()).cloned();

        let Some(album) = choice else {
            warn!(
                "no albums found under {}; nothing to play",
                self.settings.album_browse_uri
            );
            return;
        };

        info!("playing random album {album}");
        self.query("core.tracklist.clear", None).await;
        self.query("core.tracklist.add", Some(json!({ "uris": [album] })))
            .await;
        self.query("core.playback.play", None).await;
    }

    pub async fn mute_unmute(&self) {
        let Some(current) = self.query("core.mixer.get_mute", None).await else {
            return;
        };
        let Some(muted) = current.as_bool() else {
            warn!("unexpected mute value {current}");
            return;
        };
        self.query("core.mixer.set_mute", Some(json!({ "mute": !muted })))
            .await;
    }

    pub async fn volume_up(&self) {
        self.change_volume(i64::from(self.settings.volume_step)).await;
    }

    pub async fn volume_down(&self) {
        self.change_volume(-i64::from(self.settings.volume_step)).await;
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Calls `method`, folding transport failures into "no value".
    async fn query(&self, method: &str, params: Option<Value>) -> Option<Value> {
        self.rpc.call(method, params).await.ok().flatten()
    }

    async fn scan_by(&self, offset_ms: i64) {
        let Some(position) = self.query("core.playback.get_time_position", None).await else {
            return;
        };
        let Some(current) = position.as_i64() else {
            warn!("unexpected time position {position}; not seeking");
            return;
        };

        let target = scan_target(current, offset_ms);
        debug!("seeking from {current}ms to {target}ms");
        self.query(
            "core.playback.seek",
            Some(json!({ "time_position": target })),
        )
        .await;
    }

    async fn change_volume(&self, delta: i64) {
        let Some(volume) = self.query("core.mixer.get_volume", None).await else {
            return;
        };
        let Some(current) = volume.as_i64() else {
            warn!("unexpected volume {volume}; not changing it");
            return;
        };

        let target = volume_target(current, delta);
        if target == current {
            debug!("volume already at {current}; skipping write");
            return;
        }
        self.query("core.mixer.set_volume", Some(json!({ "volume": target })))
            .await;
    }
}

#[async_trait]
impl ActionDispatcher for ActionSet {
    async fn dispatch(&self, action: Action) {
        self.run(action).await;
    }
}

/// Seek target for a scan step; clamped at zero, unbounded above.
fn scan_target(current_ms: i64, offset_ms: i64) -> i64 {
    current_ms.saturating_add(offset_ms).max(0)
}

fn volume_target(current: i64, delta: i64) -> i64 {
    current.saturating_add(delta).clamp(VOLUME_MIN, VOLUME_MAX)
}

/// Extracts album URIs from a `core.library.browse` result (a list of `Ref`s).
fn album_uris(refs: Option<&Value>) -> Vec<String> {
    refs.and_then(Value::as_array)
        .map(|refs| {
            refs.iter()
                .filter(|r| r.get("type").and_then(Value::as_str) == Some("album"))
                .filter_map(|r| r.get("uri").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
