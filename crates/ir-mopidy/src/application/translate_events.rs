//! EventTranslator: turns raw key events into action dispatches.
//!
//! The translator owns the [`KeyMapTable`] and the one-shot
//! [`SuppressionState`].  For every `(direction, keycode)` pair it:
//!
//! 1. Swallows the pair if it matches the armed suppression (and disarms it).
//! 2. Otherwise looks the pair up; unknown or explicitly unmapped keys are
//!    ignored.
//! 3. Otherwise runs the bound action to completion and, afterwards, arms the
//!    binding's `suppress_next` rule (replacing any older one).
//!
//! # Why one event at a time?
//!
//! Actions are read-modify-write against Mopidy.  Two `volume_up` calls that
//! overlap would both read 40 and both write 45.  The translator therefore
//! awaits each dispatch before it reads the next event; pending kernel events
//! queue in the device buffer meanwhile.

use std::sync::Arc;

use async_trait::async_trait;
use ir_mopidy_core::{Action, KeyMapTable, KeyPress, RawKeyEvent, SuppressionState};
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::infrastructure::key_source::{KeyEventSource, SourceError};

/// Error type for the translation loop.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("key source failed: {0}")]
    Source(#[from] SourceError),
}

/// Runs actions on behalf of the translator.
///
/// Production wires in [`crate::application::actions::ActionSet`]; tests use
/// recording doubles.
#[async_trait]
pub trait ActionDispatcher: Send + Sync {
    /// Runs `action` to completion.  Failures are handled by the dispatcher.
    async fn dispatch(&self, action: Action);
}

/// What happened to a single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Swallowed by the armed suppression rule.
    Suppressed,
    /// No binding exists for the press.
    Unbound,
    /// A binding exists but maps to no action.
    Unmapped,
    /// The bound action ran.
    Dispatched(Action),
}

/// The key-event state machine.
pub struct EventTranslator {
    table: KeyMapTable,
    dispatcher: Arc<dyn ActionDispatcher>,
    suppression: SuppressionState,
}

impl EventTranslator {
    /// Creates a translator with an empty suppression slot.
    pub fn new(table: KeyMapTable, dispatcher: Arc<dyn ActionDispatcher>) -> Self {
        Self {
            table,
            dispatcher,
            suppression: SuppressionState::new(),
        }
    }

    /// The currently armed suppression, if any.
    pub fn pending_suppression(&self) -> Option<&KeyPress> {
        self.suppression.pending()
    }

    /// Processes one `(direction, keycode)` pair.
    pub async fn handle_press(&mut self, press: KeyPress) -> PressOutcome {
        if self.suppression.consume_if_matches(&press) {
            debug!("suppressed {press}");
            return PressOutcome::Suppressed;
        }

        let Some(binding) = self.table.get(&press) else {
            debug!("no binding for {press}");
            return PressOutcome::Unbound;
        };
        let Some(action) = binding.action else {
            debug!("{press} is explicitly unmapped");
            return PressOutcome::Unmapped;
        };
        let suppress_next = binding.suppress_next.clone();

        info!("{press} -> {action}");
        self.dispatcher.dispatch(action).await;

        if let Some(next) = suppress_next {
            debug!("will suppress next {next}");
            self.suppression.arm(next);
        }
        PressOutcome::Dispatched(action)
    }

    /// Processes every alias of `event` in reported order.
    pub async fn handle_event(&mut self, event: &RawKeyEvent) -> Vec<PressOutcome> {
        let mut outcomes = Vec::with_capacity(event.keycodes.len());
        for press in event.presses() {
            outcomes.push(self.handle_press(press).await);
        }
        outcomes
    }

    /// Reads events from `source` until it is exhausted or fails.
    ///
    /// Returns `Ok(())` when the source reports end of stream.
    pub async fn run<S>(&mut self, source: &mut S) -> Result<(), TranslateError>
    where
        S: KeyEventSource + ?Sized,
    {
        while let Some(event) = source.next_event().await? {
            trace!("raw event {:?} {:?}", event.direction, event.keycodes);
            self.handle_event(&event).await;
        }
        info!("key source closed");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::key_source::mock::MockKeySource;
    use ir_mopidy_core::{BindingSpec, KeyDirection};
    use std::sync::Mutex;

    use KeyDirection::{Press, Release, Repeat};

    // ── Test doubles ──────────────────────────────────────────────────────────

    #[derive(Default)]
    struct RecordingDispatcher {
        dispatched: Mutex<Vec<Action>>,
    }

    impl RecordingDispatcher {
        fn actions(&self) -> Vec<Action> {
            self.dispatched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ActionDispatcher for RecordingDispatcher {
        async fn dispatch(&self, action: Action) {
            self.dispatched.lock().unwrap().push(action);
        }
    }

    fn spec(direction: KeyDirection, key: &str, callback: Option<&str>) -> BindingSpec {
        BindingSpec {
            key: KeyPress::new(direction, key),
            callback: callback.map(str::to_string),
            skip_next: None,
        }
    }

    fn spec_skipping(
        direction: KeyDirection,
        key: &str,
        callback: &str,
        skip: (KeyDirection, &str),
    ) -> BindingSpec {
        BindingSpec {
            skip_next: Some(KeyPress::new(skip.0, skip.1)),
            ..spec(direction, key, Some(callback))
        }
    }

    fn translator(specs: Vec<BindingSpec>) -> (EventTranslator, Arc<RecordingDispatcher>) {
        let table = KeyMapTable::build(specs).expect("valid bindings");
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let translator = EventTranslator::new(table, Arc::clone(&dispatcher) as Arc<dyn ActionDispatcher>);
        (translator, dispatcher)
    }

    /// The classic remote layout: tap RIGHT for next track, hold RIGHT to scan.
    fn hold_to_scan_bindings() -> Vec<BindingSpec> {
        vec![
            spec(Release, "KEY_RIGHT", Some("next_track")),
            spec_skipping(Repeat, "KEY_RIGHT", "scan_forward", (Release, "KEY_RIGHT")),
            spec(Release, "KEY_LEFT", Some("previous_track")),
            spec_skipping(Repeat, "KEY_LEFT", "scan_backward", (Release, "KEY_LEFT")),
        ]
    }

    // ── Dispatch ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_bound_press_dispatches_action() {
        // Arrange
        let (mut translator, dispatcher) =
            translator(vec![spec(Press, "KEY_VOLUMEUP", Some("volume_up"))]);

        // Act
        let outcome = translator
            .handle_press(KeyPress::new(Press, "KEY_VOLUMEUP"))
            .await;

        // Assert
        assert_eq!(outcome, PressOutcome::Dispatched(Action::VolumeUp));
        assert_eq!(dispatcher.actions(), vec![Action::VolumeUp]);
    }

    #[tokio::test]
    async fn test_unbound_press_is_ignored() {
        let (mut translator, dispatcher) =
            translator(vec![spec(Press, "KEY_VOLUMEUP", Some("volume_up"))]);

        let outcome = translator
            .handle_press(KeyPress::new(Release, "KEY_VOLUMEUP"))
            .await;

        assert_eq!(outcome, PressOutcome::Unbound);
        assert!(dispatcher.actions().is_empty());
    }

    #[tokio::test]
    async fn test_null_binding_dispatches_nothing() {
        let (mut translator, dispatcher) = translator(vec![spec(Press, "KEY_OK", None)]);

        let outcome = translator.handle_press(KeyPress::new(Press, "KEY_OK")).await;

        assert_eq!(outcome, PressOutcome::Unmapped);
        assert!(dispatcher.actions().is_empty());
    }

    // ── Suppression ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_hold_then_release_scans_without_skipping_track() {
        // Arrange
        let (mut translator, dispatcher) = translator(hold_to_scan_bindings());

        // Act – press, two repeats, release
        translator.handle_press(KeyPress::new(Press, "KEY_RIGHT")).await;
        translator.handle_press(KeyPress::new(Repeat, "KEY_RIGHT")).await;
        translator.handle_press(KeyPress::new(Repeat, "KEY_RIGHT")).await;
        let release = translator
            .handle_press(KeyPress::new(Release, "KEY_RIGHT"))
            .await;

        // Assert
        assert_eq!(release, PressOutcome::Suppressed);
        assert_eq!(
            dispatcher.actions(),
            vec![Action::ScanForward, Action::ScanForward]
        );
        assert!(translator.pending_suppression().is_none());
    }

    #[tokio::test]
    async fn test_tap_without_hold_skips_track() {
        let (mut translator, dispatcher) = translator(hold_to_scan_bindings());

        translator.handle_press(KeyPress::new(Press, "KEY_RIGHT")).await;
        translator.handle_press(KeyPress::new(Release, "KEY_RIGHT")).await;

        assert_eq!(dispatcher.actions(), vec![Action::NextTrack]);
    }

    #[tokio::test]
    async fn test_suppression_is_one_shot() {
        // Arrange
        let (mut translator, dispatcher) = translator(hold_to_scan_bindings());

        // Act – hold+release, then a plain tap
        translator.handle_press(KeyPress::new(Repeat, "KEY_RIGHT")).await;
        translator.handle_press(KeyPress::new(Release, "KEY_RIGHT")).await;
        translator.handle_press(KeyPress::new(Release, "KEY_RIGHT")).await;

        // Assert
        assert_eq!(
            dispatcher.actions(),
            vec![Action::ScanForward, Action::NextTrack]
        );
    }

    #[tokio::test]
    async fn test_newer_suppression_replaces_older() {
        // Arrange
        let (mut translator, dispatcher) = translator(hold_to_scan_bindings());

        // Act – hold RIGHT arms "UP KEY_RIGHT", hold LEFT replaces it with "UP KEY_LEFT"
        translator.handle_press(KeyPress::new(Repeat, "KEY_RIGHT")).await;
        translator.handle_press(KeyPress::new(Repeat, "KEY_LEFT")).await;
        let right = translator
            .handle_press(KeyPress::new(Release, "KEY_RIGHT"))
            .await;
        let left = translator
            .handle_press(KeyPress::new(Release, "KEY_LEFT"))
            .await;

        // Assert
        assert_eq!(right, PressOutcome::Dispatched(Action::NextTrack));
        assert_eq!(left, PressOutcome::Suppressed);
        assert_eq!(
            dispatcher.actions(),
            vec![Action::ScanForward, Action::ScanBackward, Action::NextTrack]
        );
    }

    #[tokio::test]
    async fn test_non_matching_press_leaves_suppression_armed() {
        let (mut translator, dispatcher) = translator(vec![
            spec_skipping(Repeat, "KEY_RIGHT", "scan_forward", (Release, "KEY_RIGHT")),
            spec(Press, "KEY_MUTE", Some("mute_unmute")),
        ]);

        translator.handle_press(KeyPress::new(Repeat, "KEY_RIGHT")).await;
        translator.handle_press(KeyPress::new(Press, "KEY_MUTE")).await;

        assert_eq!(
            translator.pending_suppression(),
            Some(&KeyPress::new(Release, "KEY_RIGHT"))
        );
        assert_eq!(
            dispatcher.actions(),
            vec![Action::ScanForward, Action::MuteUnmute]
        );
    }

    #[tokio::test]
    async fn test_suppression_applies_to_unbound_press() {
        // The suppressed pair need not be bound itself
        let (mut translator, _dispatcher) = translator(vec![spec_skipping(
            Press,
            "KEY_PLAY",
            "pause_or_resume",
            (Release, "KEY_PLAY"),
        )]);

        translator.handle_press(KeyPress::new(Press, "KEY_PLAY")).await;
        let outcome = translator
            .handle_press(KeyPress::new(Release, "KEY_PLAY"))
            .await;

        assert_eq!(outcome, PressOutcome::Suppressed);
    }

    #[tokio::test]
    async fn test_unmapped_binding_does_not_arm_suppression() {
        let (mut translator, _dispatcher) = translator(vec![BindingSpec {
            key: KeyPress::new(Press, "KEY_OK"),
            callback: None,
            skip_next: Some(KeyPress::new(Release, "KEY_OK")),
        }]);

        translator.handle_press(KeyPress::new(Press, "KEY_OK")).await;

        assert!(translator.pending_suppression().is_none());
    }

    // ── Aliases ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_each_alias_is_processed_in_order() {
        // Arrange – both names of code 113 are bound
        let (mut translator, dispatcher) = translator(vec![
            spec(Press, "KEY_MIN_INTERESTING", Some("pause_or_resume")),
            spec(Press, "KEY_MUTE", Some("mute_unmute")),
        ]);
        let event = RawKeyEvent::with_aliases(["KEY_MIN_INTERESTING", "KEY_MUTE"], Press);

        // Act
        let outcomes = translator.handle_event(&event).await;

        // Assert
        assert_eq!(
            outcomes,
            vec![
                PressOutcome::Dispatched(Action::PauseOrResume),
                PressOutcome::Dispatched(Action::MuteUnmute),
            ]
        );
        assert_eq!(
            dispatcher.actions(),
            vec![Action::PauseOrResume, Action::MuteUnmute]
        );
    }

    #[tokio::test]
    async fn test_suppression_armed_by_first_alias_can_swallow_second() {
        let (mut translator, dispatcher) = translator(vec![
            spec_skipping(Press, "KEY_MIN_INTERESTING", "mute_unmute", (Press, "KEY_MUTE")),
            spec(Press, "KEY_MUTE", Some("mute_unmute")),
        ]);
        let event = RawKeyEvent::with_aliases(["KEY_MIN_INTERESTING", "KEY_MUTE"], Press);

        let outcomes = translator.handle_event(&event).await;

        assert_eq!(outcomes[1], PressOutcome::Suppressed);
        assert_eq!(dispatcher.actions(), vec![Action::MuteUnmute]);
    }

    // ── Run loop ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_run_consumes_source_until_closed() {
        // Arrange
        let (mut translator, dispatcher) = translator(hold_to_scan_bindings());
        let mut source = MockKeySource::from_events([
            RawKeyEvent::new("KEY_LEFT", Press),
            RawKeyEvent::new("KEY_LEFT", Repeat),
            RawKeyEvent::new("KEY_LEFT", Release),
            RawKeyEvent::new("KEY_RIGHT", Press),
            RawKeyEvent::new("KEY_RIGHT", Release),
        ]);

        // Act
        let result = translator.run(&mut source).await;

        // Assert
        tokio_test::assert_ok!(result);
        assert_eq!(
            dispatcher.actions(),
            vec![Action::ScanBackward, Action::NextTrack]
        );
    }

    #[tokio::test]
    async fn test_run_surfaces_source_errors() {
        let (mut translator, _dispatcher) = translator(Vec::new());
        let (injector, mut source) = crate::infrastructure::key_source::mock::channel();
        injector.inject_error(SourceError::Read(std::io::Error::new(
            std::io::ErrorKind::Other,
            "device unplugged",
        )));

        let result = translator.run(&mut source).await;

        assert!(matches!(
            result,
            Err(TranslateError::Source(SourceError::Read(_)))
        ));
    }
}
