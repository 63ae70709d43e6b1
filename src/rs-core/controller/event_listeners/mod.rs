use crate::{
    bindings::{TimerId, TimerReason},
    playback_state::PlaybackEvent,
    wasm_bindgen,
};

use super::PlayerController;

/// Methods triggered on JavaScript events by the JavaScript code.
///
/// Media element events are only forwarded between the `jsAttachMediaListeners` and
/// `jsDetachMediaListeners` calls. Fullscreen changes are forwarded from the
/// `PlayerController`'s creation until its `dispose` method is called.
#[wasm_bindgen]
impl PlayerController {
    /// The JS code should call this method when the media element emits a
    /// `loadedmetadata` event.
    ///
    /// # Arguments
    ///
    /// * `duration` - The media element's `duration` attribute, which may be `NaN` or
    ///   `Infinity`.
    pub fn on_loaded_metadata(&mut self, duration: f64) {
        self.core.on_loaded_metadata(duration);
    }

    /// The JS code should call this method when the media element emits a `play` or
    /// `playing` event.
    pub fn on_play(&mut self) {
        self.core.on_playback_event(PlaybackEvent::Play);
    }

    /// The JS code should call this method when the media element emits a `pause` event.
    pub fn on_pause(&mut self) {
        self.core.on_playback_event(PlaybackEvent::Pause);
    }

    /// The JS code should call this method when the media element emits a `waiting` or
    /// `stalled` event.
    pub fn on_stalled(&mut self) {
        self.core.on_playback_event(PlaybackEvent::Stall);
    }

    /// The JS code should call this method when the media element emits a `canplay` event.
    pub fn on_can_play(&mut self) {
        self.core.on_playback_event(PlaybackEvent::ReadyToPlay);
    }

    /// The JS code should call this method when the media element emits an `error` event.
    ///
    /// # Arguments
    ///
    /// * `detail` - The media element's `error.message`, if one. Only used for logging.
    pub fn on_media_error(&mut self, detail: Option<String>) {
        self.core
            .on_playback_event(PlaybackEvent::MediaError { detail });
    }

    /// The JS code should call this method when the Promise returned by the media element's
    /// `play` method, called through `jsPlay`, rejects.
    ///
    /// # Arguments
    ///
    /// * `reason` - Description of the rejection, if one.
    pub fn on_play_rejected(&mut self, reason: Option<String>) {
        self.core
            .on_playback_event(PlaybackEvent::PlayRejected { reason });
    }

    /// The JS code should call this method when the media element emits a `progress` event.
    ///
    /// # Arguments
    ///
    /// * `buffered` - The media element's `buffered` ranges, flattened as
    ///   `[start0, end0, start1, end1, ...]`, in seconds.
    pub fn on_progress(&mut self, buffered: &[f64]) {
        self.core.on_progress(buffered);
    }

    /// The JS code should call this method when the media element emits a `timeupdate`
    /// event.
    pub fn on_time_update(&mut self, position: f64) {
        self.core.on_time_update(position);
    }

    /// The JS code should call this method when the media element emits a
    /// `durationchange` event.
    pub fn on_duration_change(&mut self, duration: f64) {
        self.core.on_duration_change(duration);
    }

    /// The JS code should call this method when the media element emits a `volumechange`
    /// event.
    pub fn on_volume_change(&mut self, level: f64, muted: bool) {
        self.core.on_volume_change(level, muted);
    }

    /// The JS code should call this method when the document emits a `fullscreenchange`
    /// event, whatever triggered it (including the platform's own gestures), between the
    /// `jsAttachFullscreenListener` and `jsDetachFullscreenListener` calls.
    pub fn on_fullscreen_change(&mut self, is_fullscreen: bool) {
        self.core.on_fullscreen_change(is_fullscreen);
    }

    /// The JS code should call this method when the Promise returned by a fullscreen request
    /// or exit, made through `jsRequestFullscreen` or `jsExitFullscreen`, rejects.
    pub fn on_fullscreen_request_rejected(&mut self, reason: Option<String>) {
        self.core.on_fullscreen_request_rejected(reason.as_deref());
    }

    /// The JS code should call this method when the Promise returned by an orientation lock,
    /// made through `jsLockOrientation`, rejects.
    pub fn on_orientation_lock_rejected(&mut self, reason: Option<String>) {
        self.core.on_orientation_lock_rejected(reason.as_deref());
    }

    /// The JS code should call this method when the pointer leaves the player's bounds.
    pub fn on_pointer_leave(&mut self) {
        self.core.on_pointer_leave();
    }

    /// The JS code should call this method each time a timer started with the `jsTimer`
    /// function finished.
    ///
    /// # Arguments
    ///
    /// * `id` - The `TimerId` given by `jsTimer` when the timer was
    ///   started. This allows the `PlayerController` to identify which timer
    ///   actually finished.
    ///
    /// * `reason` - The `TimerReason` given by the Rust code when that timer
    ///   was started.
    pub fn on_timer_ended(&mut self, id: TimerId, reason: TimerReason) {
        match reason {
            TimerReason::ControlsVisibility => self.core.on_controls_timer_ended(id),
        }
    }
}
