use crate::{
    bindings::{
        jsAnnounceBufferedPercentage, jsAnnounceControlsVisibility, jsAnnounceFullscreen,
        jsAnnouncePhase, jsAnnouncePosition, jsAnnounceVolume, jsAttachFullscreenListener,
        jsAttachMediaListeners, jsClearTimer, jsDetachFullscreenListener, jsDetachMediaListeners, jsExitFullscreen, jsGetAuthToken, jsLoadMedia,
        jsLockOrientation, jsPause, jsPlay, jsRequestFullscreen, jsSeek, jsSetMuted,
        jsSetVolume, jsTimer, jsUnloadMedia, jsUnlockOrientation, JsResult,
        OrientationLockType, TimerId, TimerReason,
    },
    fullscreen::{FullscreenRequestError, OrientationLockError},
    playback_state::PlaybackPhase,
    seek_volume::VolumeState,
    utils::url::Url,
};

#[cfg(test)]
pub(crate) mod test_utils;

/// Every primitive the `PlayerCore` relies on which is owned by the hosting environment:
/// the media element, the fullscreen and screen orientation APIs, timers, the session's
/// credentials and the view rendering the player's state.
///
/// Calls are fire-and-forget: asynchronous outcomes come back later through the
/// `PlayerController`'s event listeners.
pub(crate) trait PlayerPlatform {
    /// Start forwarding media element events.
    fn attach_media_listeners(&self);
    /// Stop forwarding media element events.
    fn detach_media_listeners(&self);
    /// Start forwarding fullscreen mode changes, whatever the media element's state.
    fn attach_fullscreen_listener(&self);
    fn detach_fullscreen_listener(&self);
    fn load_media(&self, url: &Url);
    fn unload_media(&self);
    fn play(&self);
    fn pause(&self);
    fn seek(&self, position: f64);
    fn set_volume(&self, level: f64);
    fn set_muted(&self, muted: bool);

    fn request_fullscreen(&self) -> Result<(), FullscreenRequestError>;
    fn exit_fullscreen(&self) -> Result<(), FullscreenRequestError>;

    fn lock_orientation(&self, orientation: OrientationLockType)
        -> Result<(), OrientationLockError>;
    fn unlock_orientation(&self) -> Result<(), OrientationLockError>;

    fn start_timer(&self, duration_ms: f64, reason: TimerReason) -> TimerId;
    fn clear_timer(&self, id: TimerId);

    /// Bearer token of the current session, if one.
    fn auth_token(&self) -> Option<String>;

    fn announce_phase(&self, phase: PlaybackPhase, error_message: Option<&str>);
    fn announce_position(&self, position: f64, duration: Option<f64>);
    fn announce_volume(&self, volume: VolumeState);
    fn announce_buffered_percentage(&self, percentage: f64);
    fn announce_controls_visibility(&self, visible: bool);
    fn announce_fullscreen(&self, is_fullscreen: bool);
}

/// `PlayerPlatform` implementation relying on the JavaScript functions imported through
/// `wasm-bindgen`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct JsPlatform;

impl PlayerPlatform for JsPlatform {
    fn attach_media_listeners(&self) {
        jsAttachMediaListeners();
    }

    fn detach_media_listeners(&self) {
        jsDetachMediaListeners();
    }

    fn attach_fullscreen_listener(&self) {
        jsAttachFullscreenListener();
    }

    fn detach_fullscreen_listener(&self) {
        jsDetachFullscreenListener();
    }

    fn load_media(&self, url: &Url) {
        jsLoadMedia(url.get_ref());
    }

    fn unload_media(&self) {
        jsUnloadMedia();
    }

    fn play(&self) {
        jsPlay();
    }

    fn pause(&self) {
        jsPause();
    }

    fn seek(&self, position: f64) {
        jsSeek(position);
    }

    fn set_volume(&self, level: f64) {
        jsSetVolume(level);
    }

    fn set_muted(&self, muted: bool) {
        jsSetMuted(muted);
    }

    fn request_fullscreen(&self) -> Result<(), FullscreenRequestError> {
        Ok(jsRequestFullscreen().result()?)
    }

    fn exit_fullscreen(&self) -> Result<(), FullscreenRequestError> {
        Ok(jsExitFullscreen().result()?)
    }

    fn lock_orientation(
        &self,
        orientation: OrientationLockType,
    ) -> Result<(), OrientationLockError> {
        Ok(jsLockOrientation(orientation).result()?)
    }

    fn unlock_orientation(&self) -> Result<(), OrientationLockError> {
        Ok(jsUnlockOrientation().result()?)
    }

    fn start_timer(&self, duration_ms: f64, reason: TimerReason) -> TimerId {
        jsTimer(duration_ms, reason)
    }

    fn clear_timer(&self, id: TimerId) {
        jsClearTimer(id);
    }

    fn auth_token(&self) -> Option<String> {
        jsGetAuthToken()
    }

    fn announce_phase(&self, phase: PlaybackPhase, error_message: Option<&str>) {
        jsAnnouncePhase(phase, error_message);
    }

    fn announce_position(&self, position: f64, duration: Option<f64>) {
        jsAnnouncePosition(position, duration);
    }

    fn announce_volume(&self, volume: VolumeState) {
        jsAnnounceVolume(volume.level(), volume.muted());
    }

    fn announce_buffered_percentage(&self, percentage: f64) {
        jsAnnounceBufferedPercentage(percentage);
    }

    fn announce_controls_visibility(&self, visible: bool) {
        jsAnnounceControlsVisibility(visible);
    }

    fn announce_fullscreen(&self, is_fullscreen: bool) {
        jsAnnounceFullscreen(is_fullscreen);
    }
}
