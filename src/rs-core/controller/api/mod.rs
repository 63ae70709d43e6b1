use crate::{
    bindings::OrientationLockType,
    configuration::{DeviceProfile, PlayerConfiguration},
    platform::JsPlatform,
    playback_state::PlaybackPhase,
    utils::{logger::LoggerLevel, url::Url},
    wasm_bindgen, Logger,
};

use super::{PlayerController, PlayerCore};

/// Methods exposed to the JavaScript-side.
///
/// Note that these are not the only methods callable by JavaScript. There's
/// also "event_listeners" which as its name point at, should be called when particular
/// events happen. Such "event_listeners" are defined in its own file.
#[wasm_bindgen]
impl PlayerController {
    /// Create a new `PlayerController` for the media element linked to it on the
    /// JavaScript-side.
    ///
    /// # Arguments
    ///
    /// * `is_mobile` - `true` on phones and tablets, whose screen orientation will be locked
    ///   when fullscreen mode is entered or playback begins.
    ///
    /// * `has_fine_pointer` - `true` if the device has a hovering pointer, in which case the
    ///   controls are hidden when the pointer leaves the player.
    #[wasm_bindgen(constructor)]
    pub fn new(is_mobile: bool, has_fine_pointer: bool) -> Self {
        let config = PlayerConfiguration::new(DeviceProfile {
            is_mobile,
            has_fine_pointer,
        });
        Self {
            core: PlayerCore::new(JsPlatform, config),
        }
    }

    /// Start loading a new content.
    ///
    /// Does nothing if that same content, with the same `authentication_required` flag, is
    /// already loaded and not in error.
    ///
    /// # Arguments
    ///
    /// * `url` - Locator of the media resource.
    ///
    /// * `authentication_required` - If `true`, the session's token is added to the locator
    ///   and playback fails right away if no token is available.
    pub fn load_content(&mut self, url: String, authentication_required: bool) {
        self.core.load_content(Url::new(url), authentication_required);
    }

    /// Load again the last content asked for, from scratch.
    pub fn retry(&mut self) {
        self.core.retry();
    }

    /// Stop the current content and release every resource linked to it.
    ///
    /// To call when the player's view is removed.
    pub fn dispose(&mut self) {
        self.core.dispose();
    }

    /// Pause if playing, play if paused.
    pub fn toggle_play(&mut self) {
        self.core.toggle_play();
    }

    /// Move the playhead to the given position, in seconds.
    pub fn seek_to(&mut self, position: f64) {
        self.core.seek_to(position);
    }

    /// Set the volume, from `0` to `1`. `0` also mutes.
    pub fn set_volume(&mut self, level: f64) {
        self.core.set_volume(level);
    }

    pub fn toggle_mute(&mut self) {
        self.core.toggle_mute();
    }

    /// Ask to enter fullscreen mode if not in it, to exit it otherwise.
    pub fn toggle_fullscreen(&mut self) {
        self.core.toggle_fullscreen();
    }

    /// The JS code should call this method on any pointer movement, click or tap over the
    /// player.
    pub fn on_user_interaction(&mut self) {
        self.core.on_user_interaction();
    }

    pub fn set_controls_hide_delay(&mut self, delay_ms: f64) {
        self.core.set_controls_hide_delay(delay_ms);
    }

    pub fn set_token_query_parameter(&mut self, name: String) {
        self.core.set_token_query_parameter(name);
    }

    pub fn set_fullscreen_orientation(&mut self, orientation: OrientationLockType) {
        self.core.set_fullscreen_orientation(orientation);
    }

    pub fn set_log_level(&mut self, level: LoggerLevel) {
        Logger::set_logger_level(level);
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.core.playback.phase()
    }

    /// Message to display to the user, only set in the `Errored` phase.
    pub fn error_message(&self) -> Option<String> {
        self.core.playback.status().error().map(|e| e.to_string())
    }

    pub fn position(&self) -> f64 {
        self.core.playback.status().position()
    }

    /// Duration of the content in seconds, `None` when not known.
    pub fn duration(&self) -> Option<f64> {
        self.core.playback.status().duration()
    }

    pub fn volume(&self) -> f64 {
        self.core.seek_volume.volume().level()
    }

    pub fn is_muted(&self) -> bool {
        self.core.seek_volume.volume().muted()
    }

    /// Volume actually heard: `0` when muted, the volume level otherwise.
    pub fn effective_volume(&self) -> f64 {
        self.core.seek_volume.volume().effective()
    }

    pub fn controls_visible(&self) -> bool {
        self.core.controls.controls_visible()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.core.fullscreen.is_fullscreen()
    }

    pub fn is_orientation_locked(&self) -> bool {
        self.core.fullscreen.orientation_locked()
    }

    pub fn buffered_percentage(&self) -> f64 {
        self.core.buffered_percentage
    }
}
