use crate::{
    bindings::{TimerId, TimerReason},
    platform::PlayerPlatform,
    Logger,
};

/// Decides whether the control overlay is displayed.
///
/// Controls are shown on any user interaction and hidden once a single countdown, restarted by
/// each interaction, elapses. They are only ever hidden while playing.
pub(crate) struct ControlsVisibilityScheduler {
    controls_visible: bool,

    /// Countdown currently running, at the end of which controls may be hidden.
    armed_timer: Option<TimerId>,
}

impl ControlsVisibilityScheduler {
    pub(crate) fn new() -> Self {
        Self {
            controls_visible: true,
            armed_timer: None,
        }
    }

    pub(crate) fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    /// Show the controls and (re)start the countdown of `delay_ms` milliseconds.
    ///
    /// Returns `true` if the controls were hidden before.
    pub(crate) fn show<P: PlayerPlatform>(&mut self, platform: &P, delay_ms: f64) -> bool {
        self.cancel(platform);
        self.armed_timer = Some(platform.start_timer(delay_ms, TimerReason::ControlsVisibility));
        self.set_visible(true)
    }

    /// To call once a countdown started by this scheduler elapsed.
    ///
    /// Returns `true` if the controls were hidden as a result.
    pub(crate) fn on_timer_ended(&mut self, id: TimerId, is_playing: bool) -> bool {
        if self.armed_timer != Some(id) {
            Logger::debug("Controls: Ignoring outdated timer");
            return false;
        }
        self.armed_timer = None;
        is_playing && self.set_visible(false)
    }

    /// To call when the pointer leaves the player.
    ///
    /// Only hides the controls while playing on devices with a hovering pointer: touch
    /// devices have no reliable "leave" signal.
    ///
    /// Returns `true` if the controls were hidden as a result.
    pub(crate) fn on_pointer_leave<P: PlayerPlatform>(
        &mut self,
        platform: &P,
        has_fine_pointer: bool,
        is_playing: bool,
    ) -> bool {
        if !has_fine_pointer || !is_playing {
            return false;
        }
        self.cancel(platform);
        self.set_visible(false)
    }

    /// To call each time playback starts or stops progressing.
    ///
    /// Starting playback re-arms the countdown, anything else keeps the controls visible
    /// until playback progresses again.
    ///
    /// Returns `true` if the visibility changed.
    pub(crate) fn on_playing_change<P: PlayerPlatform>(
        &mut self,
        platform: &P,
        is_playing: bool,
        delay_ms: f64,
    ) -> bool {
        if is_playing {
            self.show(platform, delay_ms)
        } else {
            self.cancel(platform);
            self.set_visible(true)
        }
    }

    /// Clear the pending countdown, if one.
    pub(crate) fn cancel<P: PlayerPlatform>(&mut self, platform: &P) {
        if let Some(id) = self.armed_timer.take() {
            platform.clear_timer(id);
        }
    }

    fn set_visible(&mut self, visible: bool) -> bool {
        let changed = self.controls_visible != visible;
        self.controls_visible = visible;
        changed
    }
}
