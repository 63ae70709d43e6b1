use super::PlayerCore;
use crate::{
    bindings::{OrientationLockType, TimerId},
    buffer_tracker::buffered_percentage_from_report,
    configuration::PlayerConfiguration,
    controls_visibility::ControlsVisibilityScheduler,
    fullscreen::FullscreenOrientationCoordinator,
    platform::PlayerPlatform,
    playback_state::{PhaseTransition, PlaybackEvent, PlaybackPhase, PlaybackStateController},
    seek_volume::SeekVolumeSync,
    source_resolver::{SourceRequest, SourceResolver},
    utils::url::Url,
    Logger,
};

impl<P: PlayerPlatform> PlayerCore<P> {
    pub(crate) fn new(platform: P, config: PlayerConfiguration) -> Self {
        let mut source_resolver = SourceResolver::new();
        source_resolver.set_query_parameter(config.token_query_parameter.clone());
        platform.attach_fullscreen_listener();
        Self {
            platform,
            config,
            source_resolver,
            current_request: None,
            media_attached: false,
            playback: PlaybackStateController::new(),
            seek_volume: SeekVolumeSync::new(),
            fullscreen: FullscreenOrientationCoordinator::new(),
            fullscreen_listened: true,
            controls: ControlsVisibilityScheduler::new(),
            buffered_percentage: 0.,
        }
    }

    pub(super) fn load_content(&mut self, url: Url, authentication_required: bool) {
        let request = SourceRequest::new(url, authentication_required);
        if self.current_request.as_ref() == Some(&request) && self.playback.has_content() {
            Logger::debug("Core: Content already loaded, ignoring load request");
            return;
        }
        self.load(request);
    }

    pub(super) fn retry(&mut self) {
        match self.current_request.clone() {
            Some(request) => {
                Logger::info("Core: Retrying current content");
                self.source_resolver.invalidate();
                self.load(request);
            }
            None => Logger::warn("Core: Nothing to retry"),
        }
    }

    /// Completely stop playback of the current content if one and free all its associated
    /// resources, resetting the player to its initial state.
    pub(super) fn dispose(&mut self) {
        Logger::info("Core: Disposing player");
        self.stop_current_content();
        self.fullscreen.reset(&self.platform);
        if self.fullscreen_listened {
            self.platform.detach_fullscreen_listener();
            self.fullscreen_listened = false;
        }
        self.current_request = None;
        self.source_resolver.invalidate();
        self.seek_volume = SeekVolumeSync::new();
        self.controls = ControlsVisibilityScheduler::new();
    }

    pub(super) fn toggle_play(&mut self) {
        match self.playback.phase() {
            PlaybackPhase::Playing | PlaybackPhase::Buffering => self.platform.pause(),
            PlaybackPhase::Paused => self.platform.play(),
            phase => Logger::lazy_debug(&|| format!("Core: Cannot toggle play while {phase:?}")),
        }
    }

    pub(super) fn seek_to(&mut self, position: f64) {
        if !self.media_attached || !self.playback.has_content() {
            Logger::debug("Core: No content to seek in");
            return;
        }
        let duration = self.playback.status().duration();
        if let Some(position) = self.seek_volume.seek(&self.platform, position, duration) {
            if self.playback.update_position(position) {
                self.announce_position();
            }
        }
    }

    pub(super) fn set_volume(&mut self, level: f64) {
        if self.seek_volume.set_volume(&self.platform, level) {
            self.platform.announce_volume(self.seek_volume.volume());
        }
    }

    pub(super) fn toggle_mute(&mut self) {
        self.seek_volume.toggle_mute(&self.platform);
        self.platform.announce_volume(self.seek_volume.volume());
    }

    pub(super) fn toggle_fullscreen(&mut self) {
        self.fullscreen.toggle(&self.platform);
    }

    pub(super) fn on_user_interaction(&mut self) {
        if self
            .controls
            .show(&self.platform, self.config.controls_hide_delay_ms)
        {
            self.platform.announce_controls_visibility(true);
        }
    }

    pub(super) fn set_controls_hide_delay(&mut self, delay_ms: f64) {
        if !delay_ms.is_finite() || delay_ms < 0. {
            Logger::lazy_warn(&|| format!("Core: Invalid controls hide delay: {delay_ms}"));
            return;
        }
        self.config.controls_hide_delay_ms = delay_ms;
    }

    pub(super) fn set_token_query_parameter(&mut self, name: String) {
        if name.is_empty() {
            Logger::warn("Core: Empty token query parameter ignored");
            return;
        }
        self.source_resolver.set_query_parameter(name.clone());
        self.config.token_query_parameter = name;
    }

    pub(super) fn set_fullscreen_orientation(&mut self, orientation: OrientationLockType) {
        self.config.fullscreen_orientation = orientation;
    }

    pub(super) fn on_loaded_metadata(&mut self, duration: f64) {
        if self.on_playback_event(PlaybackEvent::MetadataReady { duration }) {
            self.announce_position();
        }
    }

    /// Forward a media element event to the `PlaybackStateController`.
    ///
    /// Returns `true` if the event was considered.
    pub(super) fn on_playback_event(&mut self, event: PlaybackEvent) -> bool {
        if !self.media_attached {
            Logger::lazy_debug(&|| format!("Core: Ignoring {event:?}, no media attached"));
            return false;
        }
        let transition = self.playback.handle(event);
        self.on_phase_transition(transition);
        true
    }

    pub(super) fn on_progress(&mut self, buffered: &[f64]) {
        if !self.media_attached {
            return;
        }
        let status = self.playback.status();
        let percentage =
            buffered_percentage_from_report(status.position(), buffered, status.duration());
        if percentage != self.buffered_percentage {
            self.buffered_percentage = percentage;
            self.platform.announce_buffered_percentage(percentage);
        }
    }

    pub(super) fn on_time_update(&mut self, position: f64) {
        if self.media_attached && self.playback.update_position(position) {
            self.announce_position();
        }
    }

    pub(super) fn on_duration_change(&mut self, duration: f64) {
        if self.media_attached && self.playback.update_duration(duration) {
            self.announce_position();
        }
    }

    pub(super) fn on_volume_change(&mut self, level: f64, muted: bool) {
        if self.seek_volume.on_volume_change(level, muted) {
            self.platform.announce_volume(self.seek_volume.volume());
        }
    }

    pub(super) fn on_fullscreen_change(&mut self, is_fullscreen: bool) {
        if self.fullscreen.on_fullscreen_change(
            &self.platform,
            is_fullscreen,
            self.config.device_profile,
            self.config.fullscreen_orientation,
        ) {
            self.platform.announce_fullscreen(is_fullscreen);
        }
    }

    pub(super) fn on_fullscreen_request_rejected(&mut self, reason: Option<&str>) {
        self.fullscreen.on_fullscreen_request_rejected(reason);
    }

    pub(super) fn on_orientation_lock_rejected(&mut self, reason: Option<&str>) {
        self.fullscreen.on_orientation_lock_rejected(reason);
    }

    pub(super) fn on_pointer_leave(&mut self) {
        if self.controls.on_pointer_leave(
            &self.platform,
            self.config.device_profile.has_fine_pointer,
            self.playback.is_playing(),
        ) {
            self.platform.announce_controls_visibility(false);
        }
    }

    pub(super) fn on_controls_timer_ended(&mut self, id: TimerId) {
        if self.controls.on_timer_ended(id, self.playback.is_playing()) {
            self.platform.announce_controls_visibility(false);
        }
    }

    fn load(&mut self, request: SourceRequest) {
        Logger::lazy_info(&|| {
            format!(
                "Core: Loading {} (authentication required: {})",
                request.url(),
                request.authentication_required()
            )
        });
        self.stop_current_content();
        if !self.fullscreen_listened {
            self.platform.attach_fullscreen_listener();
            self.fullscreen_listened = true;
        }
        self.seek_volume.reset(&self.platform);
        self.platform.announce_volume(self.seek_volume.volume());

        let platform = &self.platform;
        let resolved = self
            .source_resolver
            .resolve(&request, || platform.auth_token());
        self.current_request = Some(request);

        match resolved {
            Err(err) => {
                let transition = self
                    .playback
                    .handle(PlaybackEvent::ResolutionFailed(err));
                self.on_phase_transition(transition);
            }
            Ok(url) => {
                self.platform.attach_media_listeners();
                self.media_attached = true;
                let transition = self.playback.handle(PlaybackEvent::LoadRequested);
                self.on_phase_transition(transition);
                self.announce_position();
                self.platform.load_media(&url);
            }
        }
    }

    /// Stop listening to and unload the current content, if one, and go back to `Idle`.
    fn stop_current_content(&mut self) {
        if self.media_attached {
            self.platform.detach_media_listeners();
            self.platform.unload_media();
            self.media_attached = false;
        }
        self.controls.cancel(&self.platform);
        if self.buffered_percentage != 0. {
            self.buffered_percentage = 0.;
            self.platform.announce_buffered_percentage(0.);
        }
        let transition = self.playback.reset();
        self.on_phase_transition(transition);
    }

    fn on_phase_transition(&mut self, transition: Option<PhaseTransition>) {
        let Some(PhaseTransition { from, to }) = transition else {
            return;
        };
        let error_message = self.playback.status().error().map(|e| e.to_string());
        self.platform.announce_phase(to, error_message.as_deref());

        let was_playing = from == PlaybackPhase::Playing;
        let is_playing = to == PlaybackPhase::Playing;
        if was_playing != is_playing
            && self.controls.on_playing_change(
                &self.platform,
                is_playing,
                self.config.controls_hide_delay_ms,
            )
        {
            self.platform
                .announce_controls_visibility(self.controls.controls_visible());
        }

        if is_playing && from == PlaybackPhase::Paused {
            self.fullscreen.on_playback_start(
                &self.platform,
                self.config.device_profile,
                self.config.fullscreen_orientation,
            );
        }
    }

    fn announce_position(&self) {
        let status = self.playback.status();
        self.platform
            .announce_position(status.position(), status.duration());
    }
}
