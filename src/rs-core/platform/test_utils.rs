use std::cell::{Cell, RefCell};

use super::PlayerPlatform;
use crate::{
    bindings::{OrientationLockType, TimerId, TimerReason},
    fullscreen::{FullscreenRequestError, OrientationLockError},
    playback_state::PlaybackPhase,
    seek_volume::VolumeState,
    utils::url::Url,
};

/// A call made by the `PlayerCore` to its platform.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum PlatformCall {
    AttachMediaListeners,
    DetachMediaListeners,
    AttachFullscreenListener,
    DetachFullscreenListener,
    LoadMedia(String),
    UnloadMedia,
    Play,
    Pause,
    Seek(f64),
    SetVolume(f64),
    SetMuted(bool),
    RequestFullscreen,
    ExitFullscreen,
    LockOrientation(OrientationLockType),
    UnlockOrientation,
    StartTimer(TimerId, f64),
    ClearTimer(TimerId),
    AnnouncePhase(PlaybackPhase, Option<String>),
    AnnouncePosition(f64, Option<f64>),
    AnnounceVolume(f64, bool),
    AnnounceBufferedPercentage(f64),
    AnnounceControlsVisibility(bool),
    AnnounceFullscreen(bool),
}

/// `PlayerPlatform` recording every call made to it, whose failures can be scripted.
#[derive(Default)]
pub(crate) struct FakePlatform {
    calls: RefCell<Vec<PlatformCall>>,
    next_timer_id: Cell<TimerId>,
    pub(crate) token: RefCell<Option<String>>,
    pub(crate) orientation_error: RefCell<Option<OrientationLockError>>,
    pub(crate) fullscreen_error: RefCell<Option<FullscreenRequestError>>,
}

impl FakePlatform {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_token(token: &str) -> Self {
        let platform = Self::new();
        platform.set_token(Some(token));
        platform
    }

    pub(crate) fn set_token(&self, token: Option<&str>) {
        *self.token.borrow_mut() = token.map(str::to_owned);
    }

    pub(crate) fn fail_orientation_lock(&self, err: OrientationLockError) {
        *self.orientation_error.borrow_mut() = Some(err);
    }

    pub(crate) fn fail_fullscreen(&self, err: FullscreenRequestError) {
        *self.fullscreen_error.borrow_mut() = Some(err);
    }

    pub(crate) fn calls(&self) -> Vec<PlatformCall> {
        self.calls.borrow().clone()
    }

    /// Returns and forget every call recorded until now.
    pub(crate) fn take_calls(&self) -> Vec<PlatformCall> {
        self.calls.take()
    }

    pub(crate) fn count(&self, predicate: impl Fn(&PlatformCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| predicate(c)).count()
    }

    /// Id of the last timer started, if one.
    pub(crate) fn last_timer(&self) -> Option<TimerId> {
        self.calls.borrow().iter().rev().find_map(|c| match c {
            PlatformCall::StartTimer(id, _) => Some(*id),
            _ => None,
        })
    }

    fn record(&self, call: PlatformCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl PlayerPlatform for FakePlatform {
    fn attach_media_listeners(&self) {
        self.record(PlatformCall::AttachMediaListeners);
    }

    fn detach_media_listeners(&self) {
        self.record(PlatformCall::DetachMediaListeners);
    }

    fn attach_fullscreen_listener(&self) {
        self.record(PlatformCall::AttachFullscreenListener);
    }

    fn detach_fullscreen_listener(&self) {
        self.record(PlatformCall::DetachFullscreenListener);
    }

    fn load_media(&self, url: &Url) {
        self.record(PlatformCall::LoadMedia(url.get_ref().to_owned()));
    }

    fn unload_media(&self) {
        self.record(PlatformCall::UnloadMedia);
    }

    fn play(&self) {
        self.record(PlatformCall::Play);
    }

    fn pause(&self) {
        self.record(PlatformCall::Pause);
    }

    fn seek(&self, position: f64) {
        self.record(PlatformCall::Seek(position));
    }

    fn set_volume(&self, level: f64) {
        self.record(PlatformCall::SetVolume(level));
    }

    fn set_muted(&self, muted: bool) {
        self.record(PlatformCall::SetMuted(muted));
    }

    fn request_fullscreen(&self) -> Result<(), FullscreenRequestError> {
        self.record(PlatformCall::RequestFullscreen);
        match self.fullscreen_error.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn exit_fullscreen(&self) -> Result<(), FullscreenRequestError> {
        self.record(PlatformCall::ExitFullscreen);
        match self.fullscreen_error.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn lock_orientation(
        &self,
        orientation: OrientationLockType,
    ) -> Result<(), OrientationLockError> {
        self.record(PlatformCall::LockOrientation(orientation));
        match self.orientation_error.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn unlock_orientation(&self) -> Result<(), OrientationLockError> {
        self.record(PlatformCall::UnlockOrientation);
        match self.orientation_error.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn start_timer(&self, duration_ms: f64, _reason: TimerReason) -> TimerId {
        let id = self.next_timer_id.get() + 1.;
        self.next_timer_id.set(id);
        self.record(PlatformCall::StartTimer(id, duration_ms));
        id
    }

    fn clear_timer(&self, id: TimerId) {
        self.record(PlatformCall::ClearTimer(id));
    }

    fn auth_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn announce_phase(&self, phase: PlaybackPhase, error_message: Option<&str>) {
        self.record(PlatformCall::AnnouncePhase(
            phase,
            error_message.map(str::to_owned),
        ));
    }

    fn announce_position(&self, position: f64, duration: Option<f64>) {
        self.record(PlatformCall::AnnouncePosition(position, duration));
    }

    fn announce_volume(&self, volume: VolumeState) {
        self.record(PlatformCall::AnnounceVolume(volume.level(), volume.muted()));
    }

    fn announce_buffered_percentage(&self, percentage: f64) {
        self.record(PlatformCall::AnnounceBufferedPercentage(percentage));
    }

    fn announce_controls_visibility(&self, visible: bool) {
        self.record(PlatformCall::AnnounceControlsVisibility(visible));
    }

    fn announce_fullscreen(&self, is_fullscreen: bool) {
        self.record(PlatformCall::AnnounceFullscreen(is_fullscreen));
    }
}
