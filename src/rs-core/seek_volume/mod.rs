use crate::{platform::PlayerPlatform, Logger};

/// Volume settings of the media element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct VolumeState {
    /// Wanted volume, from `0` to `1`. Kept while muted.
    level: f64,
    muted: bool,
}

impl VolumeState {
    pub(crate) fn new(level: f64, muted: bool) -> Self {
        Self {
            level: level.clamp(0., 1.),
            muted,
        }
    }

    pub(crate) fn level(&self) -> f64 {
        self.level
    }

    pub(crate) fn muted(&self) -> bool {
        self.muted
    }

    /// Volume actually heard: `0` when muted, the level otherwise.
    pub(crate) fn effective(&self) -> f64 {
        if self.muted {
            0.
        } else {
            self.level
        }
    }
}

impl Default for VolumeState {
    fn default() -> Self {
        Self::new(1., false)
    }
}

/// Returns the position to seek to for a `requested` one, bounded to the content.
///
/// Returns `None` for positions that cannot be sought to.
pub(crate) fn clamp_seek_position(requested: f64, duration: Option<f64>) -> Option<f64> {
    if requested.is_nan() {
        return None;
    }
    let position = requested.max(0.);
    match duration {
        Some(duration) => Some(position.min(duration)),
        None if position.is_finite() => Some(position),
        None => None,
    }
}

/// Binding between the user's seek and volume requests and the media element.
///
/// User requests are written to the media element, the media element's reports only update
/// the local state, which is never written back.
pub(crate) struct SeekVolumeSync {
    volume: VolumeState,
}

impl SeekVolumeSync {
    pub(crate) fn new() -> Self {
        Self {
            volume: VolumeState::default(),
        }
    }

    pub(crate) fn volume(&self) -> VolumeState {
        self.volume
    }

    /// Ask the media element to seek to `requested`, in seconds.
    ///
    /// Returns the position actually sought to, which should be displayed right away.
    pub(crate) fn seek<P: PlayerPlatform>(
        &self,
        platform: &P,
        requested: f64,
        duration: Option<f64>,
    ) -> Option<f64> {
        let position = clamp_seek_position(requested, duration);
        match position {
            Some(position) => platform.seek(position),
            None => Logger::lazy_debug(&|| format!("Core: Ignoring seek to {requested}")),
        }
        position
    }

    /// Set the volume level, from `0` to `1`.
    ///
    /// A level of `0` mutes, a level above `0` unmutes.
    ///
    /// Returns `true` if the `VolumeState` changed.
    pub(crate) fn set_volume<P: PlayerPlatform>(&mut self, platform: &P, level: f64) -> bool {
        if level.is_nan() {
            Logger::debug("Core: Ignoring NaN volume");
            return false;
        }
        let level = level.clamp(0., 1.);
        let muted = level == 0.;
        platform.set_volume(level);
        if muted != self.volume.muted {
            platform.set_muted(muted);
        }
        self.replace(VolumeState { level, muted })
    }

    /// Switch the muted status without touching the volume level.
    pub(crate) fn toggle_mute<P: PlayerPlatform>(&mut self, platform: &P) {
        self.volume.muted = !self.volume.muted;
        platform.set_muted(self.volume.muted);
    }

    /// Go back to the default `VolumeState` and write it to the media element.
    pub(crate) fn reset<P: PlayerPlatform>(&mut self, platform: &P) {
        self.volume = VolumeState::default();
        platform.set_volume(self.volume.level);
        platform.set_muted(self.volume.muted);
    }

    /// Adopt the volume settings reported by the media element.
    ///
    /// Returns `true` if the `VolumeState` changed.
    pub(crate) fn on_volume_change(&mut self, level: f64, muted: bool) -> bool {
        if level.is_nan() {
            return false;
        }
        self.replace(VolumeState::new(level, muted))
    }

    fn replace(&mut self, volume: VolumeState) -> bool {
        let changed = self.volume != volume;
        self.volume = volume;
        changed
    }
}
