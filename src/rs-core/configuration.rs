use crate::{bindings::OrientationLockType, source_resolver::DEFAULT_TOKEN_QUERY_PARAMETER};

const DEFAULT_CONTROLS_HIDE_DELAY: f64 = 2500.;

/// Capabilities of the device the player runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DeviceProfile {
    /// If `true`, the device is a phone or tablet: the screen's orientation is locked to the
    /// wanted one when fullscreen or playback begins.
    pub(crate) is_mobile: bool,

    /// If `true`, the device has a pointer able to hover (mouse, trackpad), whose leaving of
    /// the player can be relied on to hide the controls.
    pub(crate) has_fine_pointer: bool,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            is_mobile: false,
            has_fine_pointer: true,
        }
    }
}

/// Inner configuration on which the `PlayerCore` relies.
/// Can be updated at any time through the `PlayerController`'s `set_*` methods.
pub(crate) struct PlayerConfiguration {
    /// Delay, in milliseconds, after the last user interaction at which the controls are
    /// hidden while playing.
    pub(crate) controls_hide_delay_ms: f64,

    pub(crate) device_profile: DeviceProfile,

    /// Name of the query parameter the credential is appended as, for contents requiring
    /// authentication.
    pub(crate) token_query_parameter: String,

    /// Orientation the screen is locked to on mobile devices.
    pub(crate) fullscreen_orientation: OrientationLockType,
}

impl PlayerConfiguration {
    pub(crate) fn new(device_profile: DeviceProfile) -> Self {
        Self {
            device_profile,
            ..Self::default()
        }
    }
}

impl Default for PlayerConfiguration {
    fn default() -> Self {
        Self {
            controls_hide_delay_ms: DEFAULT_CONTROLS_HIDE_DELAY,
            device_profile: DeviceProfile::default(),
            token_query_parameter: DEFAULT_TOKEN_QUERY_PARAMETER.to_owned(),
            fullscreen_orientation: OrientationLockType::Landscape,
        }
    }
}
