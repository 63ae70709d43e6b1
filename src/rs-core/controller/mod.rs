use crate::{
    configuration::PlayerConfiguration,
    controls_visibility::ControlsVisibilityScheduler,
    fullscreen::FullscreenOrientationCoordinator,
    platform::{JsPlatform, PlayerPlatform},
    playback_state::PlaybackStateController,
    seek_volume::SeekVolumeSync,
    source_resolver::{SourceRequest, SourceResolver},
    wasm_bindgen,
};

mod api;
mod core;
mod event_listeners;

/// The `PlayerController` is the interface exported to the JavaScript-side, supervising the
/// playback of a single media element: it turns the element's events into a normalized
/// playback status and the user's intents into calls to the element.
#[wasm_bindgen]
pub struct PlayerController {
    core: PlayerCore<JsPlatform>,
}

/// Platform-agnostic logic behind the `PlayerController`.
pub(crate) struct PlayerCore<P: PlayerPlatform> {
    platform: P,

    config: PlayerConfiguration,

    source_resolver: SourceResolver,

    /// Content last asked to be loaded.
    ///
    /// `None` if none was asked since creation or since the last `dispose` call.
    current_request: Option<SourceRequest>,

    /// If `true`, a resolved locator was given to the media element, whose events are
    /// being listened to.
    media_attached: bool,

    /// Only writer of the normalized playback status.
    playback: PlaybackStateController,

    seek_volume: SeekVolumeSync,

    fullscreen: FullscreenOrientationCoordinator,

    /// If `true`, fullscreen mode changes are being listened to.
    fullscreen_listened: bool,

    controls: ControlsVisibilityScheduler,

    /// Percentage of the content buffered around the playhead, as computed on the last
    /// buffering progress report.
    buffered_percentage: f64,
}
