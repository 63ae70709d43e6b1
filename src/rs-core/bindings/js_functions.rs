use crate::{playback_state::PlaybackPhase, wasm_bindgen};

/// # js_functions
///
/// This file lists all JavaScript functions that are callable from Rust as well as
/// struct and enumeration used by those functions.

#[wasm_bindgen]
extern "C" {
    // Log the given text in the JavaScript console, with the log level given.
    pub fn jsLog(log_level: LogLevel, log: &str);

    // Starts a timer for the number of milliseconds indicated by the `duration` argument.
    //
    // Once this timer has elapsed, and unless `jsClearTimer` has been called since with
    // the `TimerId` returned by this function, the `on_timer_ended` method of the
    // `PlayerController` will be called with both the corresponding `TimerId` and `reason`.
    pub fn jsTimer(duration: f64, reason: TimerReason) -> TimerId;

    // Clear a timer started with `jsTimer`.
    pub fn jsClearTimer(id: TimerId);

    // Returns the bearer token of the current session, as stored by the application's
    // authentication layer.
    //
    // Returns `None` if no token is stored.
    pub fn jsGetAuthToken() -> Option<String>;

    // Start listening to the media element's events (`loadedmetadata`, `play`, `pause`,
    // `waiting`, `canplay`, `progress`, `timeupdate`, `durationchange`, `volumechange`,
    // `error`), forwarding each of them to the corresponding `on_*` method of the
    // `PlayerController`.
    //
    // Calling it while already listening does nothing.
    pub fn jsAttachMediaListeners();

    // Remove every listener added by `jsAttachMediaListeners`.
    //
    // No `on_*` media method will be called after this until `jsAttachMediaListeners` is
    // called again.
    pub fn jsDetachMediaListeners();

    // Start listening to the document's `fullscreenchange` event, forwarding it to the
    // `on_fullscreen_change` method of the `PlayerController`.
    //
    // This is independent from the media element: fullscreen changes are forwarded whether
    // a content is loaded or not. Calling it while already listening does nothing.
    pub fn jsAttachFullscreenListener();

    // Remove the listener added by `jsAttachFullscreenListener`.
    pub fn jsDetachFullscreenListener();

    // Set the given URL as the media element's source and call its `load` method.
    pub fn jsLoadMedia(url: &str);

    // Remove the media element's source and free its associated resources.
    pub fn jsUnloadMedia();

    // Call the `HTMLMediaElement.prototype.play` API.
    //
    // The returned Promise is handled on the JavaScript-side: if it rejects, the
    // `on_play_rejected` method of the `PlayerController` is called with the reason.
    pub fn jsPlay();

    // Call the `HTMLMediaElement.prototype.pause` API.
    pub fn jsPause();

    // Set the `currentTime` attribute of the media element, in seconds.
    pub fn jsSeek(position: f64);

    // Set the `volume` attribute of the media element, from `0` to `1`.
    pub fn jsSetVolume(volume: f64);

    // Set the `muted` attribute of the media element.
    pub fn jsSetMuted(muted: bool);

    // Ask for the player's container to be displayed in fullscreen mode.
    //
    // Synchronous failures (API not available) are returned, asynchronous ones are
    // announced through `on_fullscreen_request_rejected`. In any case the actual mode
    // change is only announced through `on_fullscreen_change`.
    pub fn jsRequestFullscreen() -> FullscreenRequestResult;

    // Ask for fullscreen mode to be exited. Same result semantics than
    // `jsRequestFullscreen`.
    pub fn jsExitFullscreen() -> FullscreenRequestResult;

    // Call the `ScreenOrientation.prototype.lock` API with the given orientation.
    //
    // Synchronous failures are returned, rejections of the returned Promise are announced
    // through `on_orientation_lock_rejected`.
    pub fn jsLockOrientation(orientation: OrientationLockType) -> OrientationLockResult;

    // Call the `ScreenOrientation.prototype.unlock` API.
    pub fn jsUnlockOrientation() -> OrientationLockResult;

    // Announce that the playback phase changed.
    //
    // `error_message` is only set when the new phase is `Errored`.
    pub fn jsAnnouncePhase(phase: PlaybackPhase, error_message: Option<&str>);

    // Announce the position and duration of the content, in seconds.
    pub fn jsAnnouncePosition(position: f64, duration: Option<f64>);

    // Announce the volume level and muted status.
    pub fn jsAnnounceVolume(level: f64, muted: bool);

    // Announce the percentage of the content's duration buffered around the playhead.
    pub fn jsAnnounceBufferedPercentage(percentage: f64);

    // Announce whether the control overlay should be displayed.
    pub fn jsAnnounceControlsVisibility(visible: bool);

    // Announce whether the player is currently in fullscreen mode.
    pub fn jsAnnounceFullscreen(is_fullscreen: bool);
}

/// Trait allowing to convert "JavaScript Results" as exposed by the JavaScript functions into
/// `Result` structs more idiomatic to Rust.
pub(crate) trait JsResult<T, E> {
    fn result(self) -> Result<T, (E, Option<String>)>;
}

/// Errors that can arise when asking to enter or exit fullscreen mode.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FullscreenErrorCode {
    /// The Fullscreen API is not available in the current environment.
    NotSupported,

    /// The request was denied, generally because it wasn't triggered by a user gesture.
    NotAllowed,

    /// An unknown error happened.
    UnknownError,
}

/// Result of calling the `jsRequestFullscreen` or `jsExitFullscreen` JavaScript function.
///
/// Creation of a `FullscreenRequestResult` should only be performed by the JavaScript side
/// through the exposed static constructors.
#[wasm_bindgen]
pub struct FullscreenRequestResult {
    error: Option<(FullscreenErrorCode, Option<String>)>,
}

#[wasm_bindgen]
impl FullscreenRequestResult {
    /// Creates a `FullscreenRequestResult` indicating that the request was sent.
    ///
    /// This function should only be called by the JavaScript-side.
    pub fn success() -> Self {
        Self { error: None }
    }

    /// Creates a `FullscreenRequestResult` indicating failure, with the corresponding
    /// error.
    ///
    /// This function should only be called by the JavaScript-side.
    pub fn error(err: FullscreenErrorCode, desc: Option<String>) -> Self {
        Self {
            error: Some((err, desc)),
        }
    }
}

impl JsResult<(), FullscreenErrorCode> for FullscreenRequestResult {
    fn result(self) -> Result<(), (FullscreenErrorCode, Option<String>)> {
        if let Some(err) = self.error {
            Err(err)
        } else {
            Ok(())
        }
    }
}

/// Errors that can arise when locking or unlocking the screen's orientation.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrientationLockErrorCode {
    /// The Screen Orientation API, or its `lock` method, is not available.
    NotSupported,

    /// The lock was refused, for example because the document is not in fullscreen mode.
    NotAllowed,

    /// An unknown error happened.
    UnknownError,
}

/// Result of calling the `jsLockOrientation` or `jsUnlockOrientation` JavaScript function.
///
/// Creation of an `OrientationLockResult` should only be performed by the JavaScript side
/// through the exposed static constructors.
#[wasm_bindgen]
pub struct OrientationLockResult {
    error: Option<(OrientationLockErrorCode, Option<String>)>,
}

#[wasm_bindgen]
impl OrientationLockResult {
    /// Creates an `OrientationLockResult` indicating that the operation was started.
    ///
    /// This function should only be called by the JavaScript-side.
    pub fn success() -> Self {
        Self { error: None }
    }

    /// Creates an `OrientationLockResult` indicating failure, with the corresponding
    /// error.
    ///
    /// This function should only be called by the JavaScript-side.
    pub fn error(err: OrientationLockErrorCode, desc: Option<String>) -> Self {
        Self {
            error: Some((err, desc)),
        }
    }
}

impl JsResult<(), OrientationLockErrorCode> for OrientationLockResult {
    fn result(self) -> Result<(), (OrientationLockErrorCode, Option<String>)> {
        if let Some(err) = self.error {
            Err(err)
        } else {
            Ok(())
        }
    }
}

/// Orientation the screen can be locked to, as understood by
/// `ScreenOrientation.prototype.lock`.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrientationLockType {
    Any = 0,
    Natural = 1,
    Landscape = 2,
    Portrait = 3,
}

/// "Reason" associated to a timer started by the `PlayerController`.
///
/// This can then help to identify what the timer was for once resolved.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerReason {
    /// The timer is the countdown after which the control overlay is hidden.
    ControlsVisibility = 0,
}

/// Levels with which a log can be emitted.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd)]
pub enum LogLevel {
    /// Log level reserved for very important errors and highly unexpected events.
    Error = 0,

    /// Log level reserved for less important errors and unexpected events.
    Warn = 1,

    /// Log level reserved for important events
    Info = 2,

    /// Log level used when debugging. Small-ish yet impactful events should be logged with it.
    Debug = 3,
}

/// Identify a pending timer.
pub type TimerId = f64;
