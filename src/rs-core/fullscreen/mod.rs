use thiserror::Error;

use crate::{
    bindings::{FullscreenErrorCode, OrientationLockErrorCode, OrientationLockType},
    configuration::DeviceProfile,
    platform::PlayerPlatform,
    Logger,
};

/// Keeps the fullscreen mode and the screen's orientation lock in sync.
///
/// The fullscreen flag only mirrors what the platform announced: requests never update it.
/// Orientation locking is best-effort, its failures are logged and otherwise ignored.
pub(crate) struct FullscreenOrientationCoordinator {
    is_fullscreen: bool,
    orientation_locked: bool,
}

impl FullscreenOrientationCoordinator {
    pub(crate) fn new() -> Self {
        Self {
            is_fullscreen: false,
            orientation_locked: false,
        }
    }

    pub(crate) fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    pub(crate) fn orientation_locked(&self) -> bool {
        self.orientation_locked
    }

    /// Ask the platform to enter fullscreen mode if not in it, to exit it otherwise.
    pub(crate) fn toggle<P: PlayerPlatform>(&self, platform: &P) {
        let res = if self.is_fullscreen {
            platform.exit_fullscreen()
        } else {
            platform.request_fullscreen()
        };
        if let Err(err) = res {
            Logger::lazy_warn(&|| format!("Fullscreen: Request failed: {err}"));
        }
    }

    /// To call when the platform announces a fullscreen mode change.
    ///
    /// Returns `true` if the fullscreen flag changed.
    pub(crate) fn on_fullscreen_change<P: PlayerPlatform>(
        &mut self,
        platform: &P,
        is_fullscreen: bool,
        device: DeviceProfile,
        orientation: OrientationLockType,
    ) -> bool {
        if is_fullscreen == self.is_fullscreen {
            return false;
        }
        self.is_fullscreen = is_fullscreen;
        Logger::lazy_info(&|| format!("Fullscreen: fullscreen mode now {is_fullscreen}"));
        if device.is_mobile {
            if is_fullscreen {
                self.lock(platform, orientation);
            } else {
                self.unlock(platform);
            }
        }
        true
    }

    /// To call when playback begins. Mobile devices get their orientation locked even when
    /// not in fullscreen mode.
    pub(crate) fn on_playback_start<P: PlayerPlatform>(
        &mut self,
        platform: &P,
        device: DeviceProfile,
        orientation: OrientationLockType,
    ) {
        if device.is_mobile && !self.orientation_locked {
            self.lock(platform, orientation);
        }
    }

    /// To call when the platform announces that a previously sent fullscreen request or
    /// exit failed.
    ///
    /// The fullscreen flag is left as is: only fullscreen changes update it.
    pub(crate) fn on_fullscreen_request_rejected(&self, reason: Option<&str>) {
        Logger::lazy_warn(&|| {
            format!(
                "Fullscreen: Request rejected: {}",
                reason.unwrap_or("unknown reason")
            )
        });
    }

    /// To call when the platform announces that a previously started orientation lock
    /// failed.
    pub(crate) fn on_orientation_lock_rejected(&mut self, reason: Option<&str>) {
        Logger::lazy_debug(&|| {
            format!(
                "Fullscreen: Orientation lock rejected: {}",
                reason.unwrap_or("unknown reason")
            )
        });
        self.orientation_locked = false;
    }

    /// Exit fullscreen mode and release the orientation lock, if either is active.
    ///
    /// Fullscreen changes are not expected to be listened to anymore after this call, so the
    /// fullscreen flag is reset right away.
    pub(crate) fn reset<P: PlayerPlatform>(&mut self, platform: &P) {
        if self.is_fullscreen {
            if let Err(err) = platform.exit_fullscreen() {
                Logger::lazy_warn(&|| format!("Fullscreen: Cannot exit fullscreen mode: {err}"));
            }
            self.is_fullscreen = false;
        }
        if self.orientation_locked {
            self.unlock(platform);
        }
    }

    fn lock<P: PlayerPlatform>(&mut self, platform: &P, orientation: OrientationLockType) {
        match platform.lock_orientation(orientation) {
            Ok(()) => self.orientation_locked = true,
            Err(err) => {
                Logger::lazy_debug(&|| format!("Fullscreen: Cannot lock orientation: {err}"));
                self.orientation_locked = false;
            }
        }
    }

    fn unlock<P: PlayerPlatform>(&mut self, platform: &P) {
        if let Err(err) = platform.unlock_orientation() {
            Logger::lazy_debug(&|| format!("Fullscreen: Cannot unlock orientation: {err}"));
        }
        self.orientation_locked = false;
    }
}

/// Error that may be returned when asking to enter or exit fullscreen mode.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub(crate) enum FullscreenRequestError {
    #[error("The Fullscreen API is not available.")]
    NotSupported,
    #[error("The fullscreen request was refused: {message}")]
    NotAllowed { message: String },
    #[error("Uncategorized Error when requesting fullscreen mode: {message}")]
    UnknownError { message: String },
}

impl From<(FullscreenErrorCode, Option<String>)> for FullscreenRequestError {
    fn from(x: (FullscreenErrorCode, Option<String>)) -> Self {
        let message = x.1.unwrap_or_else(|| "Unknown Error.".to_string());
        match x.0 {
            FullscreenErrorCode::NotSupported => FullscreenRequestError::NotSupported,
            FullscreenErrorCode::NotAllowed => FullscreenRequestError::NotAllowed { message },
            FullscreenErrorCode::UnknownError => FullscreenRequestError::UnknownError { message },
        }
    }
}

/// Error that may be returned by an orientation lock or unlock.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub(crate) enum OrientationLockError {
    #[error("The Screen Orientation API is not available.")]
    NotSupported,
    #[error("The orientation lock was refused: {message}")]
    NotAllowed { message: String },
    #[error("Uncategorized Error when locking the orientation: {message}")]
    UnknownError { message: String },
}

impl From<(OrientationLockErrorCode, Option<String>)> for OrientationLockError {
    fn from(x: (OrientationLockErrorCode, Option<String>)) -> Self {
        let message = x.1.unwrap_or_else(|| "Unknown Error.".to_string());
        match x.0 {
            OrientationLockErrorCode::NotSupported => OrientationLockError::NotSupported,
            OrientationLockErrorCode::NotAllowed => OrientationLockError::NotAllowed { message },
            OrientationLockErrorCode::UnknownError => {
                OrientationLockError::UnknownError { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::test_utils::{FakePlatform, PlatformCall};

    const MOBILE: DeviceProfile = DeviceProfile {
        is_mobile: true,
        has_fine_pointer: false,
    };
    const DESKTOP: DeviceProfile = DeviceProfile {
        is_mobile: false,
        has_fine_pointer: true,
    };

    #[test]
    fn test_toggle_only_requests() {
        let platform = FakePlatform::new();
        let mut coordinator = FullscreenOrientationCoordinator::new();
        coordinator.toggle(&platform);
        assert!(!coordinator.is_fullscreen());

        coordinator.on_fullscreen_change(&platform, true, DESKTOP, OrientationLockType::Landscape);
        coordinator.toggle(&platform);
        assert!(coordinator.is_fullscreen());
        assert_eq!(
            platform.calls(),
            vec![PlatformCall::RequestFullscreen, PlatformCall::ExitFullscreen]
        );
    }

    #[test]
    fn test_refused_request_is_not_an_error() {
        let platform = FakePlatform::new();
        platform.fail_fullscreen(FullscreenRequestError::NotAllowed {
            message: "not triggered by user activation".to_owned(),
        });
        let coordinator = FullscreenOrientationCoordinator::new();
        coordinator.toggle(&platform);
        assert!(!coordinator.is_fullscreen());
    }

    #[test]
    fn test_rejected_request_keeps_the_fullscreen_flag() {
        let platform = FakePlatform::new();
        let mut coordinator = FullscreenOrientationCoordinator::new();
        coordinator.on_fullscreen_change(&platform, true, DESKTOP, OrientationLockType::Landscape);
        coordinator.toggle(&platform);
        coordinator.on_fullscreen_request_rejected(Some("exit refused"));
        assert!(coordinator.is_fullscreen());
        coordinator.toggle(&platform);
        assert_eq!(
            platform.calls(),
            vec![PlatformCall::ExitFullscreen, PlatformCall::ExitFullscreen]
        );
    }

    #[test]
    fn test_mobile_locks_and_unlocks() {
        let platform = FakePlatform::new();
        let mut coordinator = FullscreenOrientationCoordinator::new();

        assert!(coordinator.on_fullscreen_change(
            &platform,
            true,
            MOBILE,
            OrientationLockType::Landscape
        ));
        assert!(coordinator.orientation_locked());

        // Back gesture exiting fullscreen on the platform side
        assert!(coordinator.on_fullscreen_change(
            &platform,
            false,
            MOBILE,
            OrientationLockType::Landscape
        ));
        assert!(!coordinator.is_fullscreen());
        assert!(!coordinator.orientation_locked());
        assert_eq!(
            platform.calls(),
            vec![
                PlatformCall::LockOrientation(OrientationLockType::Landscape),
                PlatformCall::UnlockOrientation,
            ]
        );
    }

    #[test]
    fn test_desktop_never_locks() {
        let platform = FakePlatform::new();
        platform.fail_orientation_lock(OrientationLockError::NotSupported);
        let mut coordinator = FullscreenOrientationCoordinator::new();
        assert!(coordinator.on_fullscreen_change(
            &platform,
            true,
            DESKTOP,
            OrientationLockType::Landscape
        ));
        coordinator.on_playback_start(&platform, DESKTOP, OrientationLockType::Landscape);
        assert!(coordinator.is_fullscreen());
        assert!(!coordinator.orientation_locked());
        assert!(platform.calls().is_empty());
    }

    #[test]
    fn test_failing_lock_is_ignored() {
        let platform = FakePlatform::new();
        platform.fail_orientation_lock(OrientationLockError::NotSupported);
        let mut coordinator = FullscreenOrientationCoordinator::new();
        assert!(coordinator.on_fullscreen_change(
            &platform,
            true,
            MOBILE,
            OrientationLockType::Landscape
        ));
        assert!(coordinator.is_fullscreen());
        assert!(!coordinator.orientation_locked());
    }

    #[test]
    fn test_lock_on_playback_start() {
        let platform = FakePlatform::new();
        let mut coordinator = FullscreenOrientationCoordinator::new();
        coordinator.on_playback_start(&platform, MOBILE, OrientationLockType::Landscape);
        coordinator.on_playback_start(&platform, MOBILE, OrientationLockType::Landscape);
        assert!(coordinator.orientation_locked());
        assert!(!coordinator.is_fullscreen());
        assert_eq!(
            platform.count(|c| matches!(c, PlatformCall::LockOrientation(_))),
            1
        );

        coordinator.on_orientation_lock_rejected(Some("NotSupportedError"));
        assert!(!coordinator.orientation_locked());
    }

    #[test]
    fn test_duplicate_change_is_ignored() {
        let platform = FakePlatform::new();
        let mut coordinator = FullscreenOrientationCoordinator::new();
        assert!(!coordinator.on_fullscreen_change(
            &platform,
            false,
            MOBILE,
            OrientationLockType::Landscape
        ));
        assert!(platform.calls().is_empty());
    }

    #[test]
    fn test_reset_unlocks() {
        let platform = FakePlatform::new();
        let mut coordinator = FullscreenOrientationCoordinator::new();
        coordinator.on_fullscreen_change(&platform, true, MOBILE, OrientationLockType::Portrait);
        platform.take_calls();
        coordinator.reset(&platform);
        assert!(!coordinator.is_fullscreen());
        assert!(!coordinator.orientation_locked());
        assert_eq!(
            platform.calls(),
            vec![PlatformCall::ExitFullscreen, PlatformCall::UnlockOrientation]
        );

        // Nothing left to release
        platform.take_calls();
        coordinator.reset(&platform);
        assert!(platform.calls().is_empty());
    }

    #[test]
    fn test_reset_outside_fullscreen_does_not_exit() {
        let platform = FakePlatform::new();
        let mut coordinator = FullscreenOrientationCoordinator::new();
        coordinator.on_playback_start(&platform, MOBILE, OrientationLockType::Landscape);
        platform.take_calls();
        coordinator.reset(&platform);
        assert_eq!(platform.calls(), vec![PlatformCall::UnlockOrientation]);
    }

    #[test]
    fn test_error_conversion() {
        assert_eq!(
            FullscreenRequestError::from((FullscreenErrorCode::NotAllowed, None)),
            FullscreenRequestError::NotAllowed {
                message: "Unknown Error.".to_owned()
            }
        );
        assert_eq!(
            OrientationLockError::from((
                OrientationLockErrorCode::NotSupported,
                Some("no lock".to_owned())
            )),
            OrientationLockError::NotSupported
        );
    }
}
