use thiserror::Error;

use crate::{source_resolver::SourceResolutionError, wasm_bindgen, Logger};

/// Identify the playback-related phase the player is in.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// No content is currently loaded.
    Idle = 0,
    /// A content has been given to the media element, which did not load its metadata yet.
    Loading = 1,
    /// Playback is progressing.
    Playing = 2,
    /// The content is loaded but not playing.
    Paused = 3,
    /// Playback was wanted but is stalled because not enough data is buffered.
    Buffering = 4,
    /// The current content cannot be played. Only a new load gets out of this phase.
    Errored = 5,
}

/// Error leading to the `Errored` phase.
///
/// Its `Display` implementation gives the message shown to the user.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub(crate) enum PlaybackError {
    #[error("{0}")]
    Resolution(#[from] SourceResolutionError),
    /// `detail` is the platform's diagnostic, only logged.
    #[error("The media failed to load.")]
    LoadFailed { detail: Option<String> },
    #[error("Playback could not be started: {reason}")]
    PlayFailed { reason: String },
}

/// Events the `PlaybackStateController` reacts to.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum PlaybackEvent {
    /// A new content (or the same one, as a retry) is being loaded.
    LoadRequested,
    /// The content's locator could not be resolved, nothing will be loaded.
    ResolutionFailed(SourceResolutionError),
    /// The media element loaded the content's metadata.
    MetadataReady { duration: f64 },
    /// The media element reports that playback started or resumed.
    Play,
    /// The media element reports that playback was paused.
    Pause,
    /// The media element cannot progress due to a lack of buffered data.
    Stall,
    /// The media element has enough data to play again.
    ReadyToPlay,
    /// A play request was rejected by the media element.
    PlayRejected { reason: Option<String> },
    /// The media element could not load or decode the content.
    MediaError { detail: Option<String> },
}

/// A change of `PlaybackPhase`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PhaseTransition {
    pub(crate) from: PlaybackPhase,
    pub(crate) to: PlaybackPhase,
}

/// Normalized playback status, as rendered by the hosting view.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PlaybackStatus {
    phase: PlaybackPhase,
    /// Last known position in seconds.
    position: f64,
    /// Duration of the content in seconds, `None` until its metadata is loaded or if it is not
    /// a finite value (e.g. live contents).
    duration: Option<f64>,
    /// Only set in the `Errored` phase.
    error: Option<PlaybackError>,
}

impl PlaybackStatus {
    fn new() -> Self {
        Self {
            phase: PlaybackPhase::Idle,
            position: 0.,
            duration: None,
            error: None,
        }
    }

    pub(crate) fn position(&self) -> f64 {
        self.position
    }

    pub(crate) fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub(crate) fn error(&self) -> Option<&PlaybackError> {
        self.error.as_ref()
    }
}

/// State machine turning the media element's events into a `PlaybackStatus`.
///
/// | Current phase     | Event                 | Next phase |
/// |-------------------|-----------------------|------------|
/// | any               | `LoadRequested`       | `Loading`  |
/// | `Idle`            | `ResolutionFailed`    | `Errored`  |
/// | `Loading`         | `MetadataReady`       | `Paused`   |
/// | `Paused`          | `Play`                | `Playing`  |
/// | `Playing`         | `Pause`               | `Paused`   |
/// | `Buffering`       | `Pause`               | `Paused`   |
/// | `Playing`         | `Stall`               | `Buffering`|
/// | `Buffering`       | `ReadyToPlay`         | `Playing`  |
/// | loaded, not `Errored` | `PlayRejected`, `MediaError` | `Errored` |
///
/// Any other combination is ignored. `Errored` is absorbing: only `LoadRequested`
/// leaves it.
pub(crate) struct PlaybackStateController {
    status: PlaybackStatus,
}

impl PlaybackStateController {
    pub(crate) fn new() -> Self {
        Self {
            status: PlaybackStatus::new(),
        }
    }

    pub(crate) fn status(&self) -> &PlaybackStatus {
        &self.status
    }

    pub(crate) fn phase(&self) -> PlaybackPhase {
        self.status.phase
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.status.phase == PlaybackPhase::Playing
    }

    /// Returns `true` if a content is loaded or being loaded.
    pub(crate) fn has_content(&self) -> bool {
        !matches!(self.status.phase, PlaybackPhase::Idle | PlaybackPhase::Errored)
    }

    /// Go back to the `Idle` phase, forgetting everything about the current content.
    pub(crate) fn reset(&mut self) -> Option<PhaseTransition> {
        let from = self.status.phase;
        self.status = PlaybackStatus::new();
        (from != PlaybackPhase::Idle).then_some(PhaseTransition {
            from,
            to: PlaybackPhase::Idle,
        })
    }

    /// Update the status according to the given event.
    ///
    /// Returns the corresponding `PhaseTransition` if the phase changed.
    pub(crate) fn handle(&mut self, event: PlaybackEvent) -> Option<PhaseTransition> {
        use PlaybackPhase::*;
        let from = self.status.phase;
        let to = match (from, event) {
            (_, PlaybackEvent::LoadRequested) => {
                self.status = PlaybackStatus::new();
                Loading
            }
            (Errored, event) => {
                Logger::lazy_debug(&|| format!("Playback: Ignoring {event:?} while Errored"));
                return None;
            }
            (Idle, PlaybackEvent::ResolutionFailed(err)) => self.fail(err.into()),
            (Loading, PlaybackEvent::MetadataReady { duration }) => {
                self.status.duration = finite_duration(duration);
                Paused
            }
            (Paused, PlaybackEvent::Play) => Playing,
            (Playing | Buffering, PlaybackEvent::Pause) => Paused,
            (Playing, PlaybackEvent::Stall) => Buffering,
            (Buffering, PlaybackEvent::ReadyToPlay) => Playing,
            (Loading | Paused | Playing | Buffering, PlaybackEvent::PlayRejected { reason }) => {
                let reason = reason.unwrap_or_else(|| "the media is not ready.".to_owned());
                self.fail(PlaybackError::PlayFailed { reason })
            }
            (Loading | Paused | Playing | Buffering, PlaybackEvent::MediaError { detail }) => {
                self.fail(PlaybackError::LoadFailed { detail })
            }
            (phase, event) => {
                Logger::lazy_debug(&|| format!("Playback: Ignoring {event:?} while {phase:?}"));
                return None;
            }
        };

        self.status.phase = to;
        if from == to {
            None
        } else {
            Logger::lazy_debug(&|| format!("Playback: {from:?} -> {to:?}"));
            Some(PhaseTransition { from, to })
        }
    }

    /// Update the last known position, as reported by the media element or optimistically
    /// after a seek.
    ///
    /// Returns `true` if it changed.
    pub(crate) fn update_position(&mut self, position: f64) -> bool {
        if !position.is_finite() || position < 0. || !self.has_content() {
            return false;
        }
        let changed = self.status.position != position;
        self.status.position = position;
        changed
    }

    /// Update the content's duration, as reported by the media element.
    ///
    /// Returns `true` if it changed.
    pub(crate) fn update_duration(&mut self, duration: f64) -> bool {
        if !self.has_content() {
            return false;
        }
        let duration = finite_duration(duration);
        let changed = self.status.duration != duration;
        self.status.duration = duration;
        changed
    }

    fn fail(&mut self, err: PlaybackError) -> PlaybackPhase {
        match &err {
            PlaybackError::LoadFailed { detail } => Logger::lazy_error(&|| {
                format!("Playback: Media error: {}", detail.as_deref().unwrap_or("unknown"))
            }),
            _ => Logger::lazy_warn(&|| format!("Playback: {err}")),
        }
        self.status.error = Some(err);
        PlaybackPhase::Errored
    }
}

fn finite_duration(duration: f64) -> Option<f64> {
    (duration.is_finite() && duration >= 0.).then_some(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller_in(phase: PlaybackPhase) -> PlaybackStateController {
        let mut controller = PlaybackStateController::new();
        let path: &[PlaybackEvent] = match phase {
            PlaybackPhase::Idle => &[],
            PlaybackPhase::Loading => &[PlaybackEvent::LoadRequested],
            PlaybackPhase::Paused => &[
                PlaybackEvent::LoadRequested,
                PlaybackEvent::MetadataReady { duration: 60. },
            ],
            PlaybackPhase::Playing => &[
                PlaybackEvent::LoadRequested,
                PlaybackEvent::MetadataReady { duration: 60. },
                PlaybackEvent::Play,
            ],
            PlaybackPhase::Buffering => &[
                PlaybackEvent::LoadRequested,
                PlaybackEvent::MetadataReady { duration: 60. },
                PlaybackEvent::Play,
                PlaybackEvent::Stall,
            ],
            PlaybackPhase::Errored => &[
                PlaybackEvent::LoadRequested,
                PlaybackEvent::MediaError { detail: None },
            ],
        };
        for event in path {
            controller.handle(event.clone());
        }
        assert_eq!(controller.phase(), phase);
        controller
    }

    fn all_events() -> Vec<PlaybackEvent> {
        vec![
            PlaybackEvent::ResolutionFailed(SourceResolutionError::MissingToken),
            PlaybackEvent::MetadataReady { duration: 10. },
            PlaybackEvent::Play,
            PlaybackEvent::Pause,
            PlaybackEvent::Stall,
            PlaybackEvent::ReadyToPlay,
            PlaybackEvent::PlayRejected { reason: None },
            PlaybackEvent::MediaError { detail: None },
        ]
    }

    #[test]
    fn test_nominal_sequence() {
        let mut controller = PlaybackStateController::new();
        let events = [
            (PlaybackEvent::LoadRequested, PlaybackPhase::Loading),
            (
                PlaybackEvent::MetadataReady { duration: 120. },
                PlaybackPhase::Paused,
            ),
            (PlaybackEvent::Play, PlaybackPhase::Playing),
            (PlaybackEvent::Stall, PlaybackPhase::Buffering),
            (PlaybackEvent::ReadyToPlay, PlaybackPhase::Playing),
        ];
        let mut from = PlaybackPhase::Idle;
        for (event, to) in events {
            assert_eq!(controller.handle(event), Some(PhaseTransition { from, to }));
            from = to;
        }
        assert_eq!(controller.status().duration(), Some(120.));
        assert!(controller.status().error().is_none());
    }

    #[test]
    fn test_errored_is_absorbing() {
        for event in all_events() {
            let mut controller = controller_in(PlaybackPhase::Errored);
            assert_eq!(controller.handle(event), None);
            assert_eq!(controller.phase(), PlaybackPhase::Errored);
            assert_eq!(
                controller.status().error(),
                Some(&PlaybackError::LoadFailed { detail: None })
            );
        }
        let mut controller = controller_in(PlaybackPhase::Errored);
        assert_eq!(
            controller.handle(PlaybackEvent::LoadRequested),
            Some(PhaseTransition {
                from: PlaybackPhase::Errored,
                to: PlaybackPhase::Loading
            })
        );
        assert!(controller.status().error().is_none());
    }

    #[test]
    fn test_stall_while_paused() {
        let mut controller = controller_in(PlaybackPhase::Paused);
        assert_eq!(controller.handle(PlaybackEvent::Stall), None);
        assert_eq!(controller.phase(), PlaybackPhase::Paused);
        assert_eq!(controller.handle(PlaybackEvent::ReadyToPlay), None);
        assert_eq!(controller.phase(), PlaybackPhase::Paused);

        let mut controller = controller_in(PlaybackPhase::Loading);
        controller.handle(PlaybackEvent::Stall);
        assert_eq!(controller.phase(), PlaybackPhase::Loading);
    }

    #[test]
    fn test_pause_while_buffering() {
        let mut controller = controller_in(PlaybackPhase::Buffering);
        controller.handle(PlaybackEvent::Pause);
        assert_eq!(controller.phase(), PlaybackPhase::Paused);
        controller.handle(PlaybackEvent::ReadyToPlay);
        assert_eq!(controller.phase(), PlaybackPhase::Paused);
    }

    #[test]
    fn test_play_while_buffering_stays_buffering() {
        let mut controller = controller_in(PlaybackPhase::Buffering);
        assert_eq!(controller.handle(PlaybackEvent::Play), None);
        assert_eq!(controller.phase(), PlaybackPhase::Buffering);
        assert_eq!(controller.handle(PlaybackEvent::Play), None);
    }

    #[test]
    fn test_play_rejected() {
        let mut controller = controller_in(PlaybackPhase::Paused);
        controller.handle(PlaybackEvent::PlayRejected {
            reason: Some("NotAllowedError".to_owned()),
        });
        assert_eq!(controller.phase(), PlaybackPhase::Errored);
        let err = controller.status().error().unwrap();
        assert_eq!(err.to_string(), "Playback could not be started: NotAllowedError");
        assert_ne!(
            err.to_string(),
            PlaybackError::LoadFailed { detail: None }.to_string()
        );
    }

    #[test]
    fn test_resolution_failure() {
        let mut controller = PlaybackStateController::new();
        controller.handle(PlaybackEvent::ResolutionFailed(
            SourceResolutionError::MissingToken,
        ));
        assert_eq!(controller.phase(), PlaybackPhase::Errored);
        assert_eq!(
            controller.status().error(),
            Some(&PlaybackError::Resolution(SourceResolutionError::MissingToken))
        );
        assert!(controller
            .status()
            .error()
            .unwrap()
            .to_string()
            .contains("sign in again"));
    }

    #[test]
    fn test_media_error_from_every_loaded_phase() {
        use PlaybackPhase::*;
        for phase in [Loading, Paused, Playing, Buffering] {
            let mut controller = controller_in(phase);
            controller.handle(PlaybackEvent::MediaError {
                detail: Some("MEDIA_ERR_DECODE".to_owned()),
            });
            assert_eq!(controller.phase(), Errored);
            assert_eq!(
                controller.status().error().unwrap().to_string(),
                "The media failed to load."
            );
        }
    }

    #[test]
    fn test_idle_ignores_media_events() {
        for event in all_events().into_iter().skip(1) {
            let mut controller = PlaybackStateController::new();
            assert_eq!(controller.handle(event), None);
            assert_eq!(controller.phase(), PlaybackPhase::Idle);
        }
    }

    #[test]
    fn test_position_and_duration_updates() {
        let mut controller = PlaybackStateController::new();
        assert!(!controller.update_position(3.));
        assert!(!controller.update_duration(30.));

        let mut controller = controller_in(PlaybackPhase::Playing);
        assert!(controller.update_position(3.));
        assert!(!controller.update_position(3.));
        assert!(!controller.update_position(f64::NAN));
        assert_eq!(controller.status().position(), 3.);

        assert!(controller.update_duration(f64::INFINITY));
        assert_eq!(controller.status().duration(), None);
        assert!(controller.update_duration(90.));
        assert_eq!(controller.status().duration(), Some(90.));
        assert_eq!(controller.phase(), PlaybackPhase::Playing);
    }

    #[test]
    fn test_reset() {
        let mut controller = controller_in(PlaybackPhase::Playing);
        controller.update_position(12.);
        assert_eq!(
            controller.reset(),
            Some(PhaseTransition {
                from: PlaybackPhase::Playing,
                to: PlaybackPhase::Idle
            })
        );
        assert_eq!(controller.status().position(), 0.);
        assert_eq!(controller.status().duration(), None);
        assert_eq!(controller.reset(), None);
    }
}
