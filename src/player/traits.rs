use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No source loaded yet
    #[default]
    Idle,
    Paused,
    Playing,
}

/// The single media-playback element the transport drives 🎵
///
/// Mirrors the native state of a media element: one source at a time,
/// play/pause, a position in seconds, a duration that is unknown until the
/// source has been decoded, and a volume in `[0, 1]`.
pub trait MediaElement: Send {
    /// Replace the current source. Whatever was playing stops.
    fn set_source(&mut self, url: &str) -> Result<()>;
    fn source(&self) -> Option<&str>;

    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn paused(&self) -> bool;

    /// Playback position in seconds.
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, secs: f64) -> Result<()>;
    /// Total length in seconds, `None` until known.
    fn duration(&self) -> Option<f64>;

    fn set_volume(&mut self, level: f32);
    fn volume(&self) -> f32;

    /// Returns true once after the current source plays to its end.
    fn take_ended(&mut self) -> bool;
}

/// Asynchronous outcome of a `set_source`, tagged with the source it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaSignal {
    Ready {
        source: String,
        duration: Option<f64>,
    },
    Failed {
        source: String,
        reason: String,
    },
}
