use super::progress::Progress;
use super::traits::{MediaElement, PlaybackState};
use crate::catalog::{media_url, Track};
use crate::playlist::Playlist;
use reqwest::Url;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Relative seek step for keyboard nudges, in seconds.
pub const SEEK_STEP_SECS: f64 = 5.0;
/// Volume step for keyboard nudges.
pub const VOLUME_STEP: f32 = 0.05;

/// Transitions the notifier listens to.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    Loading(Track),
    Started(Track),
    Paused(Track),
}

/// Playback state machine over one media element.
///
/// `Idle` until the first track is loaded, then `Playing`/`Paused`.
/// Navigation never wraps: stepping past either end of the playlist does nothing.
pub struct Transport {
    media: Box<dyn MediaElement>,
    media_base: Url,
    state: PlaybackState,
    current_index: usize,
    now_playing: Option<Track>,
    /// The loaded source failed; resuming is refused until it is loaded again.
    load_failed: bool,
    progress: Progress,
    durations: HashMap<String, f64>,
    events: Vec<TransportEvent>,
}

impl Transport {
    pub fn new(media: Box<dyn MediaElement>, media_base: Url) -> Self {
        Self {
            media,
            media_base,
            state: PlaybackState::Idle,
            current_index: 0,
            now_playing: None,
            load_failed: false,
            progress: Progress::default(),
            durations: HashMap::new(),
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Track currently loaded into the media element.
    pub fn now_playing(&self) -> Option<&Track> {
        self.now_playing.as_ref()
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn volume(&self) -> f32 {
        self.media.volume()
    }

    pub fn media(&self) -> &dyn MediaElement {
        self.media.as_ref()
    }

    /// Duration learned for a track name, if it has been played before.
    pub fn known_duration(&self, name: &str) -> Option<f64> {
        self.durations.get(name).copied()
    }

    pub fn drain_events(&mut self) -> Vec<TransportEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn play_track_at(&mut self, playlist: Option<&Playlist>, index: usize) -> bool {
        let Some(track) = playlist.and_then(|p| p.songs.get(index)) else {
            debug!(index, "Ignoring play request outside the playlist");
            return false;
        };

        let url = match media_url(&self.media_base, &track.name) {
            Ok(url) => url,
            Err(e) => {
                warn!(track = %track.name, error = %e, "Cannot build media url");
                return false;
            }
        };

        info!(track = %track.name, index, "Loading track");
        if let Err(e) = self.media.set_source(url.as_str()) {
            warn!(track = %track.name, error = %e, "Media element rejected source");
        }
        self.current_index = index;
        self.now_playing = Some(track.clone());
        self.load_failed = false;
        self.progress = Progress::default();
        self.events.push(TransportEvent::Loading(track.clone()));

        if let Err(e) = self.media.play() {
            warn!(track = %track.name, error = %e, "Playback did not start");
        }
        self.state = PlaybackState::Playing;
        self.events.push(TransportEvent::Started(track.clone()));
        true
    }

    pub fn toggle_play_pause(&mut self) -> bool {
        let Some(track) = self.now_playing.clone() else {
            return false;
        };

        match self.state {
            PlaybackState::Idle => return false,
            PlaybackState::Playing => {
                if let Err(e) = self.media.pause() {
                    warn!(error = %e, "Pause failed");
                }
                self.state = PlaybackState::Paused;
                self.events.push(TransportEvent::Paused(track));
            }
            PlaybackState::Paused => {
                if self.load_failed {
                    debug!(track = %track.name, "Source failed to load, not resuming");
                    return false;
                }
                if let Err(e) = self.media.play() {
                    warn!(error = %e, "Resume failed");
                }
                if self.media.paused() {
                    return false;
                }
                self.state = PlaybackState::Playing;
                self.events.push(TransportEvent::Started(track));
            }
        }
        true
    }

    pub fn play_next(&mut self, playlist: Option<&Playlist>) -> bool {
        let len = playlist.map(|p| p.len()).unwrap_or(0);
        if self.current_index + 1 >= len {
            return false;
        }
        self.play_track_at(playlist, self.current_index + 1)
    }

    pub fn play_previous(&mut self, playlist: Option<&Playlist>) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.play_track_at(playlist, self.current_index - 1)
    }

    /// Natural end of the source: advance, or stop after the last track.
    pub fn on_ended(&mut self, playlist: Option<&Playlist>) {
        if self.play_next(playlist) {
            return;
        }
        if self.state == PlaybackState::Playing {
            info!("Reached the end of the playlist");
            if let Err(e) = self.media.pause() {
                warn!(error = %e, "Pause failed");
            }
            self.state = PlaybackState::Paused;
            if let Some(track) = self.now_playing.clone() {
                self.events.push(TransportEvent::Paused(track));
            }
        }
    }

    /// The media element finished probing `source`.
    /// Signals for anything but the current source are stale and ignored.
    pub fn on_media_ready(&mut self, source: &str, duration: Option<f64>) -> bool {
        if self.media.source() != Some(source) {
            return false;
        }
        self.load_failed = false;
        let duration = duration.filter(|d| d.is_finite() && *d > 0.0);
        if let (Some(track), Some(d)) = (&self.now_playing, duration) {
            self.durations.insert(track.name.clone(), d);
        }
        self.on_time_update();
        true
    }

    /// The media element could not load `source`. Returns the affected track.
    pub fn on_media_failed(&mut self, source: &str, reason: &str) -> Option<Track> {
        if self.media.source() != Some(source) {
            debug!(source, "Ignoring failure of a superseded source");
            return None;
        }
        warn!(source, reason, "Media load failed");
        self.load_failed = true;
        if let Err(e) = self.media.pause() {
            warn!(error = %e, "Pause failed");
        }
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
        self.now_playing.clone()
    }

    /// Seek to a fraction of the known duration. Out-of-range input is clamped.
    pub fn seek_to(&mut self, fraction: f64) -> bool {
        if self.state == PlaybackState::Idle || !fraction.is_finite() {
            return false;
        }
        let Some(duration) = self.known_media_duration() else {
            debug!("Seek ignored, duration unknown");
            return false;
        };
        let target = fraction.clamp(0.0, 1.0) * duration;
        match self.media.set_current_time(target) {
            Ok(()) => {
                self.progress = Progress::compute(target, Some(duration));
                true
            }
            Err(e) => {
                warn!(target, error = %e, "Seek failed");
                false
            }
        }
    }

    /// Relative seek, expressed through `seek_to`.
    pub fn seek_by(&mut self, delta_secs: f64) -> bool {
        let Some(duration) = self.known_media_duration() else {
            return false;
        };
        let target = self.media.current_time() + delta_secs;
        self.seek_to(target / duration)
    }

    pub fn set_volume(&mut self, level: f32) {
        if !level.is_finite() {
            return;
        }
        self.media.set_volume(level.clamp(0.0, 1.0));
    }

    pub fn nudge_volume(&mut self, delta: f32) {
        let level = self.media.volume() + delta;
        self.set_volume(level);
    }

    /// Periodic clock signal from the media element.
    pub fn on_time_update(&mut self) {
        if self.state == PlaybackState::Idle {
            return;
        }
        let duration = self.known_media_duration();
        let next = Progress::compute(self.media.current_time(), duration);
        self.progress = Progress {
            // Keep the previous fill while the duration is still unknown.
            percent: next.percent.or(self.progress.percent),
            ..next
        };

        if let (Some(track), Some(d)) = (&self.now_playing, duration) {
            self.durations.entry(track.name.clone()).or_insert(d);
        }
    }

    /// True once when the media element reached the end of its source.
    pub fn take_ended(&mut self) -> bool {
        self.media.take_ended()
    }

    fn known_media_duration(&self) -> Option<f64> {
        self.media
            .duration()
            .filter(|d| d.is_finite() && *d > 0.0)
    }
}
