//! Pure projection of the app state onto what the screen shows.
//!
//! Nothing in here draws. `draw` turns a [`ViewModel`] into widgets, which
//! keeps every label, glyph and highlight testable without a terminal.

use crate::app::{App, CatalogStatus};
use crate::catalog::Track;
use crate::player::{Progress, PlaybackState, TIME_PLACEHOLDER};
use crate::ui::utils::truncate;
use std::time::Instant;

pub const MENU_GLYPH: &str = "☰";
pub const PLAY_GLYPH: &str = "▶";
pub const PAUSE_GLYPH: &str = "⏸";
pub const PREV_GLYPH: &str = "⏮";
pub const NEXT_GLYPH: &str = "⏭";
pub const EXPAND_GLYPH: &str = "⤢";
pub const COMPRESS_GLYPH: &str = "⤡";

#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistEntry {
    pub name: String,
    pub count: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackRow {
    /// 1-based
    pub position: usize,
    pub title: String,
    pub artist: String,
    pub duration: String,
    pub playing: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub track: Track,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastView {
    pub title: String,
    pub lines: Vec<String>,
    /// Seconds since shown, drives the slide-in
    pub age: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub heading: String,
    pub description: String,
    pub playlists: Vec<PlaylistEntry>,
    pub rows: Vec<TrackRow>,
    pub now_playing: Option<NowPlaying>,
    pub play_glyph: &'static str,
    pub fullscreen_glyph: &'static str,
    pub progress: Progress,
    pub volume: f32,
    pub nav_open: bool,
    pub fullscreen: bool,
    pub status: Option<String>,
    pub toast: Option<ToastView>,
}

pub fn build(app: &App) -> ViewModel {
    build_at(app, Instant::now())
}

pub fn build_at(app: &App, now: Instant) -> ViewModel {
    let transport = &app.transport;
    let is_playing = transport.state() == PlaybackState::Playing;
    let current = app.store.current();
    let loaded_name = transport.now_playing().map(|t| t.name.as_str());

    let playlists = app
        .store
        .list_playlists()
        .iter()
        .map(|p| PlaylistEntry {
            name: p.name.clone(),
            count: p.len(),
            active: current.is_some_and(|c| c.name == p.name),
        })
        .collect();

    let rows = current
        .map(|playlist| {
            playlist
                .songs
                .iter()
                .enumerate()
                .map(|(i, track)| TrackRow {
                    position: i + 1,
                    title: track.display_title(),
                    artist: track.display_artist(),
                    duration: transport
                        .known_duration(&track.name)
                        .map(crate::player::format_clock)
                        .unwrap_or_else(|| TIME_PLACEHOLDER.to_string()),
                    playing: is_playing
                        && i == transport.current_index()
                        && loaded_name == Some(track.name.as_str()),
                    selected: i == app.selected,
                })
                .collect()
        })
        .unwrap_or_default();

    let now_playing = transport.now_playing().map(|track| NowPlaying {
        title: track.display_title(),
        artist: track.display_artist(),
        track: track.clone(),
    });

    let status = match &app.catalog_status {
        CatalogStatus::Loading => Some("Loading catalog…".to_string()),
        CatalogStatus::Ready(_) => None,
        CatalogStatus::Unavailable(reason) => Some(format!(
            "⚠ Catalog unavailable ({}) · press {} to retry",
            truncate(reason, 60),
            app.keys.display(&app.keys.reload)
        )),
    };

    let toast = app.notifier.active().map(|active| ToastView {
        title: active.notification.title.clone(),
        lines: active
            .notification
            .body
            .lines()
            .map(str::to_string)
            .collect(),
        age: now.saturating_duration_since(active.shown_at).as_secs_f32(),
    });

    ViewModel {
        heading: current.map(|p| p.name.clone()).unwrap_or_default(),
        description: current.map(|p| p.description.clone()).unwrap_or_default(),
        playlists,
        rows,
        now_playing,
        play_glyph: if is_playing { PAUSE_GLYPH } else { PLAY_GLYPH },
        fullscreen_glyph: if app.fullscreen.is_active() {
            COMPRESS_GLYPH
        } else {
            EXPAND_GLYPH
        },
        progress: transport.progress().clone(),
        volume: transport.volume(),
        nav_open: app.nav_open,
        fullscreen: app.fullscreen.is_active(),
        status,
        toast,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, TrackMetadata};
    use crate::config::AppConfig;
    use crate::notifier::Notifier;
    use crate::player::{NullMedia, Transport};
    use crate::playlist::{FAVORITES, HYPIXEL_SKYBLOCK};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use reqwest::Url;

    fn app_with(catalog: Vec<Track>) -> App {
        let base = Url::parse("http://localhost:3000").unwrap();
        let transport = Transport::new(Box::new(NullMedia::default()), base);
        let mut app = App::new(&AppConfig::default(), transport, Notifier::new(false, None));
        app.on_catalog_loaded(Ok(catalog), &mut StdRng::seed_from_u64(7));
        app
    }

    fn scenario_catalog() -> Vec<Track> {
        vec![
            Track {
                name: "a.mp3".to_string(),
                metadata: TrackMetadata {
                    title: Some("A".to_string()),
                    artist: Some("X".to_string()),
                    picture: None,
                },
            },
            Track::new("b.mp3"),
        ]
    }

    #[test]
    fn test_second_track_shows_fallbacks() {
        let mut app = app_with(scenario_catalog());
        assert!(app.select_playlist(FAVORITES));
        app.on_track_selected(1);

        let view = build(&app);
        let now = view.now_playing.unwrap();
        assert_eq!(now.title, "b");
        assert_eq!(now.artist, "Unknown Artist");
        assert_eq!(view.rows[0].title, "A");
        assert_eq!(view.rows[1].artist, "Unknown Artist");
        assert!(view.rows[1].playing);
        assert!(!view.rows[0].playing);
        assert_eq!(view.play_glyph, PAUSE_GLYPH);
    }

    #[test]
    fn test_paused_row_is_not_marked_playing() {
        let mut app = app_with(scenario_catalog());
        app.on_track_selected(0);
        app.on_playback_toggled();

        let view = build(&app);
        assert!(view.rows.iter().all(|r| !r.playing));
        assert_eq!(view.play_glyph, PLAY_GLYPH);
    }

    #[test]
    fn test_empty_catalog_renders_no_rows() {
        let mut app = app_with(Vec::new());
        for entry in build(&app).playlists {
            assert_eq!(entry.count, 0);
            assert!(app.select_playlist(&entry.name));
            let view = build(&app);
            assert!(view.rows.is_empty());
            assert_eq!(view.heading, entry.name);
        }
        assert!(app.select_playlist(HYPIXEL_SKYBLOCK));
    }

    #[test]
    fn test_active_playlist_and_placeholders() {
        let app = app_with(scenario_catalog());
        let view = build(&app);
        let active: Vec<_> = view.playlists.iter().filter(|p| p.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, FAVORITES);
        assert!(view.rows.iter().all(|r| r.duration == TIME_PLACEHOLDER));
        assert_eq!(view.rows[1].position, 2);
        assert_eq!(view.progress.total, TIME_PLACEHOLDER);
        assert!(view.now_playing.is_none());
        assert_eq!(view.fullscreen_glyph, EXPAND_GLYPH);
    }

    #[test]
    fn test_failed_catalog_offers_retry() {
        let base = Url::parse("http://localhost:3000").unwrap();
        let transport = Transport::new(Box::new(NullMedia::default()), base);
        let mut app = App::new(&AppConfig::default(), transport, Notifier::new(false, None));
        app.on_catalog_loaded(Err(CatalogError::Status(500)), &mut StdRng::seed_from_u64(1));

        let view = build(&app);
        assert!(view.status.unwrap().contains("press r to retry"));
        assert!(view.rows.is_empty());
        assert!(view.playlists.iter().all(|p| !p.active));
    }
}
