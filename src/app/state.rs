use super::fullscreen::FullscreenController;
use super::keys::KeyConfig;
use super::tmux;
use crate::artwork::ArtworkCache;
use crate::catalog::{CatalogError, Track};
use crate::config::AppConfig;
use crate::notifier::Notifier;
use crate::player::Transport;
use crate::playlist::PlaylistStore;
use crate::ui::hitmap::HitMap;
use crate::ui::theme::Theme;
use rand::Rng;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Where the catalog fetch stands.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogStatus {
    Loading,
    Ready(usize),
    Unavailable(String),
}

pub struct App {
    pub theme: Theme,
    pub keys: KeyConfig,
    pub is_running: bool,

    pub store: PlaylistStore,
    pub transport: Transport,
    pub notifier: Notifier,
    pub catalog_status: CatalogStatus,

    /// Navigation panel (playlists) open
    pub nav_open: bool,
    pub fullscreen: FullscreenController,
    /// Cursor row in the track table
    pub selected: usize,

    /// Click regions recorded by the last draw
    pub hitmap: HitMap,
    pub artwork: ArtworkCache,
    /// tmux pane to focus when a notification is clicked
    pub tmux_pane: Option<String>,
}

impl App {
    pub fn new(config: &AppConfig, mut transport: Transport, notifier: Notifier) -> Self {
        transport.set_volume(config.volume);
        Self {
            theme: config.theme.clone(),
            keys: config.keys.clone(),
            is_running: true,
            store: PlaylistStore::new(),
            transport,
            notifier,
            catalog_status: CatalogStatus::Loading,
            nav_open: false,
            fullscreen: FullscreenController::default(),
            selected: 0,
            hitmap: HitMap::default(),
            artwork: ArtworkCache::default(),
            tmux_pane: None,
        }
    }

    pub fn current_len(&self) -> usize {
        self.store.current().map(|p| p.len()).unwrap_or(0)
    }

    pub fn on_catalog_loaded<R: Rng + ?Sized>(
        &mut self,
        result: Result<Vec<Track>, CatalogError>,
        rng: &mut R,
    ) {
        match result {
            Ok(catalog) => {
                info!(tracks = catalog.len(), "Catalog loaded");
                self.store.load_catalog(&catalog, rng);
                self.catalog_status = CatalogStatus::Ready(catalog.len());
                self.selected = 0;
            }
            Err(e) => {
                error!(error = %e, "Error fetching music list");
                self.catalog_status = CatalogStatus::Unavailable(e.to_string());
            }
        }
    }

    /// A reload is only ever started by the user.
    pub fn begin_reload(&mut self) -> bool {
        if self.catalog_status == CatalogStatus::Loading {
            return false;
        }
        self.catalog_status = CatalogStatus::Loading;
        true
    }

    pub fn select_playlist(&mut self, name: &str) -> bool {
        if !self.store.select_playlist(name) {
            debug!(name, "No such playlist");
            return false;
        }
        self.selected = 0;
        true
    }

    pub fn select_playlist_at(&mut self, position: usize) -> bool {
        let Some(name) = self
            .store
            .list_playlists()
            .get(position)
            .map(|p| p.name.clone())
        else {
            return false;
        };
        self.select_playlist(&name)
    }

    pub fn cycle_playlist(&mut self, forward: bool) {
        if self.store.cycle(forward).is_some() {
            self.selected = 0;
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.current_len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, len as isize - 1) as usize;
    }

    pub fn on_track_selected(&mut self, index: usize) {
        if self.transport.play_track_at(self.store.current(), index) {
            self.selected = index;
        }
        self.flush_transport_events();
    }

    pub fn on_playback_toggled(&mut self) {
        self.transport.toggle_play_pause();
        self.flush_transport_events();
    }

    pub fn on_next(&mut self) {
        if self.transport.play_next(self.store.current()) {
            self.selected = self.transport.current_index();
        }
        self.flush_transport_events();
    }

    pub fn on_previous(&mut self) {
        if self.transport.play_previous(self.store.current()) {
            self.selected = self.transport.current_index();
        }
        self.flush_transport_events();
    }

    pub fn on_track_ended(&mut self) {
        self.transport.on_ended(self.store.current());
        if self.transport.is_playing() {
            self.selected = self.transport.current_index();
        }
        self.flush_transport_events();
    }

    pub fn on_time_update(&mut self) {
        self.transport.on_time_update();
        if self.transport.take_ended() {
            self.on_track_ended();
        }
    }

    pub fn on_media_ready(&mut self, source: &str, duration: Option<f64>) {
        self.transport.on_media_ready(source, duration);
    }

    pub fn on_media_failed(&mut self, source: &str, reason: &str) {
        if let Some(track) = self.transport.on_media_failed(source, reason) {
            self.notifier
                .notify_message(format!("⚠️ Cannot play\n{}", track.display_title()));
        }
    }

    pub fn seek_to(&mut self, fraction: f64) {
        self.transport.seek_to(fraction);
    }

    pub fn seek_by(&mut self, delta_secs: f64) {
        self.transport.seek_by(delta_secs);
    }

    pub fn set_volume(&mut self, level: f32) {
        self.transport.set_volume(level);
    }

    pub fn nudge_volume(&mut self, delta: f32) {
        self.transport.nudge_volume(delta);
    }

    pub fn toggle_nav(&mut self) {
        self.nav_open = !self.nav_open;
    }

    /// Asks for the opposite fullscreen state. On success the returned state
    /// must be delivered back as `FullscreenChanged`.
    pub fn request_fullscreen_toggle(&self, size: (u16, u16)) -> Option<bool> {
        match self.fullscreen.toggle(size) {
            Ok(next) => Some(next),
            Err(e) => {
                warn!(error = %e, "Fullscreen request failed");
                None
            }
        }
    }

    pub fn on_fullscreen_changed(&mut self, active: bool) {
        self.fullscreen.on_changed(active);
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.notifier.on_tick(now);
    }

    /// Click on the notification: close it and bring the player forward.
    pub fn on_notification_clicked(&mut self) {
        if self.notifier.dismiss().is_none() {
            return;
        }
        if let Some(pane) = &self.tmux_pane {
            if let Err(e) = tmux::focus_pane(pane) {
                warn!(error = %e, "Cannot focus tmux pane");
            }
        }
    }

    /// Esc: notification first, then the navigation panel.
    pub fn close_overlay(&mut self) {
        if self.notifier.active().is_some() {
            self.notifier.dismiss();
        } else {
            self.nav_open = false;
        }
    }

    fn flush_transport_events(&mut self) {
        for event in self.transport.drain_events() {
            self.notifier.notify(&event);
        }
    }
}
