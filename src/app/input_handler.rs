use crate::app::App;
use crate::player::{SEEK_STEP_SECS, VOLUME_STEP};
use crate::ui::hitmap::{fraction, Target};
use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

/// Work the event loop has to carry out on the app's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ReloadCatalog,
    /// Deliver `FullscreenChanged` with this state
    Fullscreen(bool),
}

pub fn handle_event(event: Event, app: &mut App, size: (u16, u16)) -> Option<Effect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(key, app, size),
        Event::Mouse(mouse) => handle_mouse(mouse, app, size),
        _ => None,
    }
}

pub fn handle_key(key: KeyEvent, app: &mut App, size: (u16, u16)) -> Option<Effect> {
    let keys = app.keys.clone();

    // Quit ('q')
    if keys.matches(key, &keys.quit) {
        app.is_running = false;
        return None;
    }

    // Close notification, then nav panel ('Esc')
    if keys.matches(key, &keys.close) {
        app.close_overlay();
        return None;
    }

    // Play/Pause ('Space')
    if keys.matches(key, &keys.play_pause) {
        app.on_playback_toggled();
        return None;
    }

    // Next / Previous ('n' / 'p')
    if keys.matches(key, &keys.next_track) {
        app.on_next();
        return None;
    }
    if keys.matches(key, &keys.prev_track) {
        app.on_previous();
        return None;
    }

    // Seek ('l' / 'h')
    if keys.matches(key, &keys.seek_forward) {
        app.seek_by(SEEK_STEP_SECS);
        return None;
    }
    if keys.matches(key, &keys.seek_backward) {
        app.seek_by(-SEEK_STEP_SECS);
        return None;
    }

    // Volume ('+' / '-')
    if keys.matches(key, &keys.volume_up) {
        app.nudge_volume(VOLUME_STEP);
        return None;
    }
    if keys.matches(key, &keys.volume_down) {
        app.nudge_volume(-VOLUME_STEP);
        return None;
    }

    if keys.matches(key, &keys.toggle_menu) {
        app.toggle_nav();
        return None;
    }

    if keys.matches(key, &keys.toggle_fullscreen) {
        return app.request_fullscreen_toggle(size).map(Effect::Fullscreen);
    }

    if keys.matches(key, &keys.reload) {
        return app.begin_reload().then_some(Effect::ReloadCatalog);
    }

    // Track list cursor ('j'/'k' or arrows)
    if keys.matches(key, &keys.nav_down) || keys.matches(key, &keys.nav_down_alt) {
        app.move_cursor(1);
        return None;
    }
    if keys.matches(key, &keys.nav_up) || keys.matches(key, &keys.nav_up_alt) {
        app.move_cursor(-1);
        return None;
    }
    if keys.matches(key, &keys.play_selected) {
        app.on_track_selected(app.selected);
        return None;
    }

    // Playlists ('Tab' / 'BackTab' / '1'-'4')
    if keys.matches(key, &keys.playlist_next) {
        app.cycle_playlist(true);
        return None;
    }
    if keys.matches(key, &keys.playlist_prev) {
        app.cycle_playlist(false);
        return None;
    }
    for (position, digit) in ['1', '2', '3', '4'].into_iter().enumerate() {
        if keys.matches(key, &digit.to_string()) {
            app.select_playlist_at(position);
            return None;
        }
    }

    None
}

pub fn handle_mouse(mouse: MouseEvent, app: &mut App, size: (u16, u16)) -> Option<Effect> {
    match mouse.kind {
        MouseEventKind::ScrollDown => {
            app.move_cursor(1);
            None
        }
        MouseEventKind::ScrollUp => {
            app.move_cursor(-1);
            None
        }
        MouseEventKind::Down(MouseButton::Left) => click(mouse.column, mouse.row, app, size),
        _ => None,
    }
}

fn click(column: u16, row: u16, app: &mut App, size: (u16, u16)) -> Option<Effect> {
    let hit = app.hitmap.hit(column, row);

    // Any click outside the open nav panel closes it, then still acts
    if app.nav_open
        && !matches!(
            hit,
            Some((Target::NavPanel | Target::Playlist(_) | Target::Menu, _))
        )
    {
        app.nav_open = false;
    }

    let (target, area) = hit?;
    match target {
        Target::Menu => app.toggle_nav(),
        Target::Fullscreen => {
            return app.request_fullscreen_toggle(size).map(Effect::Fullscreen);
        }
        Target::NavPanel => {}
        Target::Playlist(position) => {
            app.select_playlist_at(position);
        }
        Target::Track(index) => app.on_track_selected(index),
        Target::Previous => app.on_previous(),
        Target::PlayPause => app.on_playback_toggled(),
        Target::Next => app.on_next(),
        Target::Progress => app.seek_to(fraction(area, column)),
        Target::Volume => app.set_volume(fraction(area, column) as f32),
        Target::Notification => app.on_notification_clicked(),
    }
    None
}
