pub mod hitmap;
pub mod layout;
pub mod theme;
pub mod utils;
pub mod view;
pub mod widgets;

pub use hitmap::{HitMap, Target};
pub use theme::Theme;
pub use view::ViewModel;

use crate::app::App;
use crate::app::keys::KeyConfig;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

/// Draws the whole screen from scratch and records the click regions.
pub fn ui(f: &mut Frame, app: &mut App) {
    let view = view::build(app);
    let App {
        theme,
        keys,
        hitmap,
        artwork,
        ..
    } = app;
    hitmap.clear();

    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(theme.base)), area);
    let main = layout::get_main_layout(area, view.nav_open, view.fullscreen);

    if let Some(header) = main.header {
        widgets::header::render(f, header, &view, theme, hitmap);
    }
    if let Some(tracks) = main.tracks {
        widgets::tracks::render(f, tracks, &view, theme, hitmap);
    }
    if let Some(card) = main.card {
        widgets::player::render_card(f, card, &view, artwork, theme);
    }
    // Drawn after the table so its rows win the hit test
    if let Some(nav) = main.nav {
        widgets::sidebar::render(f, nav, &view, theme, hitmap);
    }
    widgets::player::render_bar(f, main.player_bar, &view, theme, hitmap);
    render_footer(f, main.footer, &view, keys, theme);

    if let Some(toast) = &view.toast {
        widgets::toast::render(f, toast, theme, hitmap);
    }
}

fn render_footer(f: &mut Frame, area: Rect, view: &ViewModel, keys: &KeyConfig, theme: &Theme) {
    if let Some(status) = &view.status {
        let line = Line::from(Span::styled(
            format!(" {}", status),
            Style::default().fg(theme.yellow),
        ));
        f.render_widget(Paragraph::new(line), area);
        return;
    }

    let key = Style::default().fg(theme.cyan).add_modifier(Modifier::BOLD);
    let label = Style::default().fg(theme.overlay);
    let hints = [
        (&keys.play_pause, "play"),
        (&keys.next_track, "next"),
        (&keys.prev_track, "prev"),
        (&keys.toggle_menu, "playlists"),
        (&keys.toggle_fullscreen, "fullscreen"),
        (&keys.quit, "quit"),
    ];
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(k, what)| {
            [
                Span::styled(format!(" {} ", keys.display(k)), key),
                Span::styled(format!("{} ", what), label),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Right), area);
}
