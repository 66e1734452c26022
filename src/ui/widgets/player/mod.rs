use crate::artwork::ArtworkCache;
use crate::ui::hitmap::HitMap;
use crate::ui::theme::Theme;
use crate::ui::view::ViewModel;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub mod art;
pub mod controls;
pub mod info;
pub mod progress;

/// Expanded now-playing card: artwork, title and artist 🎵
pub fn render_card(
    f: &mut Frame,
    area: Rect,
    view: &ViewModel,
    artwork: &mut ArtworkCache,
    theme: &Theme,
) {
    let title = Line::from(vec![Span::styled(
        " Now Playing ",
        Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
    )]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(theme.blue))
        .style(Style::default().bg(Color::Reset));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Artwork (elastic)
            Constraint::Length(1), // Spacer
            Constraint::Length(2), // Info
        ])
        .split(inner);

    let now = view.now_playing.as_ref();
    art::render(f, chunks[0], now.map(|n| &n.track), artwork, theme);
    info::render(f, chunks[2], now, theme);
}

/// Bottom bar: compact now-playing and transport on top, progress, volume.
pub fn render_bar(f: &mut Frame, area: Rect, view: &ViewModel, theme: &Theme, hits: &mut HitMap) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.surface));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 3 {
        return;
    }

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Min(15),
            Constraint::Percentage(30),
        ])
        .split(Rect::new(inner.x, inner.y, inner.width, 1));

    f.render_widget(
        Paragraph::new(info::compact_line(
            view.now_playing.as_ref(),
            top[0].width as usize,
            theme,
        )),
        top[0],
    );
    controls::render_buttons(f, top[1], view, theme, hits);
    controls::render_volume(f, top[2], view.volume, theme, hits);

    progress::render(
        f,
        Rect::new(inner.x, inner.y + 2, inner.width, 1),
        &view.progress,
        theme,
        hits,
    );
}
