use crate::ui::theme::Theme;
use crate::ui::utils::truncate;
use crate::ui::view::NowPlaying;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Title over artist, centered.
pub fn render(f: &mut Frame, area: Rect, now: Option<&NowPlaying>, theme: &Theme) {
    let width = area.width as usize;
    let lines = match now {
        Some(now) => vec![
            Line::from(Span::styled(
                truncate(&now.title, width),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                truncate(&now.artist, width),
                Style::default().fg(theme.overlay),
            )),
        ],
        None => vec![Line::from(Span::styled(
            "Nothing playing",
            Style::default().fg(theme.overlay),
        ))],
    };
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// One-line `♪ title · artist` for the player bar.
pub fn compact_line(now: Option<&NowPlaying>, width: usize, theme: &Theme) -> Line<'static> {
    let Some(now) = now else {
        return Line::from(Span::styled(
            "♪ Nothing playing",
            Style::default().fg(theme.overlay),
        ));
    };
    let title = truncate(&now.title, width.saturating_sub(4));
    let rest = width.saturating_sub(title.chars().count() + 5);
    Line::from(vec![
        Span::styled("♪ ", Style::default().fg(theme.green)),
        Span::styled(title, Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" · {}", truncate(&now.artist, rest)),
            Style::default().fg(theme.overlay),
        ),
    ])
}
