use crate::artwork::{half_block_lines, ArtworkCache};
use crate::catalog::Track;
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

pub fn render(
    f: &mut Frame,
    area: Rect,
    track: Option<&Track>,
    artwork: &mut ArtworkCache,
    theme: &Theme,
) {
    // Early exit if area too small
    if area.height < 2 || area.width < 4 {
        return;
    }

    let Some(track) = track else {
        let text = "\n\n\n        ♪\n  Nothing playing".to_string();
        let p = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().style(Style::default().fg(theme.overlay).bg(Color::Reset)));
        f.render_widget(p, area);
        return;
    };

    let image = artwork.get(track);
    let lines = half_block_lines(&image, area.width, area.height);
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().style(Style::default().bg(Color::Reset)));
    f.render_widget(widget, area);
}
