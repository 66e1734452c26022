use crate::ui::hitmap::{HitMap, Target};
use crate::ui::theme::Theme;
use crate::ui::utils::truncate;
use crate::ui::view::ViewModel;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

/// Collapsible navigation panel listing the playlists 📚
pub fn render(f: &mut Frame, area: Rect, view: &ViewModel, theme: &Theme, hits: &mut HitMap) {
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.magenta))
        .title(Span::styled(
            " Playlists ",
            Style::default().fg(theme.magenta).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);
    hits.push(area, Target::NavPanel);

    let name_w = inner.width.saturating_sub(9) as usize;
    for (i, entry) in view.playlists.iter().enumerate() {
        let row = inner.y + (i as u16) * 2;
        if row >= inner.y + inner.height {
            break;
        }
        let (marker, style) = if entry.active {
            (
                "●",
                Style::default().fg(theme.green).add_modifier(Modifier::BOLD),
            )
        } else {
            ("○", Style::default().fg(theme.text))
        };
        let line = Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{:<name_w$}", truncate(&entry.name, name_w)), style),
            Span::styled(
                format!("{:>4}", entry.count),
                Style::default().fg(theme.overlay),
            ),
        ]);
        let row_area = Rect::new(inner.x, row, inner.width, 1);
        f.render_widget(Paragraph::new(line), row_area);
        hits.push(row_area, Target::Playlist(i));
    }
}
