use crate::ui::hitmap::{HitMap, Target};
use crate::ui::theme::Theme;
use crate::ui::utils::truncate;
use crate::ui::view::{ViewModel, MENU_GLYPH};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, view: &ViewModel, theme: &Theme, hits: &mut HitMap) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.surface));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width < 8 || inner.height == 0 {
        return;
    }

    let menu_style = if view.nav_open {
        Style::default().fg(theme.magenta).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    let menu_area = Rect::new(inner.x, inner.y, 3, 1);
    f.render_widget(
        Paragraph::new(Span::styled(format!(" {}", MENU_GLYPH), menu_style)),
        menu_area,
    );
    hits.push(menu_area, Target::Menu);

    let fs_area = Rect::new(inner.x + inner.width - 3, inner.y, 3, 1);
    f.render_widget(
        Paragraph::new(Span::styled(
            format!("{} ", view.fullscreen_glyph),
            Style::default().fg(theme.text),
        ))
        .alignment(Alignment::Right),
        fs_area,
    );
    hits.push(fs_area, Target::Fullscreen);

    let title_width = inner.width.saturating_sub(8) as usize;
    let heading = if view.heading.is_empty() {
        "Aurora".to_string()
    } else {
        view.heading.clone()
    };
    let mut spans = vec![Span::styled(
        truncate(&heading, title_width),
        Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
    )];
    if !view.description.is_empty() {
        let used = heading.chars().count() + 3;
        spans.push(Span::styled(
            format!(" · {}", truncate(&view.description, title_width.saturating_sub(used))),
            Style::default().fg(theme.overlay),
        ));
    }
    let title_area = Rect::new(inner.x + 4, inner.y, inner.width.saturating_sub(8), 1);
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        title_area,
    );
}
