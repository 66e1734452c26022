use crate::notifier::DISPLAY_TIME;
use crate::ui::hitmap::{HitMap, Target};
use crate::ui::theme::Theme;
use crate::ui::utils::truncate;
use crate::ui::view::ToastView;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const SLIDE_SECS: f32 = 0.3;

/// Notification popup, top-right, sliding in and out 🌊
pub fn render(f: &mut Frame, toast: &ToastView, theme: &Theme, hits: &mut HitMap) {
    let screen = f.area();
    let longest = toast
        .lines
        .iter()
        .map(|l| l.width())
        .chain(std::iter::once(toast.title.width()))
        .max()
        .unwrap_or(0) as u16;
    let width = (longest + 4).min(screen.width.saturating_sub(2)).max(10);
    let height = toast.lines.len() as u16 + 2;
    let target_x = screen.width.saturating_sub(width + 1);

    let life = DISPLAY_TIME.as_secs_f32();
    let offset = if toast.age < SLIDE_SECS {
        // Entrance: slide left, cubic out
        let t = toast.age / SLIDE_SECS;
        let ease = 1.0 - (1.0 - t).powi(3);
        width as f32 * (1.0 - ease)
    } else if toast.age > life - SLIDE_SECS {
        // Exit: slide right, cubic in
        let t = ((toast.age - (life - SLIDE_SECS)) / SLIDE_SECS).min(1.0);
        width as f32 * t.powi(3)
    } else {
        0.0
    };
    let x = target_x + offset as u16;
    if x >= screen.width {
        return;
    }

    let visible = Rect::new(x, 1, width, height).intersection(screen);
    if visible.is_empty() {
        return;
    }
    f.render_widget(Clear, visible);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.blue))
        .title(Span::styled(
            format!(" {} ", toast.title),
            Style::default().fg(theme.overlay),
        ))
        .style(Style::default().bg(Color::Reset));

    let inner_w = width.saturating_sub(4) as usize;
    let lines: Vec<Line> = toast
        .lines
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let style = if i == 0 {
                Style::default().fg(theme.blue).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            Line::from(Span::styled(format!(" {}", truncate(text, inner_w)), style))
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), visible);
    hits.push(visible, Target::Notification);
}
