use super::progress::bar_spans;
use crate::ui::hitmap::{HitMap, Target};
use crate::ui::theme::Theme;
use crate::ui::view::{ViewModel, NEXT_GLYPH, PREV_GLYPH};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const BUTTON_WIDTH: u16 = 5;

/// `⏮  ▶  ⏭`, centered in `area`.
pub fn render_buttons(f: &mut Frame, area: Rect, view: &ViewModel, theme: &Theme, hits: &mut HitMap) {
    let btn_style = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);
    let total = BUTTON_WIDTH * 3;
    if area.width < total || area.height == 0 {
        return;
    }
    let x0 = area.x + (area.width - total) / 2;

    let buttons = [
        (PREV_GLYPH, Target::Previous),
        (view.play_glyph, Target::PlayPause),
        (NEXT_GLYPH, Target::Next),
    ];
    for (i, (glyph, target)) in buttons.into_iter().enumerate() {
        let button = Rect::new(x0 + i as u16 * BUTTON_WIDTH, area.y, BUTTON_WIDTH, 1);
        let style = if target == Target::PlayPause {
            btn_style.fg(theme.magenta)
        } else {
            btn_style
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(format!("  {}  ", glyph), style))),
            button,
        );
        hits.push(button, target);
    }
}

/// `🔊 ━━━●── 80%`; the bar is clickable.
pub fn render_volume(f: &mut Frame, area: Rect, volume: f32, theme: &Theme, hits: &mut HitMap) {
    if area.width < 12 {
        return;
    }
    let icon = if volume <= 0.0 {
        "🔇"
    } else if volume < 0.5 {
        "🔉"
    } else {
        "🔊"
    };
    let muted = Style::default().fg(theme.overlay);
    f.render_widget(
        Paragraph::new(Span::styled(format!("{} ", icon), muted)),
        Rect::new(area.x, area.y, 3, 1),
    );

    let bar = Rect::new(area.x + 3, area.y, area.width - 8, 1);
    f.render_widget(
        Paragraph::new(Line::from(bar_spans(bar.width as usize, volume as f64, theme))),
        bar,
    );
    hits.push(bar, Target::Volume);

    f.render_widget(
        Paragraph::new(Span::styled(
            format!("{:>4}%", (volume * 100.0).round() as u32),
            muted,
        )),
        Rect::new(area.x + area.width - 5, area.y, 5, 1),
    );
}
