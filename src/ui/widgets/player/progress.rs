use crate::player::Progress;
use crate::ui::hitmap::{HitMap, Target};
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// `━━━━●────` line for a fill ratio in [0, 1].
pub fn bar_spans(width: usize, ratio: f64, theme: &Theme) -> Vec<Span<'static>> {
    let occupied_width = (width as f64 * ratio.clamp(0.0, 1.0)).round() as usize;
    let fill_style = Style::default().fg(theme.magenta);
    let empty_style = Style::default().fg(theme.surface);

    (0..width)
        .map(|i| {
            if i < occupied_width {
                if i == occupied_width - 1 {
                    // Playhead knob
                    Span::styled("●", fill_style)
                } else {
                    Span::styled("━", fill_style)
                }
            } else {
                Span::styled("─", empty_style)
            }
        })
        .collect()
}

/// `elapsed ━━━●──── total`; the bar itself is clickable.
pub fn render(f: &mut Frame, area: Rect, progress: &Progress, theme: &Theme, hits: &mut HitMap) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(4),
            Constraint::Length(7),
        ])
        .split(area);

    let muted = Style::default().fg(theme.overlay);
    f.render_widget(
        Paragraph::new(Span::styled(format!("{:>6} ", progress.elapsed), muted)),
        chunks[0],
    );

    let ratio = progress.percent.unwrap_or(0.0) / 100.0;
    let bar = Line::from(bar_spans(chunks[1].width as usize, ratio, theme));
    f.render_widget(Paragraph::new(bar), chunks[1]);
    hits.push(chunks[1], Target::Progress);

    f.render_widget(
        Paragraph::new(Span::styled(format!(" {}", progress.total), muted)),
        chunks[2],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_bar_fill() {
        let theme = Theme::default();
        assert_eq!(text(&bar_spans(10, 0.0, &theme)), "──────────");
        assert_eq!(text(&bar_spans(10, 0.5, &theme)), "━━━━●─────");
        assert_eq!(text(&bar_spans(4, 7.0, &theme)), "━━━●");
    }
}
