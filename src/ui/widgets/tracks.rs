use crate::ui::hitmap::{HitMap, Target};
use crate::ui::theme::Theme;
use crate::ui::utils::truncate;
use crate::ui::view::ViewModel;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, view: &ViewModel, theme: &Theme, hits: &mut HitMap) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.surface))
        .title(Span::styled(
            format!(" {} songs ", view.rows.len()),
            Style::default().fg(theme.green),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    let green = theme.green;
    let pink = theme.red;
    let cream = theme.yellow;
    let muted = theme.overlay;
    let grid = theme.surface;

    let width = inner.width as usize;
    let time_w = 6;
    let artist_w = width / 4;
    let title_w = width.saturating_sub(artist_w + time_w + 10);

    // Column header
    let header = Line::from(vec![
        Span::styled(format!("{:>6}  ", "#"), Style::default().fg(muted)),
        Span::styled(format!("{:title_w$}", "Title"), Style::default().fg(muted)),
        Span::styled(format!("{:artist_w$}", "Artist"), Style::default().fg(muted)),
        Span::styled(format!("{:>time_w$}", "Time"), Style::default().fg(muted)),
    ]);
    f.render_widget(Paragraph::new(header), Rect::new(inner.x, inner.y, inner.width, 1));

    let content_h = inner.height as usize - 1;
    if view.rows.is_empty() {
        let msg = if view.status.is_some() {
            "Nothing loaded"
        } else {
            "No tracks in this playlist"
        };
        f.render_widget(
            Paragraph::new(Span::styled(msg, Style::default().fg(muted))).alignment(Alignment::Center),
            Rect::new(inner.x, inner.y + 1 + content_h as u16 / 2, inner.width, 1),
        );
        return;
    }

    let selected = view.rows.iter().position(|r| r.selected).unwrap_or(0);
    let start_idx = selected
        .saturating_sub(content_h / 2)
        .min(view.rows.len().saturating_sub(content_h));

    for (display_idx, row) in view.rows.iter().skip(start_idx).take(content_h).enumerate() {
        // Markers: ◉ playing (wins over the cursor), ● cursor, ○ normal
        let (marker, m_color, t_style, a_style) = if row.playing {
            let title = Style::default().fg(pink);
            (
                "◉",
                pink,
                if row.selected {
                    title.add_modifier(Modifier::BOLD)
                } else {
                    title
                },
                Style::default().fg(pink),
            )
        } else if row.selected {
            (
                "●",
                cream,
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                Style::default().fg(theme.text),
            )
        } else {
            (
                "○",
                grid,
                Style::default().fg(theme.text),
                Style::default().fg(muted),
            )
        };
        let note_color = if row.playing { pink } else { green };

        let line = Line::from(vec![
            Span::styled(format!(" {} ", marker), Style::default().fg(m_color)),
            Span::styled(
                format!("{:>2} ", row.position),
                Style::default().fg(if row.selected { green } else { muted }),
            ),
            Span::styled("♪ ", Style::default().fg(note_color)),
            Span::styled(
                format!(
                    "{:title_w$}",
                    truncate(&row.title, title_w.saturating_sub(1)),
                    title_w = title_w
                ),
                t_style,
            ),
            Span::styled(
                format!(
                    "{:artist_w$}",
                    truncate(&row.artist, artist_w.saturating_sub(1)),
                    artist_w = artist_w
                ),
                a_style,
            ),
            Span::styled(
                format!("{:>time_w$}", row.duration),
                Style::default().fg(if row.playing { pink } else { muted }),
            ),
        ]);

        let row_area = Rect::new(inner.x, inner.y + 1 + display_idx as u16, inner.width, 1);
        f.render_widget(Paragraph::new(line), row_area);
        hits.push(row_area, Target::Track(start_idx + display_idx));
    }
}
