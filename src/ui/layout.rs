use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Card column only appears when the track table keeps this much room.
const CARD_MIN_TOTAL_WIDTH: u16 = 96;
const CARD_WIDTH: u16 = 34;
const NAV_WIDTH: u16 = 26;

pub struct MainLayout {
    pub header: Option<Rect>,
    pub nav: Option<Rect>,
    pub tracks: Option<Rect>,
    pub card: Option<Rect>,
    pub player_bar: Rect,
    pub footer: Rect,
}

pub fn get_main_layout(area: Rect, nav_open: bool, fullscreen: bool) -> MainLayout {
    if fullscreen {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Expanded card
                Constraint::Length(5), // Player bar
                Constraint::Length(1), // Footer
            ])
            .split(area);
        return MainLayout {
            header: None,
            nav: None,
            tracks: None,
            card: Some(chunks[0]),
            player_bar: chunks[1],
            footer: chunks[2],
        };
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(5), // Player bar
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let body = rows[1];
    let show_card = body.width >= CARD_MIN_TOTAL_WIDTH + if nav_open { NAV_WIDTH } else { 0 };

    let mut constraints = Vec::new();
    if nav_open {
        constraints.push(Constraint::Length(NAV_WIDTH));
    }
    constraints.push(Constraint::Min(20));
    if show_card {
        constraints.push(Constraint::Length(CARD_WIDTH));
    }
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(body);

    let mut cols = cols.iter().copied();
    let nav = if nav_open { cols.next() } else { None };
    let tracks = cols.next();
    let card = if show_card { cols.next() } else { None };

    MainLayout {
        header: Some(rows[0]),
        nav,
        tracks,
        card,
        player_bar: rows[2],
        footer: rows[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fullscreen_hides_lists() {
        let l = get_main_layout(Rect::new(0, 0, 120, 40), true, true);
        assert!(l.header.is_none() && l.nav.is_none() && l.tracks.is_none());
        assert_eq!(l.card.map(|c| c.height), Some(34));
    }

    #[test]
    fn test_nav_and_card_columns() {
        let l = get_main_layout(Rect::new(0, 0, 140, 40), true, false);
        assert_eq!(l.nav.map(|r| r.width), Some(NAV_WIDTH));
        assert_eq!(l.card.map(|r| r.width), Some(CARD_WIDTH));

        let narrow = get_main_layout(Rect::new(0, 0, 80, 24), false, false);
        assert!(narrow.nav.is_none());
        assert!(narrow.card.is_none());
        assert_eq!(narrow.tracks.map(|r| r.width), Some(80));
    }
}
