use ratatui::layout::{Position, Rect};

/// Something on screen that reacts to a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Menu,
    Fullscreen,
    NavPanel,
    Playlist(usize),
    Track(usize),
    Previous,
    PlayPause,
    Next,
    Progress,
    Volume,
    Notification,
}

/// Click regions recorded while drawing, in draw order.
#[derive(Debug, Default, Clone)]
pub struct HitMap {
    regions: Vec<(Rect, Target)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, area: Rect, target: Target) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, target));
        }
    }

    /// Topmost target under the cell. Later regions are drawn over earlier ones.
    pub fn hit(&self, column: u16, row: u16) -> Option<(Target, Rect)> {
        let pos = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(pos))
            .map(|(area, target)| (*target, *area))
    }

    pub fn area_of(&self, target: Target) -> Option<Rect> {
        self.regions
            .iter()
            .find(|(_, t)| *t == target)
            .map(|(area, _)| *area)
    }
}

/// Horizontal position of `column` inside `area`, in `[0, 1]`.
pub fn fraction(area: Rect, column: u16) -> f64 {
    if area.width <= 1 {
        return 0.0;
    }
    let offset = column.saturating_sub(area.x) as f64;
    (offset / (area.width - 1) as f64).clamp(0.0, 1.0)
}
