use thiserror::Error;
use tracing::debug;

/// Smallest terminal the expanded now-playing view is drawn in.
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 12;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FullscreenError {
    #[error(
        "terminal is {width}x{height}, fullscreen needs at least {min_w}x{min_h}",
        min_w = MIN_WIDTH,
        min_h = MIN_HEIGHT
    )]
    TooSmall { width: u16, height: u16 },
    #[error("fullscreen is already {0}")]
    Unchanged(&'static str),
}

/// Expanded now-playing view 🖥️
///
/// Requests only report the state to switch to. The view changes when the
/// `FullscreenChanged` signal comes back, never from the request itself.
#[derive(Debug, Default)]
pub struct FullscreenController {
    active: bool,
}

impl FullscreenController {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn request(&self, size: (u16, u16)) -> Result<bool, FullscreenError> {
        if self.active {
            return Err(FullscreenError::Unchanged("active"));
        }
        let (width, height) = size;
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return Err(FullscreenError::TooSmall { width, height });
        }
        Ok(true)
    }

    pub fn exit(&self) -> Result<bool, FullscreenError> {
        if !self.active {
            return Err(FullscreenError::Unchanged("inactive"));
        }
        Ok(false)
    }

    pub fn toggle(&self, size: (u16, u16)) -> Result<bool, FullscreenError> {
        if self.active {
            self.exit()
        } else {
            self.request(size)
        }
    }

    /// The fullscreen-change signal.
    pub fn on_changed(&mut self, active: bool) {
        debug!(active, "Fullscreen changed");
        self.active = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_needs_room() {
        let fs = FullscreenController::default();
        assert_eq!(
            fs.request((30, 10)),
            Err(FullscreenError::TooSmall { width: 30, height: 10 })
        );
        assert_eq!(fs.request((120, 40)), Ok(true));
        // The request alone does not switch the view
        assert!(!fs.is_active());
    }

    #[test]
    fn test_toggle_follows_signal() {
        let mut fs = FullscreenController::default();
        assert_eq!(fs.exit(), Err(FullscreenError::Unchanged("inactive")));
        fs.on_changed(true);
        assert_eq!(fs.toggle((10, 5)), Ok(false));
        fs.on_changed(false);
        assert!(!fs.is_active());
    }
}
