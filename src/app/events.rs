use crate::catalog::{CatalogError, Track};
use crossterm::event::Event;

pub enum AppEvent {
    Input(Event),
    CatalogLoaded(Result<Vec<Track>, CatalogError>),
    MediaReady {
        source: String,
        duration: Option<f64>,
    },
    MediaFailed {
        source: String,
        reason: String,
    },
    TimeUpdated,
    FullscreenChanged(bool),
    Tick,
}
