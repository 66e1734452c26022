pub mod null;
pub mod progress;
pub mod stream;
pub mod traits;
pub mod transport;

pub use null::NullMedia;
pub use progress::{format_clock, Progress, TIME_PLACEHOLDER};
pub use stream::StreamMedia;
pub use traits::{MediaElement, MediaSignal, PlaybackState};
pub use transport::{Transport, TransportEvent, SEEK_STEP_SECS, VOLUME_STEP};

use reqwest::Client;
use rodio::OutputStream;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

/// Picks the media element for this machine.
///
/// The returned `OutputStream` must stay alive for as long as audio should
/// play; it is `None` when no output device could be opened, in which case
/// playback is silent.
pub fn open_media(
    client: Client,
    signals: UnboundedSender<MediaSignal>,
) -> (Option<OutputStream>, Box<dyn MediaElement>) {
    match OutputStream::try_default() {
        Ok((stream, handle)) => (
            Some(stream),
            Box::new(StreamMedia::new(handle, client, signals)),
        ),
        Err(e) => {
            warn!(error = %e, "No audio output device, playback will be silent");
            (None, Box::new(NullMedia::default()))
        }
    }
}
