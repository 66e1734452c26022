use super::traits::{MediaElement, MediaSignal};
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use rodio::{Decoder, OutputStreamHandle, Sink, Source};
use std::io::Cursor;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

/// Audio bytes of the current source plus what the decoder learned about them.
struct Loaded {
    generation: u64,
    bytes: Arc<[u8]>,
    duration: Option<Duration>,
}

/// State shared with the download task.
#[derive(Default)]
struct Shared {
    /// Bumped on every `set_source`; stale downloads compare against it and bail.
    generation: AtomicU64,
    loaded: Mutex<Option<Loaded>>,
}

impl Shared {
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

/// Media element that downloads the source over HTTP and plays it through rodio 🔊
///
/// `set_source` returns immediately; the download and decoding run on a
/// tokio task, feed the sink when done and report through `signals`. A newer
/// `set_source` supersedes any download still in flight.
pub struct StreamMedia {
    handle: OutputStreamHandle,
    client: Client,
    signals: UnboundedSender<MediaSignal>,
    shared: Arc<Shared>,
    sink: Option<Arc<Sink>>,
    source: Option<String>,
    volume: f32,
    finished: bool,
}

impl StreamMedia {
    pub fn new(
        handle: OutputStreamHandle,
        client: Client,
        signals: UnboundedSender<MediaSignal>,
    ) -> Self {
        Self {
            handle,
            client,
            signals,
            shared: Arc::new(Shared::default()),
            sink: None,
            source: None,
            volume: 1.0,
            finished: false,
        }
    }

    fn generation(&self) -> u64 {
        self.shared.generation.load(Ordering::SeqCst)
    }

    fn with_loaded<T>(&self, f: impl FnOnce(&Loaded) -> T) -> Option<T> {
        let generation = self.generation();
        let guard = self.shared.loaded.lock().ok()?;
        guard
            .as_ref()
            .filter(|loaded| loaded.generation == generation)
            .map(f)
    }

    /// Queue the finished source again from the start, paused.
    /// Only `play` starts it.
    fn restart(&mut self) -> Result<()> {
        let sink = self.sink.as_ref().context("no source loaded")?;
        sink.pause();
        let bytes = self
            .with_loaded(|loaded| loaded.bytes.clone())
            .context("source not downloaded yet")?;
        let decoder = Decoder::new(Cursor::new(bytes)).context("cannot decode source")?;
        sink.append(decoder);
        self.finished = false;
        Ok(())
    }
}

async fn download(client: &Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

impl MediaElement for StreamMedia {
    fn set_source(&mut self, url: &str) -> Result<()> {
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        if let Ok(mut loaded) = self.shared.loaded.lock() {
            *loaded = None;
        }
        self.source = Some(url.to_string());
        self.finished = false;

        let sink = Arc::new(Sink::try_new(&self.handle).context("cannot open audio sink")?);
        sink.set_volume(self.volume);
        sink.pause();
        self.sink = Some(sink.clone());

        let client = self.client.clone();
        let shared = self.shared.clone();
        let signals = self.signals.clone();
        let url = url.to_string();
        tokio::spawn(async move {
            let fail = |reason: String| {
                if shared.is_current(generation) {
                    let _ = signals.send(MediaSignal::Failed {
                        source: url.clone(),
                        reason,
                    });
                }
            };
            let bytes = match download(&client, &url).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    fail(format!("download failed: {}", e));
                    return;
                }
            };
            if !shared.is_current(generation) {
                debug!(url = %url, "Dropping superseded download");
                return;
            }

            let bytes: Arc<[u8]> = bytes.into();
            match Decoder::new(Cursor::new(bytes.clone())) {
                Ok(decoder) => {
                    let duration = decoder.total_duration();
                    sink.append(decoder);
                    if let Ok(mut loaded) = shared.loaded.lock() {
                        *loaded = Some(Loaded {
                            generation,
                            bytes,
                            duration,
                        });
                    }
                    info!(url = %url, ?duration, "Source ready");
                    let _ = signals.send(MediaSignal::Ready {
                        source: url.clone(),
                        duration: duration.map(|d| d.as_secs_f64()),
                    });
                }
                Err(e) => fail(format!("cannot decode: {}", e)),
            }
        });

        Ok(())
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn play(&mut self) -> Result<()> {
        if self.finished {
            self.restart()?;
        }
        let sink = self.sink.as_ref().context("no source loaded")?;
        sink.play();
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
        Ok(())
    }

    fn paused(&self) -> bool {
        self.sink.as_ref().map(|s| s.is_paused()).unwrap_or(true)
    }

    fn current_time(&self) -> f64 {
        if self.finished {
            return self.duration().unwrap_or(0.0);
        }
        self.sink
            .as_ref()
            .map(|s| s.get_pos().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn set_current_time(&mut self, secs: f64) -> Result<()> {
        if self.finished {
            self.restart()?;
        }
        let sink = self.sink.as_ref().context("no source loaded")?;
        sink.try_seek(Duration::from_secs_f64(secs.max(0.0)))
            .map_err(|e| anyhow!("seek failed: {:?}", e))
    }

    fn duration(&self) -> Option<f64> {
        self.with_loaded(|loaded| loaded.duration.map(|d| d.as_secs_f64()))
            .flatten()
    }

    fn set_volume(&mut self, level: f32) {
        self.volume = level;
        if let Some(sink) = &self.sink {
            sink.set_volume(level);
        }
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn take_ended(&mut self) -> bool {
        if self.finished {
            return false;
        }
        let Some(sink) = &self.sink else {
            return false;
        };
        let ready = self.with_loaded(|_| ()).is_some();
        if ready && sink.empty() {
            self.finished = true;
            return true;
        }
        false
    }
}

impl Drop for StreamMedia {
    fn drop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}
